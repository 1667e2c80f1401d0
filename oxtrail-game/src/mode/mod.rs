//! Interactive screens: a command menu plus an optional nested state.
use std::fmt;
use std::fmt::Write as _;

use crate::constants::LOG_TARGET_MODES;
use crate::context::GameContext;
use crate::error::{SimError, SimResult};

pub mod stack;
pub mod state;
pub use stack::ModeStack;
pub use state::{State, Transition};

/// Callback bound to a menu command.
pub type MenuAction = Box<dyn FnMut(&mut GameContext) -> SimResult<Transition> + Send + Sync>;
/// Text computed from the current context, used for headers and footers.
pub type MenuText = Box<dyn Fn(&GameContext) -> String + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeType {
    NewGame,
    Travel,
    Store,
    Trade,
    Hunt,
    RandomEvent,
    GameOver,
}

/// Stack operations a mode can request for itself.
pub enum ModeRequest {
    /// Put another mode on top of this one.
    Push(Mode),
    /// Flag this mode for removal on the next tick.
    Remove,
    /// Flag this mode for removal and put another in its place.
    Replace(Mode),
}

impl fmt::Debug for ModeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Push(mode) => f.debug_tuple("Push").field(&mode.mode_type).finish(),
            Self::Remove => f.write_str("Remove"),
            Self::Replace(mode) => f.debug_tuple("Replace").field(&mode.mode_type).finish(),
        }
    }
}

struct MenuEntry {
    key: String,
    description: String,
    action: MenuAction,
}

pub struct Mode {
    mode_type: ModeType,
    header: Option<MenuText>,
    footer: Option<MenuText>,
    show_keys: bool,
    menu: Vec<MenuEntry>,
    state: Option<Box<dyn State>>,
    pending_removal: bool,
}

impl fmt::Debug for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mode")
            .field("mode_type", &self.mode_type)
            .field(
                "menu",
                &self.menu.iter().map(|entry| entry.key.as_str()).collect::<Vec<_>>(),
            )
            .field("has_state", &self.state.is_some())
            .field("pending_removal", &self.pending_removal)
            .finish_non_exhaustive()
    }
}

impl Mode {
    #[must_use]
    pub fn builder(mode_type: ModeType) -> ModeBuilder {
        ModeBuilder {
            mode_type,
            header: None,
            footer: None,
            show_keys: false,
            menu: Vec::new(),
            state: None,
        }
    }

    #[must_use]
    pub const fn mode_type(&self) -> ModeType {
        self.mode_type
    }

    #[must_use]
    pub fn has_state(&self) -> bool {
        self.state.is_some()
    }

    #[must_use]
    pub const fn is_pending_removal(&self) -> bool {
        self.pending_removal
    }

    pub(crate) const fn flag_removal(&mut self) {
        self.pending_removal = true;
    }

    /// Swap the current state, tearing down the previous one.
    pub fn set_state(&mut self, state: Option<Box<dyn State>>, ctx: &mut GameContext) {
        if let Some(mut old) = self.state.take() {
            old.on_teardown(ctx);
        }
        self.state = state;
    }

    /// Route one line of input. A live state always gets the line; otherwise
    /// it is matched against the menu and silently dropped on a miss.
    ///
    /// # Errors
    ///
    /// Propagates errors from the state or the bound action.
    pub fn send_input(
        &mut self,
        input: &str,
        ctx: &mut GameContext,
    ) -> SimResult<Option<ModeRequest>> {
        if let Some(state) = self.state.as_mut() {
            if !state.accepts_input() {
                return Ok(None);
            }
            let transition = state.on_input(input, ctx)?;
            return Ok(self.apply(transition, ctx));
        }
        let Some(index) = self.match_command(input) else {
            log::trace!(target: LOG_TARGET_MODES, "{:?} ignored `{input}`", self.mode_type);
            return Ok(None);
        };
        let entry = &mut self.menu[index];
        log::debug!(target: LOG_TARGET_MODES, "{:?} runs `{}`", self.mode_type, entry.key);
        let transition = (entry.action)(ctx)?;
        Ok(self.apply(transition, ctx))
    }

    /// Tick the active state, if any.
    ///
    /// # Errors
    ///
    /// Propagates errors from the state.
    pub fn tick(
        &mut self,
        ctx: &mut GameContext,
        system_tick: bool,
    ) -> SimResult<Option<ModeRequest>> {
        let Some(state) = self.state.as_mut() else {
            return Ok(None);
        };
        let transition = state.tick(ctx, system_tick)?;
        Ok(self.apply(transition, ctx))
    }

    /// Menu listing when idle, otherwise the state's own text.
    #[must_use]
    pub fn display_text(&self, ctx: &GameContext) -> String {
        if let Some(state) = &self.state {
            return state.render(ctx);
        }
        let mut out = String::new();
        if let Some(header) = &self.header {
            out.push_str(&header(ctx));
            out.push('\n');
        }
        for (number, entry) in self.menu.iter().enumerate() {
            if self.show_keys {
                let _ = writeln!(out, "{}. {} - {}", number + 1, entry.key, entry.description);
            } else {
                let _ = writeln!(out, "{}. {}", number + 1, entry.description);
            }
        }
        if let Some(footer) = &self.footer {
            out.push_str(&footer(ctx));
            out.push('\n');
        }
        out
    }

    /// Drop the state, running its teardown hook.
    pub fn teardown(&mut self, ctx: &mut GameContext) {
        self.set_state(None, ctx);
    }

    fn match_command(&self, input: &str) -> Option<usize> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        if let Some(index) = self
            .menu
            .iter()
            .position(|entry| entry.key.eq_ignore_ascii_case(input))
        {
            return Some(index);
        }
        input
            .parse::<usize>()
            .ok()
            .and_then(|number| number.checked_sub(1))
            .filter(|index| *index < self.menu.len())
    }

    fn apply(&mut self, transition: Transition, ctx: &mut GameContext) -> Option<ModeRequest> {
        match transition {
            Transition::Stay => None,
            Transition::SetState(state) => {
                self.set_state(Some(state), ctx);
                None
            }
            Transition::ClearState => {
                self.set_state(None, ctx);
                None
            }
            Transition::Mode(request) => Some(request),
        }
    }
}

pub struct ModeBuilder {
    mode_type: ModeType,
    header: Option<MenuText>,
    footer: Option<MenuText>,
    show_keys: bool,
    menu: Vec<(String, String, MenuAction)>,
    state: Option<Box<dyn State>>,
}

impl ModeBuilder {
    #[must_use]
    pub fn header(mut self, header: impl Fn(&GameContext) -> String + Send + Sync + 'static) -> Self {
        self.header = Some(Box::new(header));
        self
    }

    #[must_use]
    pub fn footer(mut self, footer: impl Fn(&GameContext) -> String + Send + Sync + 'static) -> Self {
        self.footer = Some(Box::new(footer));
        self
    }

    /// Prefix each menu line with its command key.
    #[must_use]
    pub const fn show_keys(mut self) -> Self {
        self.show_keys = true;
        self
    }

    #[must_use]
    pub fn choice(
        mut self,
        key: impl Into<String>,
        description: impl Into<String>,
        action: impl FnMut(&mut GameContext) -> SimResult<Transition> + Send + Sync + 'static,
    ) -> Self {
        self.menu.push((key.into(), description.into(), Box::new(action)));
        self
    }

    #[must_use]
    pub fn initial_state<S: State + 'static>(mut self, state: S) -> Self {
        self.state = Some(Box::new(state));
        self
    }

    /// Validate command keys and assemble the mode.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidCommand`] for malformed keys and
    /// [`SimError::DuplicateCommand`] when two keys collide ignoring case.
    pub fn build(self) -> SimResult<Mode> {
        let mut menu: Vec<MenuEntry> = Vec::with_capacity(self.menu.len());
        for (key, description, action) in self.menu {
            if !is_valid_key(&key) {
                return Err(SimError::InvalidCommand(key));
            }
            if menu.iter().any(|entry| entry.key.eq_ignore_ascii_case(&key)) {
                return Err(SimError::DuplicateCommand(key));
            }
            menu.push(MenuEntry {
                key,
                description,
                action,
            });
        }
        Ok(Mode {
            mode_type: self.mode_type,
            header: self.header,
            footer: self.footer,
            show_keys: self.show_keys,
            menu,
            state: self.state,
            pending_removal: false,
        })
    }
}

fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    chars.next().is_some_and(|first| first.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
