//! Ordered stack of modes. Only the top-most live mode is ticked or fed input.
use crate::constants::LOG_TARGET_MODES;
use crate::context::GameContext;
use crate::error::SimResult;
use crate::mode::{Mode, ModeRequest, ModeType};

#[derive(Debug, Default)]
pub struct ModeStack {
    modes: Vec<Mode>,
}

impl ModeStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_mode(&mut self, mode: Mode) {
        log::debug!(target: LOG_TARGET_MODES, "push {:?}", mode.mode_type());
        self.modes.push(mode);
    }

    /// Top of the stack, including a frame that is waiting to be removed.
    #[must_use]
    pub fn current_mode(&self) -> Option<&Mode> {
        self.modes.last()
    }

    /// Top-most frame that is not flagged for removal.
    #[must_use]
    pub fn active_mode(&self) -> Option<&Mode> {
        self.modes.iter().rev().find(|mode| !mode.is_pending_removal())
    }

    #[must_use]
    pub fn active_type(&self) -> Option<ModeType> {
        self.active_mode().map(Mode::mode_type)
    }

    /// Flag the top frame; it is dropped at the start of the next tick.
    pub fn remove_next_tick(&mut self) {
        if let Some(mode) = self.modes.last_mut() {
            log::debug!(target: LOG_TARGET_MODES, "flag {:?} for removal", mode.mode_type());
            mode.flag_removal();
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Whether any frame of `mode_type` is live on the stack.
    #[must_use]
    pub fn contains(&self, mode_type: ModeType) -> bool {
        self.modes
            .iter()
            .any(|mode| mode.mode_type() == mode_type && !mode.is_pending_removal())
    }

    /// Drop flagged frames, then tick the new top.
    ///
    /// # Errors
    ///
    /// Propagates errors from the top mode's state.
    pub fn tick(&mut self, ctx: &mut GameContext, system_tick: bool) -> SimResult<()> {
        self.sweep(ctx);
        let Some(top) = self.modes.last_mut() else {
            return Ok(());
        };
        let request = top.tick(ctx, system_tick)?;
        self.apply(request);
        Ok(())
    }

    /// Feed a line to the top frame. Dropped when the top is flagged.
    ///
    /// # Errors
    ///
    /// Propagates errors from the mode's action or state.
    pub fn send_input(&mut self, input: &str, ctx: &mut GameContext) -> SimResult<()> {
        let Some(top) = self.modes.last_mut() else {
            return Ok(());
        };
        if top.is_pending_removal() {
            return Ok(());
        }
        let request = top.send_input(input, ctx)?;
        self.apply(request);
        Ok(())
    }

    /// Text of the top-most live frame.
    #[must_use]
    pub fn display_text(&self, ctx: &GameContext) -> String {
        self.active_mode()
            .map(|mode| mode.display_text(ctx))
            .unwrap_or_default()
    }

    /// Remove every flagged frame, top first, tearing down its state.
    fn sweep(&mut self, ctx: &mut GameContext) {
        let mut index = self.modes.len();
        while index > 0 {
            index -= 1;
            if self.modes[index].is_pending_removal() {
                let mut mode = self.modes.remove(index);
                log::debug!(target: LOG_TARGET_MODES, "pop {:?}", mode.mode_type());
                mode.teardown(ctx);
            }
        }
    }

    fn apply(&mut self, request: Option<ModeRequest>) {
        match request {
            None => {}
            Some(ModeRequest::Push(mode)) => self.push_mode(mode),
            Some(ModeRequest::Remove) => self.remove_next_tick(),
            Some(ModeRequest::Replace(mode)) => {
                self.remove_next_tick();
                self.push_mode(mode);
            }
        }
    }
}
