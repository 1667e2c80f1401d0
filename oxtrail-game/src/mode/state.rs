//! Sub-screens owned by a mode.
use crate::context::GameContext;
use crate::error::SimResult;
use crate::mode::ModeRequest;

/// What a state wants to happen after handling input or a tick.
pub enum Transition {
    /// Keep the current state; any changes were made in place.
    Stay,
    /// Swap in a new state. The old one is torn down first.
    SetState(Box<dyn State>),
    /// Drop the state and fall back to the owning mode's menu.
    ClearState,
    /// Ask the stack to act on the owning mode.
    Mode(ModeRequest),
}

impl Transition {
    pub fn to<S: State + 'static>(state: S) -> Self {
        Self::SetState(Box::new(state))
    }

    #[must_use]
    pub const fn remove_mode() -> Self {
        Self::Mode(ModeRequest::Remove)
    }
}

impl std::fmt::Debug for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stay => f.write_str("Stay"),
            Self::SetState(_) => f.write_str("SetState(..)"),
            Self::ClearState => f.write_str("ClearState"),
            Self::Mode(request) => f.debug_tuple("Mode").field(request).finish(),
        }
    }
}

/// A sub-screen with its own payload. States never touch the mode stack;
/// they describe the change they want through [`Transition`].
pub trait State: Send + Sync {
    fn render(&self, ctx: &GameContext) -> String;

    /// Handle one line of input.
    ///
    /// # Errors
    ///
    /// Only invariant violations surface as errors.
    fn on_input(&mut self, input: &str, ctx: &mut GameContext) -> SimResult<Transition>;

    /// Called on every raw system tick (`system_tick == true`) and on every
    /// simulation pulse (`system_tick == false`) while the owning mode is on top.
    ///
    /// # Errors
    ///
    /// Only invariant violations surface as errors.
    fn tick(&mut self, _ctx: &mut GameContext, _system_tick: bool) -> SimResult<Transition> {
        Ok(Transition::Stay)
    }

    /// Whether input is forwarded to this state. Input is dropped otherwise.
    fn accepts_input(&self) -> bool {
        true
    }

    /// Runs once, right before the state is dropped.
    fn on_teardown(&mut self, _ctx: &mut GameContext) {}
}
