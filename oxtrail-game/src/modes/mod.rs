//! Concrete screens of the game.
use crate::context::GameContext;
use crate::error::SimResult;
use crate::mode::{State, Transition};

pub mod game_over;
pub mod hunt;
pub mod new_game;
pub mod random_event;
pub mod store;
pub mod trade;
pub mod travel;

const CONTINUE_PROMPT: &str = "(press Enter to continue)";

/// Fixed message. Any input dismisses it, either back to the owning menu or
/// by removing the owning mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    text: String,
    closes_mode: bool,
}

impl Notice {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            closes_mode: false,
        }
    }

    /// Dismissing this notice also leaves the owning mode.
    #[must_use]
    pub fn closing(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            closes_mode: true,
        }
    }
}

impl State for Notice {
    fn render(&self, _ctx: &GameContext) -> String {
        format!("{}\n{CONTINUE_PROMPT}\n", self.text)
    }

    fn on_input(&mut self, _input: &str, _ctx: &mut GameContext) -> SimResult<Transition> {
        if self.closes_mode {
            Ok(Transition::remove_mode())
        } else {
            Ok(Transition::ClearState)
        }
    }
}
