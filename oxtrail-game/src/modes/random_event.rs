//! Announcement of an event that just happened.
use crate::context::GameContext;
use crate::director::EventReport;
use crate::error::SimResult;
use crate::mode::{Mode, ModeType, State, Transition};
use crate::modes::CONTINUE_PROMPT;

pub fn mode(report: &EventReport) -> SimResult<Mode> {
    Mode::builder(ModeType::RandomEvent)
        .initial_state(Announcement {
            text: report.text.clone(),
            acknowledged: false,
        })
        .build()
}

#[derive(Debug)]
struct Announcement {
    text: String,
    acknowledged: bool,
}

impl State for Announcement {
    fn render(&self, _ctx: &GameContext) -> String {
        format!("{}\n{CONTINUE_PROMPT}\n", self.text)
    }

    fn on_input(&mut self, _input: &str, _ctx: &mut GameContext) -> SimResult<Transition> {
        self.acknowledged = true;
        Ok(Transition::remove_mode())
    }

    fn accepts_input(&self) -> bool {
        !self.acknowledged
    }
}
