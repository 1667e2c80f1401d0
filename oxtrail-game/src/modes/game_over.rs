//! End-of-game summary.
use std::fmt::Write as _;

use crate::context::{Ending, GameContext};
use crate::error::SimResult;
use crate::mode::{Mode, ModeType, State, Transition};

pub fn mode(ending: &Ending) -> SimResult<Mode> {
    Mode::builder(ModeType::GameOver)
        .initial_state(Summary {
            ending: ending.clone(),
        })
        .build()
}

#[derive(Debug)]
struct Summary {
    ending: Ending,
}

impl State for Summary {
    fn render(&self, ctx: &GameContext) -> String {
        let mut out = match &self.ending {
            Ending::Arrived => "You have reached the end of the trail!\n".to_string(),
            Ending::PartyLost => "Everyone in your party has died.\n".to_string(),
            Ending::LeaderDied(report) => format!("{}\n", report.text),
        };
        let vehicle = &ctx.vehicle;
        let _ = writeln!(
            out,
            "Days on the trail: {}\nMiles travelled: {} of {}",
            ctx.day,
            vehicle.odometer(),
            ctx.config.trail_length
        );
        let _ = writeln!(
            out,
            "Survivors: {} of {} (average health {})",
            vehicle.living_count(),
            vehicle.passengers().len(),
            vehicle.average_health().label()
        );
        out.push_str(if self.ending.is_victory() {
            "Congratulations! Press Enter to exit.\n"
        } else {
            "GAME OVER. Press Enter to exit.\n"
        });
        out
    }

    fn on_input(&mut self, _input: &str, ctx: &mut GameContext) -> SimResult<Transition> {
        ctx.closed = true;
        Ok(Transition::Stay)
    }
}
