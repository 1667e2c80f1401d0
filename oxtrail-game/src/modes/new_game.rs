//! Party formation.
use crate::context::GameContext;
use crate::error::SimResult;
use crate::mode::{Mode, ModeRequest, ModeType, State, Transition};
use crate::modes::store;
use crate::person::Person;

pub fn mode() -> SimResult<Mode> {
    Mode::builder(ModeType::NewGame)
        .initial_state(PartyPrompt::default())
        .build()
}

/// Collects the leader's name, then companions until the party is full or
/// a blank line is entered.
#[derive(Debug, Default)]
struct PartyPrompt {
    names: Vec<String>,
}

impl PartyPrompt {
    fn finish(&mut self, ctx: &mut GameContext) -> SimResult<Transition> {
        for (index, name) in self.names.drain(..).enumerate() {
            ctx.vehicle.board(Person::new(name, index == 0))?;
        }
        log::info!(
            target: crate::constants::LOG_TARGET_PARTY,
            "party of {} formed",
            ctx.vehicle.passengers().len()
        );
        Ok(Transition::Mode(ModeRequest::Replace(store::mode(
            &ctx.catalog,
        )?)))
    }
}

impl State for PartyPrompt {
    fn render(&self, ctx: &GameContext) -> String {
        if self.names.is_empty() {
            return "What is the name of the wagon leader?\n".to_string();
        }
        format!(
            "Your party: {}\nName of passenger {} of {} (blank line to set out):\n",
            self.names.join(", "),
            self.names.len() + 1,
            ctx.config.max_party_size
        )
    }

    fn on_input(&mut self, input: &str, ctx: &mut GameContext) -> SimResult<Transition> {
        let name = input.trim();
        if name.is_empty() {
            if self.names.is_empty() {
                return Ok(Transition::Stay);
            }
            return self.finish(ctx);
        }
        self.names.push(name.to_string());
        if self.names.len() >= ctx.config.max_party_size {
            return self.finish(ctx);
        }
        Ok(Transition::Stay)
    }
}
