//! The trail: the hub menu players return to between everything else.
use std::fmt::Write as _;

use crate::constants::LOG_TARGET_PARTY;
use crate::context::GameContext;
use crate::error::SimResult;
use crate::item::ItemCategory;
use crate::mode::{Mode, ModeRequest, ModeType, State, Transition};
use crate::modes::{Notice, hunt, store, trade};
use crate::numbers::format_cents;
use crate::vehicle::{RationLevel, TravelPace, VehicleStatus};

const MAX_REST_DAYS: u32 = 9;

pub fn mode() -> SimResult<Mode> {
    Mode::builder(ModeType::Travel)
        .header(status_line)
        .show_keys()
        .choice("Continue", "Continue on the trail", continue_on)
        .choice("Supplies", "Check supplies", |_| Ok(Transition::to(Supplies)))
        .choice("Pace", "Change pace", |_| {
            Ok(Transition::to(Setting::Pace))
        })
        .choice("Rations", "Change food rations", |_| {
            Ok(Transition::to(Setting::Rations))
        })
        .choice("Rest", "Stop to rest", |_| {
            Ok(Transition::to(RestPrompt::default()))
        })
        .choice("Repair", "Repair the wagon", repair)
        .choice("Trade", "Attempt to trade", |ctx| {
            Ok(Transition::Mode(ModeRequest::Push(trade::mode(ctx)?)))
        })
        .choice("Hunt", "Hunt for food", |ctx| {
            Ok(Transition::Mode(ModeRequest::Push(hunt::mode(ctx)?)))
        })
        .choice("Store", "Buy supplies", |ctx| {
            Ok(Transition::Mode(ModeRequest::Push(store::mode(
                &ctx.catalog,
            )?)))
        })
        .choice("Quit", "Quit the game", |ctx| {
            ctx.closed = true;
            Ok(Transition::Stay)
        })
        .build()
}

/// One-line summary of the journey so far.
#[must_use]
pub fn status_line(ctx: &GameContext) -> String {
    let vehicle = &ctx.vehicle;
    let mut line = format!(
        "Day {} | {} of {} miles | wagon {} | health {} | food {} lbs | pace {} | rations {}",
        ctx.day,
        vehicle.odometer(),
        ctx.config.trail_length,
        vehicle.status().label(),
        vehicle.average_health().label(),
        vehicle.quantity(ItemCategory::Food),
        vehicle.pace().label(),
        vehicle.ration().label()
    );
    if let Some(part) = vehicle.broken_part() {
        let _ = write!(line, " | broken {part}");
    }
    match vehicle.pending_skip_days() {
        0 => {}
        1 => line.push_str(" | delayed 1 day"),
        days => {
            let _ = write!(line, " | delayed {days} days");
        }
    }
    line
}

fn continue_on(ctx: &mut GameContext) -> SimResult<Transition> {
    if ctx.vehicle.status() == VehicleStatus::Broken {
        return Ok(Transition::to(Notice::new(
            "The wagon is broken. Repair it before moving on.",
        )));
    }
    if ctx.vehicle.quantity(ItemCategory::Animal) == 0 {
        return Ok(Transition::to(Notice::new(
            "You have no oxen to pull the wagon.",
        )));
    }
    ctx.rest_days = 0;
    ctx.vehicle.set_status(VehicleStatus::Moving);
    log::info!(target: LOG_TARGET_PARTY, "setting out on day {}", ctx.day);
    Ok(Transition::to(Driving))
}

fn repair(ctx: &mut GameContext) -> SimResult<Transition> {
    let text = match (ctx.vehicle.broken_part(), ctx.vehicle.repair()) {
        (_, Some(part)) => format!("You replace the broken {part}."),
        (Some(part), None) => format!("You have no spare {part}. Try trading for one."),
        (None, None) => "The wagon needs no repairs.".to_string(),
    };
    Ok(Transition::to(Notice::new(text)))
}

/// The wagon rolls while this state is active.
#[derive(Debug)]
struct Driving;

impl State for Driving {
    fn render(&self, ctx: &GameContext) -> String {
        format!(
            "{}\nThe wagon rolls on. {} miles covered today. Press Enter to stop.\n",
            status_line(ctx),
            ctx.vehicle.mileage().max(0)
        )
    }

    fn on_input(&mut self, _input: &str, _ctx: &mut GameContext) -> SimResult<Transition> {
        Ok(Transition::ClearState)
    }

    fn tick(&mut self, ctx: &mut GameContext, system_tick: bool) -> SimResult<Transition> {
        if !system_tick && ctx.vehicle.status() != VehicleStatus::Moving {
            return Ok(Transition::ClearState);
        }
        Ok(Transition::Stay)
    }

    fn on_teardown(&mut self, ctx: &mut GameContext) {
        if ctx.vehicle.status() == VehicleStatus::Moving {
            ctx.vehicle.set_status(VehicleStatus::Stopped);
        }
    }
}

#[derive(Debug)]
struct Supplies;

impl State for Supplies {
    fn render(&self, ctx: &GameContext) -> String {
        let mut out = String::from("Your supplies:\n");
        for item in ctx.vehicle.inventory().values() {
            if item.category == ItemCategory::Cash {
                let _ = writeln!(out, "  {:<14} {}", item.name, format_cents(item.total_value_cents()));
            } else {
                let _ = writeln!(out, "  {:<14} {} {}", item.name, item.quantity, item.category.unit());
            }
        }
        out.push_str("Party:\n");
        for person in ctx.vehicle.passengers() {
            let mut flags = Vec::new();
            if person.is_leader() {
                flags.push("leader");
            }
            if person.is_injured() {
                flags.push("injured");
            }
            if person.is_infected() {
                flags.push("ill");
            }
            let _ = write!(out, "  {:<14} {}", person.name, person.health().label());
            if !flags.is_empty() {
                let _ = write!(out, " ({})", flags.join(", "));
            }
            out.push('\n');
        }
        out.push_str("(press Enter to continue)\n");
        out
    }

    fn on_input(&mut self, _input: &str, _ctx: &mut GameContext) -> SimResult<Transition> {
        Ok(Transition::ClearState)
    }
}

/// Numbered picker for pace or rations.
#[derive(Debug, Clone, Copy)]
enum Setting {
    Pace,
    Rations,
}

impl Setting {
    fn labels(self) -> Vec<&'static str> {
        match self {
            Self::Pace => TravelPace::ALL.iter().map(|pace| pace.label()).collect(),
            Self::Rations => RationLevel::ALL.iter().map(|ration| ration.label()).collect(),
        }
    }
}

impl State for Setting {
    fn render(&self, ctx: &GameContext) -> String {
        let (title, current) = match self {
            Self::Pace => ("Choose a pace", ctx.vehicle.pace().label()),
            Self::Rations => ("Choose rations", ctx.vehicle.ration().label()),
        };
        let mut out = format!("{title} (currently {current}):\n");
        for (number, label) in self.labels().iter().enumerate() {
            let _ = writeln!(out, "{}. {label}", number + 1);
        }
        out
    }

    fn on_input(&mut self, input: &str, ctx: &mut GameContext) -> SimResult<Transition> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Transition::ClearState);
        }
        let index = input
            .parse::<usize>()
            .ok()
            .and_then(|number| number.checked_sub(1))
            .or_else(|| {
                self.labels()
                    .iter()
                    .position(|label| label.eq_ignore_ascii_case(input))
            });
        match (self, index) {
            (Self::Pace, Some(index)) if index < TravelPace::ALL.len() => {
                ctx.vehicle.set_pace(TravelPace::ALL[index]);
                Ok(Transition::ClearState)
            }
            (Self::Rations, Some(index)) if index < RationLevel::ALL.len() => {
                ctx.vehicle.set_ration(RationLevel::ALL[index]);
                Ok(Transition::ClearState)
            }
            _ => Ok(Transition::Stay),
        }
    }
}

#[derive(Debug, Default)]
struct RestPrompt {
    invalid: bool,
}

impl State for RestPrompt {
    fn render(&self, _ctx: &GameContext) -> String {
        let mut out = String::new();
        if self.invalid {
            let _ = writeln!(out, "Enter a number from 1 to {MAX_REST_DAYS}.");
        }
        let _ = writeln!(out, "How many days would you like to rest? (blank line to cancel)");
        out
    }

    fn on_input(&mut self, input: &str, ctx: &mut GameContext) -> SimResult<Transition> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Transition::ClearState);
        }
        match input.parse::<u32>() {
            Ok(days) if (1..=MAX_REST_DAYS).contains(&days) => {
                ctx.start_rest(days);
                Ok(Transition::to(Resting))
            }
            _ => {
                self.invalid = true;
                Ok(Transition::Stay)
            }
        }
    }
}

/// Time passes without travel until the rest days run out.
#[derive(Debug)]
struct Resting;

impl State for Resting {
    fn render(&self, ctx: &GameContext) -> String {
        format!(
            "{}\nResting. {} days to go. Press Enter to stop early.\n",
            status_line(ctx),
            ctx.rest_days
        )
    }

    fn on_input(&mut self, _input: &str, _ctx: &mut GameContext) -> SimResult<Transition> {
        Ok(Transition::ClearState)
    }

    fn tick(&mut self, ctx: &mut GameContext, system_tick: bool) -> SimResult<Transition> {
        if !system_tick && !ctx.is_resting() {
            return Ok(Transition::ClearState);
        }
        Ok(Transition::Stay)
    }

    fn on_teardown(&mut self, ctx: &mut GameContext) {
        ctx.rest_days = 0;
    }
}
