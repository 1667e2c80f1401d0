//! Hunting: wait for game, then type the shown word before it flees.
use rand::Rng;

use crate::constants::{
    HUNT_MAX_AMMO_PER_SHOT, HUNT_SHOT_WORDS, HUNT_WAIT_PULSES_MAX, HUNT_WAIT_PULSES_MIN,
    LOG_TARGET_PARTY,
};
use crate::context::GameContext;
use crate::error::SimResult;
use crate::item::ItemCategory;
use crate::mode::{Mode, ModeType, State, Transition};
use crate::modes::Notice;

const LEAVE: &str = "leave";

pub fn mode(ctx: &mut GameContext) -> SimResult<Mode> {
    let builder = Mode::builder(ModeType::Hunt);
    if ctx.vehicle.quantity(ItemCategory::Ammo) == 0 {
        return builder
            .initial_state(Notice::closing("You have no ammunition to hunt with."))
            .build();
    }
    let pulses = ctx
        .rng
        .gen_range(HUNT_WAIT_PULSES_MIN..=HUNT_WAIT_PULSES_MAX);
    builder.initial_state(Stalking { pulses_left: pulses }).build()
}

/// Waiting for game to show up.
#[derive(Debug)]
struct Stalking {
    pulses_left: u32,
}

impl State for Stalking {
    fn render(&self, _ctx: &GameContext) -> String {
        format!("You wait quietly for game to show itself... (type `{LEAVE}` to give up)\n")
    }

    fn on_input(&mut self, input: &str, _ctx: &mut GameContext) -> SimResult<Transition> {
        if input.trim().eq_ignore_ascii_case(LEAVE) {
            return Ok(Transition::remove_mode());
        }
        Ok(Transition::Stay)
    }

    fn tick(&mut self, ctx: &mut GameContext, system_tick: bool) -> SimResult<Transition> {
        if system_tick {
            return Ok(Transition::Stay);
        }
        self.pulses_left = self.pulses_left.saturating_sub(1);
        if self.pulses_left > 0 {
            return Ok(Transition::Stay);
        }
        let word = HUNT_SHOT_WORDS[ctx.rng.gen_range(0..HUNT_SHOT_WORDS.len())];
        Ok(Transition::to(Aiming {
            word,
            pulses_left: ctx.config.hunt_window_pulses,
            pulses_waited: 0,
            system_ticks: 0,
        }))
    }
}

/// Prey in sight. Only the shown word fires.
#[derive(Debug)]
struct Aiming {
    word: &'static str,
    pulses_left: u32,
    pulses_waited: u32,
    /// Raw ticks since the prey appeared, a rough reaction time.
    system_ticks: u64,
}

impl Aiming {
    fn shoot(&self, hit: bool, ctx: &mut GameContext) -> String {
        let ammo = ctx.vehicle.item(ItemCategory::Ammo).cloned();
        let spent = ammo.map_or(0, |ammo| {
            let shot = ammo.transaction(HUNT_MAX_AMMO_PER_SHOT.min(ammo.quantity));
            ctx.vehicle.remove_item(&shot)
        });
        if !hit {
            return format!("You missed and wasted {spent} bullets.");
        }
        let carry = ctx.config.hunt_carry_limit_lbs;
        let meat = if self.pulses_waited == 0 { carry } else { carry / 2 };
        let gained = ctx
            .vehicle
            .item(ItemCategory::Food)
            .cloned()
            .map_or(0, |food| ctx.vehicle.add_item(&food.transaction(meat)));
        log::debug!(
            target: LOG_TARGET_PARTY,
            "hunt: reaction {} ticks, {spent} bullets, {gained} lbs",
            self.system_ticks
        );
        format!("Right on target! You used {spent} bullets and carried back {gained} pounds of food.")
    }
}

impl State for Aiming {
    fn render(&self, _ctx: &GameContext) -> String {
        format!("Game spotted! Quick, type `{}`!\n", self.word)
    }

    fn on_input(&mut self, input: &str, ctx: &mut GameContext) -> SimResult<Transition> {
        let input = input.trim();
        if input.eq_ignore_ascii_case(LEAVE) {
            return Ok(Transition::remove_mode());
        }
        let hit = input.eq_ignore_ascii_case(self.word);
        Ok(Transition::to(Notice::closing(self.shoot(hit, ctx))))
    }

    fn tick(&mut self, _ctx: &mut GameContext, system_tick: bool) -> SimResult<Transition> {
        if system_tick {
            self.system_ticks = self.system_ticks.saturating_add(1);
            return Ok(Transition::Stay);
        }
        self.pulses_waited = self.pulses_waited.saturating_add(1);
        self.pulses_left = self.pulses_left.saturating_sub(1);
        if self.pulses_left == 0 {
            return Ok(Transition::to(Notice::closing("The animal got away.")));
        }
        Ok(Transition::Stay)
    }
}
