//! Composition root: clock, mode stack and game context.
use std::time::Duration;

use crate::catalog::ItemCatalog;
use crate::config::SimConfig;
use crate::constants::LOG_TARGET_CLOCK;
use crate::context::{DayOutcome, GameContext};
use crate::director::EventDirector;
use crate::error::SimResult;
use crate::mode::{ModeStack, ModeType};
use crate::modes::{game_over, new_game, random_event, travel};
use crate::rng::SimRng;
use crate::tick::TickCoordinator;
use crate::vehicle::VehicleStatus;

/// A running game session. The host feeds it elapsed time and input lines
/// and pulls display text; nothing here blocks.
#[derive(Debug)]
pub struct Simulation {
    clock: TickCoordinator,
    modes: ModeStack,
    ctx: GameContext,
}

impl Simulation {
    /// New session with the bundled catalogs, starting at party formation.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid configuration or corrupt bundled data.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        let rng = config.seed.map_or_else(SimRng::from_entropy, SimRng::seeded);
        let ctx = GameContext::new(
            config,
            ItemCatalog::bundled()?,
            EventDirector::bundled()?,
            rng,
        )?;
        let mut sim = Self::with_context(ctx)?;
        sim.modes.push_mode(new_game::mode()?);
        Ok(sim)
    }

    /// Session over a prepared context, starting on the trail menu.
    ///
    /// # Errors
    ///
    /// Only fails if the trail menu cannot be built.
    pub fn with_context(ctx: GameContext) -> SimResult<Self> {
        let mut modes = ModeStack::new();
        modes.push_mode(travel::mode()?);
        Ok(Self {
            clock: TickCoordinator::new(ctx.config.pulse_interval()),
            modes,
            ctx,
        })
    }

    /// Advance wall time by `elapsed`. Every call is a system tick for the top
    /// mode; when the clock releases a pulse the top mode gets a pulse tick
    /// and, if time is flowing on the trail, a day passes.
    ///
    /// # Errors
    ///
    /// Propagates invariant violations from modes and the event director.
    pub fn on_tick(&mut self, elapsed: Duration) -> SimResult<()> {
        let pulse = self.clock.on_system_tick(elapsed);
        self.modes.tick(&mut self.ctx, true)?;
        if !pulse {
            return Ok(());
        }
        let backlog = self.clock.due_pulses();
        if backlog > 0 {
            log::debug!(target: LOG_TARGET_CLOCK, "{backlog} pulses queued behind this one");
        }
        self.modes.tick(&mut self.ctx, false)?;
        if self.time_flows() {
            let outcome = self.ctx.advance_day()?;
            self.present(&outcome)?;
        }
        Ok(())
    }

    /// Deliver one line of input to the top mode.
    ///
    /// # Errors
    ///
    /// Propagates invariant violations from the mode.
    pub fn send_input(&mut self, line: &str) -> SimResult<()> {
        self.modes.send_input(line.trim(), &mut self.ctx)
    }

    #[must_use]
    pub fn display_text(&self) -> String {
        self.modes.display_text(&self.ctx)
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.ctx.closed || self.modes.is_empty()
    }

    #[must_use]
    pub const fn context(&self) -> &GameContext {
        &self.ctx
    }

    pub const fn context_mut(&mut self) -> &mut GameContext {
        &mut self.ctx
    }

    #[must_use]
    pub const fn modes(&self) -> &ModeStack {
        &self.modes
    }

    #[must_use]
    pub const fn clock(&self) -> &TickCoordinator {
        &self.clock
    }

    /// Days pass only on the trail screen, while moving or resting, and
    /// never after the game has ended.
    fn time_flows(&self) -> bool {
        if self.ctx.ending.is_some() {
            return false;
        }
        let on_trail = self
            .modes
            .current_mode()
            .is_some_and(|mode| mode.mode_type() == ModeType::Travel && !mode.is_pending_removal());
        on_trail && (self.ctx.vehicle.status() == VehicleStatus::Moving || self.ctx.is_resting())
    }

    /// Queue screens for the day's news. The game-over screen goes in first
    /// so every event is read before it; events are pushed last-first so the
    /// earliest ends up on top.
    fn present(&mut self, outcome: &DayOutcome) -> SimResult<()> {
        if let Some(ending) = &outcome.ending {
            log::debug!(target: LOG_TARGET_CLOCK, "session ending: {ending:?}");
            self.modes.push_mode(game_over::mode(ending)?);
        }
        for report in outcome.events.iter().rev() {
            self.modes.push_mode(random_event::mode(report)?);
        }
        Ok(())
    }
}
