//! Fixed-interval pulse generation from irregular host ticks.
use std::time::Duration;

use crate::constants::LOG_TARGET_CLOCK;

/// Accumulates host tick time and releases at most one simulation pulse per
/// call. Unconsumed time carries over to later calls, so a burst of time is
/// paid out over successive ticks rather than dropped.
#[derive(Debug, Clone)]
pub struct TickCoordinator {
    interval: Duration,
    accumulator: Duration,
    system_ticks: u64,
    pulses: u64,
}

impl TickCoordinator {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            accumulator: Duration::ZERO,
            system_ticks: 0,
            pulses: 0,
        }
    }

    /// Record one host tick that covered `elapsed` wall time. Returns `true`
    /// when this call emits a simulation pulse.
    pub fn on_system_tick(&mut self, elapsed: Duration) -> bool {
        self.system_ticks = self.system_ticks.saturating_add(1);
        self.accumulator = self.accumulator.saturating_add(elapsed);
        if self.accumulator < self.interval {
            return false;
        }
        self.accumulator -= self.interval;
        self.pulses = self.pulses.saturating_add(1);
        log::trace!(
            target: LOG_TARGET_CLOCK,
            "pulse {} (carry {:?})",
            self.pulses,
            self.accumulator
        );
        true
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Time banked toward future pulses.
    #[must_use]
    pub const fn carried(&self) -> Duration {
        self.accumulator
    }

    /// Whole pulses already paid for but not yet emitted.
    #[must_use]
    pub fn due_pulses(&self) -> u32 {
        u32::try_from(self.accumulator.as_nanos() / self.interval.as_nanos()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub const fn system_ticks(&self) -> u64 {
        self.system_ticks
    }

    #[must_use]
    pub const fn pulses(&self) -> u64 {
        self.pulses
    }
}
