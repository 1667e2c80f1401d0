//! Session configuration: clock cadence, travel balance and party limits.
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::error::{SimError, SimResult};
use crate::numbers::{i64_to_f64, usize_to_f64};

/// Errors raised when configuration invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be at least {min} (got {value})")]
    MinViolation {
        field: &'static str,
        min: f64,
        value: f64,
    },
    #[error("{field} must be between {min} and {max} (got {value})")]
    RangeViolation {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
}

/// Tunable simulation settings. Every field has a default so partial JSON
/// documents are valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Length of one simulation pulse in milliseconds.
    #[serde(default = "SimConfig::default_pulse_interval_ms")]
    pub pulse_interval_ms: u64,
    #[serde(default = "SimConfig::default_base_mileage")]
    pub base_mileage: f64,
    /// Dollars of draft animals at which they neither help nor hinder travel.
    #[serde(default = "SimConfig::default_animal_investment_pivot")]
    pub animal_investment_pivot: f64,
    #[serde(default = "SimConfig::default_animal_investment_divisor")]
    pub animal_investment_divisor: f64,
    #[serde(default = "SimConfig::default_mileage_noise_max")]
    pub mileage_noise_max: u32,
    /// Chance that a day's mileage is halved.
    #[serde(default = "SimConfig::default_bad_luck_chance")]
    pub bad_luck_chance: f64,
    #[serde(default = "SimConfig::default_min_daily_mileage")]
    pub min_daily_mileage: i32,
    #[serde(default = "SimConfig::default_trail_length")]
    pub trail_length: u32,
    #[serde(default = "SimConfig::default_starting_cash_cents")]
    pub starting_cash_cents: i64,
    #[serde(default = "SimConfig::default_max_party_size")]
    pub max_party_size: usize,
    /// Pulses a hunter has to fire once prey shows up.
    #[serde(default = "SimConfig::default_hunt_window_pulses")]
    pub hunt_window_pulses: u32,
    /// Pounds of meat the party can haul back from one hunt.
    #[serde(default = "SimConfig::default_hunt_carry_limit_lbs")]
    pub hunt_carry_limit_lbs: u32,
    /// Fixed seed for the session RNG; entropy is used when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SimConfig {
    const fn default_pulse_interval_ms() -> u64 {
        1_000
    }

    const fn default_base_mileage() -> f64 {
        20.0
    }

    const fn default_animal_investment_pivot() -> f64 {
        110.0
    }

    const fn default_animal_investment_divisor() -> f64 {
        2.5
    }

    const fn default_mileage_noise_max() -> u32 {
        10
    }

    const fn default_bad_luck_chance() -> f64 {
        0.5
    }

    const fn default_min_daily_mileage() -> i32 {
        10
    }

    const fn default_trail_length() -> u32 {
        2_040
    }

    const fn default_starting_cash_cents() -> i64 {
        80_000
    }

    const fn default_max_party_size() -> usize {
        4
    }

    const fn default_hunt_window_pulses() -> u32 {
        3
    }

    const fn default_hunt_carry_limit_lbs() -> u32 {
        100
    }

    /// Parse and validate a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or a value is out of range.
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|source| SimError::Parse {
            what: "simulation config",
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pulse_interval_ms == 0 {
            return Err(ConfigError::MinViolation {
                field: "pulse_interval_ms",
                min: 1.0,
                value: 0.0,
            });
        }
        if !(self.animal_investment_divisor > 0.0) {
            return Err(ConfigError::MinViolation {
                field: "animal_investment_divisor",
                min: f64::EPSILON,
                value: self.animal_investment_divisor,
            });
        }
        if !(0.0..=1.0).contains(&self.bad_luck_chance) {
            return Err(ConfigError::RangeViolation {
                field: "bad_luck_chance",
                min: 0.0,
                max: 1.0,
                value: self.bad_luck_chance,
            });
        }
        if self.min_daily_mileage < 0 {
            return Err(ConfigError::MinViolation {
                field: "min_daily_mileage",
                min: 0.0,
                value: f64::from(self.min_daily_mileage),
            });
        }
        if self.trail_length == 0 {
            return Err(ConfigError::MinViolation {
                field: "trail_length",
                min: 1.0,
                value: 0.0,
            });
        }
        if self.starting_cash_cents < 0 {
            return Err(ConfigError::MinViolation {
                field: "starting_cash_cents",
                min: 0.0,
                value: i64_to_f64(self.starting_cash_cents),
            });
        }
        if !(1..=8).contains(&self.max_party_size) {
            return Err(ConfigError::RangeViolation {
                field: "max_party_size",
                min: 1.0,
                max: 8.0,
                value: usize_to_f64(self.max_party_size),
            });
        }
        if self.hunt_window_pulses == 0 {
            return Err(ConfigError::MinViolation {
                field: "hunt_window_pulses",
                min: 1.0,
                value: 0.0,
            });
        }
        Ok(())
    }

    #[must_use]
    pub const fn pulse_interval(&self) -> Duration {
        Duration::from_millis(self.pulse_interval_ms)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            pulse_interval_ms: Self::default_pulse_interval_ms(),
            base_mileage: Self::default_base_mileage(),
            animal_investment_pivot: Self::default_animal_investment_pivot(),
            animal_investment_divisor: Self::default_animal_investment_divisor(),
            mileage_noise_max: Self::default_mileage_noise_max(),
            bad_luck_chance: Self::default_bad_luck_chance(),
            min_daily_mileage: Self::default_min_daily_mileage(),
            trail_length: Self::default_trail_length(),
            starting_cash_cents: Self::default_starting_cash_cents(),
            max_party_size: Self::default_max_party_size(),
            hunt_window_pulses: Self::default_hunt_window_pulses(),
            hunt_carry_limit_lbs: Self::default_hunt_carry_limit_lbs(),
            seed: None,
        }
    }
}
