//! Centralized balance and tuning constants for Oxtrail game logic.
//!
//! Values that players may want to tune per session live in
//! [`SimConfig`](crate::config::SimConfig); the numbers here shape the
//! moment-to-moment rules and only change through reviewed code.

// Logging targets ----------------------------------------------------------
pub(crate) const LOG_TARGET_CLOCK: &str = "oxtrail::clock";
pub(crate) const LOG_TARGET_DIRECTOR: &str = "oxtrail::director";
pub(crate) const LOG_TARGET_PARTY: &str = "oxtrail::party";
pub(crate) const LOG_TARGET_MODES: &str = "oxtrail::modes";

// Event ids ----------------------------------------------------------------
/// Manual-only event fired when the wagon leader dies.
pub const LEADER_DEATH_EVENT: &str = "leader_death";

// Party tuning -------------------------------------------------------------
pub(crate) const STARVATION_DAMAGE_CHANCE: f64 = 0.6;
pub(crate) const AILMENT_WORSEN_CHANCE: f64 = 0.25;
pub(crate) const AILMENT_RECOVER_CHANCE: f64 = 0.2;
pub(crate) const AILMENT_RECOVER_CHANCE_RESTING: f64 = 0.45;
pub(crate) const GRUELING_DAMAGE_CHANCE: f64 = 0.125;
pub(crate) const EXPOSURE_DAMAGE_CHANCE: f64 = 0.1;
pub(crate) const RECOVERY_CHANCE: f64 = 0.1;
pub(crate) const RECOVERY_CHANCE_RESTING: f64 = 0.35;

// Vehicle tuning -----------------------------------------------------------
pub(crate) const PACE_FACTOR_STEADY: f64 = 1.0;
pub(crate) const PACE_FACTOR_STRENUOUS: f64 = 1.25;
pub(crate) const PACE_FACTOR_GRUELING: f64 = 1.5;
pub(crate) const RATION_LBS_FILLING: u32 = 3;
pub(crate) const RATION_LBS_MEAGER: u32 = 2;
pub(crate) const RATION_LBS_BARE_BONES: u32 = 1;

// Trade tuning -------------------------------------------------------------
pub(crate) const TRADE_MAX_OXEN: u32 = 2;
pub(crate) const TRADE_MAX_CLOTHES: u32 = 5;
pub(crate) const TRADE_MAX_AMMO: u32 = 80;
pub(crate) const TRADE_MAX_PARTS: u32 = 1;
pub(crate) const TRADE_MAX_FOOD_LBS: u32 = 100;

// Hunt tuning --------------------------------------------------------------
pub(crate) const HUNT_MAX_AMMO_PER_SHOT: u32 = 10;
pub(crate) const HUNT_WAIT_PULSES_MIN: u32 = 1;
pub(crate) const HUNT_WAIT_PULSES_MAX: u32 = 3;
pub(crate) const HUNT_SHOT_WORDS: [&str; 4] = ["bang", "blam", "pow", "wham"];
