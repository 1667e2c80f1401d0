//! Simulation error type.
//!
//! Only configuration mistakes and invariant violations are errors. Gameplay
//! shortfalls (no money, wagon not moving, unknown menu input) degrade to
//! silent no-ops and never reach this type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::event::TargetKind;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("command key `{0}` is registered more than once")]
    DuplicateCommand(String),

    #[error("command key `{0}` must start with a letter and contain only letters, digits or `_`")]
    InvalidCommand(String),

    #[error("catalog entry invalid: {0}")]
    Catalog(String),

    #[error("failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("event `{event}` targets a {expected}, got a {actual}")]
    WrongTarget {
        event: String,
        expected: TargetKind,
        actual: TargetKind,
    },

    #[error("event `{event}` requires the party leader but `{person}` is not leading")]
    NotLeader { event: String, person: String },

    #[error("`{0}` cannot board: the party already has a living leader")]
    DuplicateLeader(String),

    #[error("no event registered as `{0}`")]
    UnknownEvent(String),

    #[error("event `{0}` is registered more than once")]
    DuplicateEvent(String),
}

/// Shorthand result type for the simulation core.
pub type SimResult<T> = Result<T, SimError>;
