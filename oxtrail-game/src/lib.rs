//! Oxtrail Game Engine
//!
//! Platform-agnostic core of a text-driven trail-survival game: a fixed-pulse
//! clock, a stack of interactive modes, the wagon and its party, and a random
//! event director. Hosts drive a [`Simulation`] with elapsed time and input
//! lines and render whatever [`Simulation::display_text`] returns.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod context;
pub mod director;
pub mod error;
pub mod event;
pub mod item;
pub mod mode;
pub mod modes;
pub mod numbers;
pub mod person;
pub mod rng;
#[cfg(feature = "async")]
pub mod shared;
pub mod sim;
pub mod tick;
pub mod vehicle;

// Re-export commonly used types
pub use catalog::ItemCatalog;
pub use config::{ConfigError, SimConfig};
pub use constants::LEADER_DEATH_EVENT;
pub use context::{DayOutcome, Ending, GameContext};
pub use director::{EventDirector, EventReport, EventRow};
pub use error::{SimError, SimResult};
pub use event::{
    EventCategory, EventDescriptor, EventEffect, EventHandler, EventOutcome, EventTarget,
    ExecutionMode, TargetKind, TemplatedEvent,
};
pub use item::{Item, ItemCategory, ItemList};
pub use mode::{MenuAction, Mode, ModeBuilder, ModeRequest, ModeStack, ModeType, State, Transition};
pub use person::{HealthStatus, Person};
pub use rng::SimRng;
#[cfg(feature = "async")]
pub use shared::SharedSimulation;
pub use sim::Simulation;
pub use tick::TickCoordinator;
pub use vehicle::{PartyReport, RationLevel, TravelPace, Vehicle, VehicleStatus};
