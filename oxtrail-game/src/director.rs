//! Random event director: weighted selection and execution of registered events.
use rand::RngCore;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::constants::LOG_TARGET_DIRECTOR;
use crate::error::{SimError, SimResult};
use crate::event::{
    EventCategory, EventDescriptor, EventEffect, EventOutcome, EventTarget, ExecutionMode,
    TargetKind, TemplatedEvent,
};
use crate::rng::{roll_chance, weighted_index};

const DEFAULT_EVENTS_DATA: &str = include_str!("../data/events.json");

const fn default_weight() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
struct EventTable {
    #[serde(default)]
    chances: BTreeMap<EventCategory, f64>,
    #[serde(default)]
    events: Vec<EventRow>,
}

/// One row of the event table.
#[derive(Debug, Clone, Deserialize)]
pub struct EventRow {
    pub id: String,
    pub category: EventCategory,
    #[serde(default)]
    pub execution: ExecutionMode,
    #[serde(default = "default_weight")]
    pub weight: u32,
    pub effect: EventEffect,
    pub text: String,
    #[serde(default)]
    pub empty_text: Option<String>,
    /// Shown instead of `text` when a spare part absorbed a breakdown.
    #[serde(default)]
    pub spare_text: Option<String>,
}

impl EventRow {
    /// Build a descriptor backed by a [`TemplatedEvent`].
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Catalog`] for effects with impossible parameters.
    pub fn into_descriptor(self) -> SimResult<EventDescriptor> {
        self.effect.validate(&self.id)?;
        let mut handler =
            TemplatedEvent::new(self.id.clone(), self.effect, self.text, self.empty_text);
        if let Some(spare_text) = self.spare_text {
            handler = handler.with_spare_text(spare_text);
        }
        Ok(EventDescriptor::new(
            self.id,
            self.category,
            self.execution,
            self.weight,
            handler,
        ))
    }
}

/// Result of one executed event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventReport {
    pub event_id: String,
    pub category: EventCategory,
    pub text: String,
    pub outcome: EventOutcome,
}

#[derive(Debug, Default)]
pub struct EventDirector {
    events: Vec<EventDescriptor>,
    chances: BTreeMap<EventCategory, f64>,
}

impl EventDirector {
    /// Empty director; every category fires on each request until a chance is set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Director loaded with the bundled event table.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled data is corrupt.
    pub fn bundled() -> SimResult<Self> {
        Self::from_json(DEFAULT_EVENTS_DATA)
    }

    /// Load an event table.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON, invalid rows, duplicate ids or
    /// chances outside `[0, 1]`.
    pub fn from_json(json: &str) -> SimResult<Self> {
        let table: EventTable = serde_json::from_str(json).map_err(|source| SimError::Parse {
            what: "event table",
            source,
        })?;
        let mut director = Self::new();
        for (category, chance) in table.chances {
            director.set_chance(category, chance)?;
        }
        for row in table.events {
            director.register(row.into_descriptor()?)?;
        }
        Ok(director)
    }

    /// Add an event.
    ///
    /// # Errors
    ///
    /// Rejects duplicate ids and person/vehicle events whose handler targets
    /// the other entity kind.
    pub fn register(&mut self, descriptor: EventDescriptor) -> SimResult<()> {
        if self.contains(&descriptor.id) {
            return Err(SimError::DuplicateEvent(descriptor.id));
        }
        let expected = match descriptor.category {
            EventCategory::Vehicle => Some(TargetKind::Vehicle),
            EventCategory::Person => Some(TargetKind::Person),
            EventCategory::Special => None,
        };
        let actual = descriptor.handler.target_kind();
        if let Some(expected) = expected
            && expected != actual
        {
            return Err(SimError::Catalog(format!(
                "{} event `{}` must target a {expected}, not a {actual}",
                descriptor.category, descriptor.id
            )));
        }
        log::debug!(
            target: LOG_TARGET_DIRECTOR,
            "registered {} event `{}` (weight {})",
            descriptor.category,
            descriptor.id,
            descriptor.weight
        );
        self.events.push(descriptor);
        Ok(())
    }

    /// Probability that a category request fires at all.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `chance` is outside `[0, 1]`.
    pub fn set_chance(&mut self, category: EventCategory, chance: f64) -> SimResult<()> {
        if !(0.0..=1.0).contains(&chance) {
            return Err(crate::config::ConfigError::RangeViolation {
                field: "event chance",
                min: 0.0,
                max: 1.0,
                value: chance,
            }
            .into());
        }
        self.chances.insert(category, chance);
        Ok(())
    }

    #[must_use]
    pub fn chance(&self, category: EventCategory) -> f64 {
        self.chances.get(&category).copied().unwrap_or(1.0)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.events.iter().any(|event| event.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Automatic events of `category` with a positive weight, in registration order.
    pub fn eligible(&self, category: EventCategory) -> impl Iterator<Item = &EventDescriptor> {
        self.events.iter().filter(move |event| {
            event.category == category
                && event.execution == ExecutionMode::Automatic
                && event.weight > 0
        })
    }

    /// Roll the category chance and, on success, run one weighted pick of its
    /// automatic events against `target`.
    ///
    /// # Errors
    ///
    /// Propagates handler invariant violations, including a target of the
    /// wrong kind.
    pub fn trigger_event_by_type(
        &self,
        mut target: EventTarget<'_>,
        category: EventCategory,
        rng: &mut dyn RngCore,
    ) -> SimResult<Option<EventReport>> {
        let candidates: Vec<&EventDescriptor> = self.eligible(category).collect();
        if candidates.is_empty() {
            return Ok(None);
        }
        let chance = self.chance(category);
        if !roll_chance(rng, chance) {
            return Ok(None);
        }
        let weights: Vec<u32> = candidates.iter().map(|event| event.weight).collect();
        let Some(index) = weighted_index(&weights, rng) else {
            return Ok(None);
        };
        let chosen = candidates[index];
        log::debug!(
            target: LOG_TARGET_DIRECTOR,
            "picked {category} event `{}` ({} candidates, chance {chance})",
            chosen.id,
            candidates.len()
        );
        execute(chosen, &mut target, rng).map(Some)
    }

    /// Run a specific event by id, manual or automatic.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownEvent`] for unregistered ids and propagates
    /// handler invariant violations.
    pub fn trigger_event(
        &self,
        id: &str,
        mut target: EventTarget<'_>,
        rng: &mut dyn RngCore,
    ) -> SimResult<EventReport> {
        let descriptor = self
            .events
            .iter()
            .find(|event| event.id == id)
            .ok_or_else(|| SimError::UnknownEvent(id.to_string()))?;
        log::debug!(target: LOG_TARGET_DIRECTOR, "triggering `{id}` by id");
        execute(descriptor, &mut target, rng)
    }
}

fn execute(
    descriptor: &EventDescriptor,
    target: &mut EventTarget<'_>,
    rng: &mut dyn RngCore,
) -> SimResult<EventReport> {
    let expected = descriptor.handler.target_kind();
    let actual = target.kind();
    if expected != actual {
        return Err(SimError::WrongTarget {
            event: descriptor.id.clone(),
            expected,
            actual,
        });
    }
    let outcome = descriptor.handler.execute(target, rng)?;
    let text = descriptor.handler.render(&outcome);
    Ok(EventReport {
        event_id: descriptor.id.clone(),
        category: descriptor.category,
        text,
        outcome,
    })
}
