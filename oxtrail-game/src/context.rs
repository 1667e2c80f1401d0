//! Session state shared by every mode: entities, catalogs, config and the RNG.
use crate::catalog::ItemCatalog;
use crate::config::SimConfig;
use crate::constants::{LEADER_DEATH_EVENT, LOG_TARGET_PARTY};
use crate::director::{EventDirector, EventReport};
use crate::error::SimResult;
use crate::event::{EventCategory, EventTarget, leader_death_descriptor};
use crate::item::ItemCategory;
use crate::rng::SimRng;
use crate::vehicle::{PartyReport, Vehicle, VehicleStatus};

/// How a session finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ending {
    /// The wagon reached the end of the trail.
    Arrived,
    /// Every passenger died.
    PartyLost,
    /// The leader died; carries the leader-death event report.
    LeaderDied(EventReport),
}

impl Ending {
    #[must_use]
    pub const fn is_victory(&self) -> bool {
        matches!(self, Self::Arrived)
    }
}

/// Everything that happened on one simulated day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayOutcome {
    pub day: u32,
    pub party: PartyReport,
    pub travelled: u32,
    pub skipped: bool,
    pub rested: bool,
    /// Reports in the order the events fired.
    pub events: Vec<EventReport>,
    pub ending: Option<Ending>,
}

#[derive(Debug)]
pub struct GameContext {
    pub vehicle: Vehicle,
    pub director: EventDirector,
    pub catalog: ItemCatalog,
    pub config: SimConfig,
    pub rng: SimRng,
    /// Days elapsed since departure.
    pub day: u32,
    /// Queued rest days; time flows while stopped until this reaches zero.
    pub rest_days: u32,
    /// Set when the player quits or acknowledges the end of the game.
    pub closed: bool,
    pub ending: Option<Ending>,
}

impl GameContext {
    /// Assemble a context. A leader-death event is registered when the
    /// director does not provide one.
    ///
    /// # Errors
    ///
    /// Returns an error when the config is invalid.
    pub fn new(
        config: SimConfig,
        catalog: ItemCatalog,
        mut director: EventDirector,
        rng: SimRng,
    ) -> SimResult<Self> {
        config.validate()?;
        if !director.contains(LEADER_DEATH_EVENT) {
            director.register(leader_death_descriptor())?;
        }
        let vehicle = Vehicle::new(&catalog, config.starting_cash_cents);
        Ok(Self {
            vehicle,
            director,
            catalog,
            config,
            rng,
            day: 0,
            rest_days: 0,
            closed: false,
            ending: None,
        })
    }

    #[must_use]
    pub const fn is_resting(&self) -> bool {
        self.rest_days > 0
    }

    /// Stop the wagon and let `days` pass without travel.
    pub fn start_rest(&mut self, days: u32) {
        if self.vehicle.status() == VehicleStatus::Moving {
            self.vehicle.set_status(VehicleStatus::Stopped);
        }
        self.rest_days = days;
    }

    /// Simulate one day: passenger upkeep, person events, travel with its
    /// vehicle event, then end-of-game checks.
    ///
    /// # Errors
    ///
    /// Propagates director invariant violations.
    pub fn advance_day(&mut self) -> SimResult<DayOutcome> {
        self.day = self.day.saturating_add(1);
        let rested = self.rest_days > 0;
        if rested {
            self.rest_days -= 1;
        }
        let skipped = self.vehicle.take_skip_day();
        let party = self.vehicle.tick_passengers(rested, &mut self.rng);

        let mut events = Vec::new();
        for index in 0..self.vehicle.passengers().len() {
            let Some(person) = self.vehicle.passenger_mut(index) else {
                continue;
            };
            if !person.is_alive() {
                continue;
            }
            if let Some(report) = self.director.trigger_event_by_type(
                EventTarget::Person(person),
                EventCategory::Person,
                &mut self.rng,
            )? {
                events.push(report);
            }
        }

        let mut travelled = 0;
        if self.vehicle.status() == VehicleStatus::Moving && !skipped {
            if self.vehicle.quantity(ItemCategory::Animal) == 0 {
                log::info!(target: LOG_TARGET_PARTY, "no oxen left to pull the wagon");
                self.vehicle.set_status(VehicleStatus::Stopped);
            } else {
                self.vehicle.roll_mileage(&self.config, &mut self.rng);
                if let Some(report) = self.director.trigger_event_by_type(
                    EventTarget::Vehicle(&mut self.vehicle),
                    EventCategory::Vehicle,
                    &mut self.rng,
                )? {
                    events.push(report);
                }
                travelled = self.vehicle.commit_mileage(self.config.min_daily_mileage);
            }
        }

        let ending = self.check_ending()?;
        log::debug!(
            target: LOG_TARGET_PARTY,
            "day {}: travelled {travelled}, odometer {}, food {}, living {}, events {}",
            self.day,
            self.vehicle.odometer(),
            self.vehicle.quantity(ItemCategory::Food),
            self.vehicle.living_count(),
            events.len()
        );
        self.ending.clone_from(&ending);
        Ok(DayOutcome {
            day: self.day,
            party,
            travelled,
            skipped,
            rested,
            events,
            ending,
        })
    }

    fn check_ending(&mut self) -> SimResult<Option<Ending>> {
        if let Some(index) = self.vehicle.dead_leader_index()
            && let Some(leader) = self.vehicle.passenger_mut(index)
        {
            let report = self.director.trigger_event(
                LEADER_DEATH_EVENT,
                EventTarget::Person(leader),
                &mut self.rng,
            )?;
            log::info!(target: LOG_TARGET_PARTY, "the leader has died on day {}", self.day);
            return Ok(Some(Ending::LeaderDied(report)));
        }
        if self.vehicle.all_dead() {
            log::info!(target: LOG_TARGET_PARTY, "the whole party has died on day {}", self.day);
            return Ok(Some(Ending::PartyLost));
        }
        if self.vehicle.odometer() >= self.config.trail_length {
            log::info!(
                target: LOG_TARGET_PARTY,
                "arrived after {} days and {} miles",
                self.day,
                self.vehicle.odometer()
            );
            return Ok(Some(Ending::Arrived));
        }
        Ok(None)
    }
}

/// Context with the bundled catalogs and an all-zero RNG.
#[cfg(test)]
pub(crate) fn test_context() -> GameContext {
    use rand::rngs::mock::StepRng;

    GameContext::new(
        SimConfig::default(),
        ItemCatalog::bundled().unwrap(),
        EventDirector::new(),
        SimRng::from_rng(StepRng::new(0, 0)),
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventDescriptor, EventEffect, ExecutionMode, TemplatedEvent};
    use crate::person::Person;

    fn stocked(ctx: &mut GameContext) {
        ctx.vehicle.board(Person::new("Ada", true)).unwrap();
        ctx.vehicle.board(Person::new("Ben", false)).unwrap();
        for (category, amount) in [(ItemCategory::Food, 500), (ItemCategory::Animal, 6), (ItemCategory::Clothes, 4)] {
            let item = ctx.vehicle.item(category).unwrap().transaction(amount);
            ctx.vehicle.add_item(&item);
        }
    }

    #[test]
    fn stopped_wagons_do_not_move() {
        let mut ctx = test_context();
        stocked(&mut ctx);
        let outcome = ctx.advance_day().unwrap();
        assert_eq!(outcome.travelled, 0);
        assert_eq!(outcome.day, 1);
        assert_eq!(ctx.vehicle.odometer(), 0);
        assert!(outcome.party.fed);
    }

    #[test]
    fn moving_wagons_cover_at_least_the_minimum() {
        let mut ctx = test_context();
        stocked(&mut ctx);
        ctx.vehicle.set_status(VehicleStatus::Moving);
        let outcome = ctx.advance_day().unwrap();
        assert!(outcome.travelled >= 10);
        assert_eq!(ctx.vehicle.odometer(), outcome.travelled);
    }

    #[test]
    fn skip_days_hold_the_wagon() {
        let mut ctx = test_context();
        stocked(&mut ctx);
        ctx.vehicle.set_status(VehicleStatus::Moving);
        ctx.vehicle.skip_days(1);
        let outcome = ctx.advance_day().unwrap();
        assert!(outcome.skipped);
        assert_eq!(outcome.travelled, 0);
        assert!(ctx.advance_day().unwrap().travelled > 0);
    }

    #[test]
    fn no_oxen_stops_the_wagon() {
        let mut ctx = test_context();
        ctx.vehicle.board(Person::new("Ada", true)).unwrap();
        ctx.vehicle.set_status(VehicleStatus::Moving);
        ctx.advance_day().unwrap();
        assert_eq!(ctx.vehicle.status(), VehicleStatus::Stopped);
    }

    #[test]
    fn dead_leader_ends_the_game() {
        let mut ctx = test_context();
        stocked(&mut ctx);
        ctx.vehicle.passenger_mut(0).unwrap().kill();
        let outcome = ctx.advance_day().unwrap();
        let Some(Ending::LeaderDied(report)) = &outcome.ending else {
            panic!("expected leader death, got {:?}", outcome.ending);
        };
        assert_eq!(report.event_id, LEADER_DEATH_EVENT);
        assert!(report.text.contains("Ada"));
    }

    #[test]
    fn person_events_target_each_living_passenger() {
        let mut ctx = test_context();
        stocked(&mut ctx);
        ctx.director
            .register(EventDescriptor::new(
                "fever",
                EventCategory::Person,
                ExecutionMode::Automatic,
                1,
                TemplatedEvent::new("fever", EventEffect::Infect, "{person} has a fever.", None),
            ))
            .unwrap();
        let outcome = ctx.advance_day().unwrap();
        let texts: Vec<&str> = outcome.events.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["Ada has a fever.", "Ben has a fever."]);
    }

    #[test]
    fn arrival_is_detected() {
        let mut ctx = test_context();
        stocked(&mut ctx);
        ctx.config.trail_length = 5;
        ctx.vehicle.set_status(VehicleStatus::Moving);
        let outcome = ctx.advance_day().unwrap();
        assert_eq!(outcome.ending, Some(Ending::Arrived));
        assert!(ctx.ending.as_ref().is_some_and(Ending::is_victory));
    }
}
