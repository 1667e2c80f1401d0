//! Party members and their health ladder.
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    AILMENT_RECOVER_CHANCE, AILMENT_RECOVER_CHANCE_RESTING, AILMENT_WORSEN_CHANCE,
    EXPOSURE_DAMAGE_CHANCE, GRUELING_DAMAGE_CHANCE, RECOVERY_CHANCE, RECOVERY_CHANCE_RESTING,
    STARVATION_DAMAGE_CHANCE,
};
use crate::rng::roll_chance;
use crate::vehicle::{RationLevel, TravelPace};

/// Ordered health ladder. Declaration order is the enumeration order used to
/// break ties when averaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Dead,
    VeryPoor,
    Poor,
    Fair,
    Good,
}

impl HealthStatus {
    pub const ALL: [Self; 5] = [
        Self::Dead,
        Self::VeryPoor,
        Self::Poor,
        Self::Fair,
        Self::Good,
    ];

    /// Scalar used for averaging.
    #[must_use]
    pub const fn level(self) -> u32 {
        match self {
            Self::Dead => 0,
            Self::VeryPoor => 200,
            Self::Poor => 300,
            Self::Fair => 400,
            Self::Good => 500,
        }
    }

    /// Nearest defined level to `value`; ties go to the earlier variant.
    #[must_use]
    pub fn nearest(value: f64) -> Self {
        let mut best = Self::Dead;
        let mut best_distance = f64::INFINITY;
        for status in Self::ALL {
            let distance = (f64::from(status.level()) - value).abs();
            if distance < best_distance {
                best = status;
                best_distance = distance;
            }
        }
        best
    }

    /// One step down the ladder.
    #[must_use]
    pub const fn worse(self) -> Self {
        match self {
            Self::Good => Self::Fair,
            Self::Fair => Self::Poor,
            Self::Poor => Self::VeryPoor,
            Self::VeryPoor | Self::Dead => Self::Dead,
        }
    }

    /// One step up the ladder; the dead stay dead.
    #[must_use]
    pub const fn better(self) -> Self {
        match self {
            Self::Dead => Self::Dead,
            Self::VeryPoor => Self::Poor,
            Self::Poor => Self::Fair,
            Self::Fair | Self::Good => Self::Good,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dead => "dead",
            Self::VeryPoor => "very poor",
            Self::Poor => "poor",
            Self::Fair => "fair",
            Self::Good => "good",
        }
    }
}

/// Conditions shared by every passenger for one simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayConditions {
    pub fed: bool,
    pub clothed: bool,
    pub resting: bool,
    pub ration: RationLevel,
    pub pace: TravelPace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    health: HealthStatus,
    leader: bool,
    infected: bool,
    injured: bool,
}

impl Person {
    #[must_use]
    pub fn new(name: impl Into<String>, leader: bool) -> Self {
        Self {
            name: name.into(),
            health: HealthStatus::Good,
            leader,
            infected: false,
            injured: false,
        }
    }

    #[must_use]
    pub const fn health(&self) -> HealthStatus {
        self.health
    }

    #[must_use]
    pub const fn is_leader(&self) -> bool {
        self.leader
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health != HealthStatus::Dead
    }

    #[must_use]
    pub const fn is_infected(&self) -> bool {
        self.infected
    }

    #[must_use]
    pub const fn is_injured(&self) -> bool {
        self.injured
    }

    /// Set health directly. Ignored once the person is dead.
    pub fn set_health(&mut self, health: HealthStatus) {
        if !self.is_alive() {
            return;
        }
        self.health = health;
        if health == HealthStatus::Dead {
            self.infected = false;
            self.injured = false;
        }
    }

    /// Drop one level. Returns `true` if this killed the person.
    pub fn damage(&mut self) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.set_health(self.health.worse());
        !self.is_alive()
    }

    pub fn heal(&mut self) {
        self.set_health(self.health.better());
    }

    pub fn kill(&mut self) {
        self.set_health(HealthStatus::Dead);
    }

    /// Returns `false` when the person was already infected or is dead.
    pub fn infect(&mut self) -> bool {
        if !self.is_alive() || self.infected {
            return false;
        }
        self.infected = true;
        true
    }

    /// Returns `false` when the person was already injured or is dead.
    pub fn injure(&mut self) -> bool {
        if !self.is_alive() || self.injured {
            return false;
        }
        self.injured = true;
        true
    }

    /// Apply one day of hunger, ailments, exertion and recovery.
    pub fn tick<R: Rng + ?Sized>(&mut self, conditions: &DayConditions, rng: &mut R) {
        if !self.is_alive() {
            return;
        }

        let mut harmed = false;
        if !conditions.fed && roll_chance(rng, STARVATION_DAMAGE_CHANCE) {
            harmed = true;
        }
        if self.infected || self.injured {
            let recover = if conditions.resting {
                AILMENT_RECOVER_CHANCE_RESTING
            } else {
                AILMENT_RECOVER_CHANCE
            };
            if roll_chance(rng, recover) {
                self.infected = false;
                self.injured = false;
            } else if roll_chance(rng, AILMENT_WORSEN_CHANCE) {
                harmed = true;
            }
        }
        if conditions.pace == TravelPace::Grueling
            && !conditions.resting
            && roll_chance(rng, GRUELING_DAMAGE_CHANCE)
        {
            harmed = true;
        }
        if !conditions.clothed && roll_chance(rng, EXPOSURE_DAMAGE_CHANCE) {
            harmed = true;
        }

        if harmed {
            self.damage();
            return;
        }

        let well_fed = conditions.fed && conditions.ration != RationLevel::BareBones;
        let recovery = if conditions.resting {
            RECOVERY_CHANCE_RESTING
        } else {
            RECOVERY_CHANCE
        };
        if well_fed && !self.infected && !self.injured && roll_chance(rng, recovery) {
            self.heal();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn conditions() -> DayConditions {
        DayConditions {
            fed: true,
            clothed: true,
            resting: false,
            ration: RationLevel::Filling,
            pace: TravelPace::Steady,
        }
    }

    #[test]
    fn nearest_rounds_and_breaks_ties_downward() {
        assert_eq!(HealthStatus::nearest(500.0), HealthStatus::Good);
        assert_eq!(HealthStatus::nearest(430.0), HealthStatus::Fair);
        assert_eq!(HealthStatus::nearest(450.0), HealthStatus::Fair);
        assert_eq!(HealthStatus::nearest(251.0), HealthStatus::Poor);
        assert_eq!(HealthStatus::nearest(90.0), HealthStatus::Dead);
        assert_eq!(HealthStatus::nearest(100.0), HealthStatus::Dead);
    }

    #[test]
    fn health_orders_from_dead_to_good() {
        let mut sorted = HealthStatus::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, HealthStatus::ALL.to_vec());
        assert!(HealthStatus::Dead < HealthStatus::VeryPoor);
    }

    #[test]
    fn the_dead_are_never_resurrected() {
        let mut person = Person::new("Ezra", false);
        person.kill();
        person.heal();
        person.set_health(HealthStatus::Good);
        assert_eq!(person.health(), HealthStatus::Dead);
        assert!(!person.infect());
        assert!(!person.injure());
    }

    #[test]
    fn damage_reports_death_once() {
        let mut person = Person::new("Ada", true);
        person.set_health(HealthStatus::VeryPoor);
        person.injure();
        assert!(person.damage());
        assert!(!person.is_injured());
        assert!(!person.damage());
    }

    #[test]
    fn starving_passengers_lose_health() {
        let mut person = Person::new("Mae", false);
        let mut rng = StepRng::new(0, 0);
        let hungry = DayConditions {
            fed: false,
            ..conditions()
        };
        person.tick(&hungry, &mut rng);
        assert_eq!(person.health(), HealthStatus::Fair);
    }

    #[test]
    fn fed_passengers_recover() {
        let mut person = Person::new("Mae", false);
        person.set_health(HealthStatus::Poor);
        let mut rng = StepRng::new(0, 0);
        person.tick(&conditions(), &mut rng);
        assert_eq!(person.health(), HealthStatus::Fair);
    }

    #[test]
    fn ailments_clear_on_recovery_roll() {
        let mut person = Person::new("Mae", false);
        person.infect();
        let mut rng = StepRng::new(0, 0);
        person.tick(&conditions(), &mut rng);
        assert!(!person.is_infected());
        assert_eq!(person.health(), HealthStatus::Good);
    }
}
