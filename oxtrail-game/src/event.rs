//! Event descriptors, the handler seam and the data-driven effect catalog.
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::LEADER_DEATH_EVENT;
use crate::error::{SimError, SimResult};
use crate::item::{Item, ItemCategory, ItemList};
use crate::person::Person;
use crate::vehicle::Vehicle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Vehicle,
    Person,
    /// Story beats fired by id only.
    Special,
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vehicle => "vehicle",
            Self::Person => "person",
            Self::Special => "special",
        })
    }
}

/// Automatic events take part in random selection; manual ones are only
/// reachable by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    #[default]
    Automatic,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Vehicle,
    Person,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vehicle => "vehicle",
            Self::Person => "person",
        })
    }
}

/// The entity an event mutates.
#[derive(Debug)]
pub enum EventTarget<'a> {
    Vehicle(&'a mut Vehicle),
    Person(&'a mut Person),
}

impl EventTarget<'_> {
    #[must_use]
    pub const fn kind(&self) -> TargetKind {
        match self {
            Self::Vehicle(_) => TargetKind::Vehicle,
            Self::Person(_) => TargetKind::Person,
        }
    }
}

/// What an execution actually changed, consumed by `render`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventOutcome {
    pub person: Option<String>,
    pub items: ItemList,
    pub miles: u32,
    pub days: u32,
    pub part: Option<ItemCategory>,
    pub spare_used: bool,
    /// False when the event fizzled (nothing to destroy, nobody to hurt).
    pub applied: bool,
}

/// Behaviour behind an event descriptor.
pub trait EventHandler: Send + Sync {
    /// Entity kind `execute` expects.
    fn target_kind(&self) -> TargetKind;

    /// Mutate the target.
    ///
    /// # Errors
    ///
    /// Invariant violations must be reported before any mutation happens.
    fn execute(
        &self,
        target: &mut EventTarget<'_>,
        rng: &mut dyn RngCore,
    ) -> SimResult<EventOutcome>;

    /// User-facing text for a finished execution.
    fn render(&self, outcome: &EventOutcome) -> String;
}

pub struct EventDescriptor {
    pub id: String,
    pub category: EventCategory,
    pub execution: ExecutionMode,
    pub weight: u32,
    pub handler: Box<dyn EventHandler>,
}

impl EventDescriptor {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        category: EventCategory,
        execution: ExecutionMode,
        weight: u32,
        handler: impl EventHandler + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            execution,
            weight,
            handler: Box::new(handler),
        }
    }
}

impl fmt::Debug for EventDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDescriptor")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("execution", &self.execution)
            .field("weight", &self.weight)
            .field("target", &self.handler.target_kind())
            .finish_non_exhaustive()
    }
}

// Prefab effects ---------------------------------------------------------------

/// Shorten today's trip by a random amount in `min..=max`.
pub fn reduce_mileage(vehicle: &mut Vehicle, min: u32, max: u32, rng: &mut dyn RngCore) -> EventOutcome {
    let amount = rng.gen_range(min..=max.max(min));
    let before = vehicle.mileage();
    vehicle.reduce_mileage(amount);
    let lost = u32::try_from(before.saturating_sub(vehicle.mileage())).unwrap_or(0);
    EventOutcome {
        miles: lost,
        applied: lost > 0,
        ..EventOutcome::default()
    }
}

pub fn skip_days(vehicle: &mut Vehicle, days: u32) -> EventOutcome {
    vehicle.skip_days(days);
    EventOutcome {
        days,
        applied: days > 0,
        ..EventOutcome::default()
    }
}

pub fn destroy_items(vehicle: &mut Vehicle, rng: &mut dyn RngCore) -> EventOutcome {
    let items = vehicle.destroy_random_items(rng);
    EventOutcome {
        applied: !items.is_empty(),
        items,
        ..EventOutcome::default()
    }
}

pub fn create_items(vehicle: &mut Vehicle, rng: &mut dyn RngCore) -> EventOutcome {
    let items = vehicle.create_random_items(rng);
    EventOutcome {
        applied: !items.is_empty(),
        items,
        ..EventOutcome::default()
    }
}

/// Lose up to `max` units of one category.
pub fn lose_item(
    vehicle: &mut Vehicle,
    category: ItemCategory,
    max: u32,
    rng: &mut dyn RngCore,
) -> EventOutcome {
    let Some(item) = vehicle.item(category).cloned() else {
        return EventOutcome::default();
    };
    let amount = rng.gen_range(1..=max.max(1));
    let removed = vehicle.remove_item(&item.transaction(amount));
    let mut items = ItemList::new();
    if removed > 0 {
        items.push(item.transaction(removed));
    }
    EventOutcome {
        applied: removed > 0,
        items,
        ..EventOutcome::default()
    }
}

/// Snap a part, picking a random spare-part category when none is given.
pub fn break_part(
    vehicle: &mut Vehicle,
    part: Option<ItemCategory>,
    rng: &mut dyn RngCore,
) -> EventOutcome {
    let part = part.unwrap_or_else(|| {
        let spares = ItemCategory::SPARE_PARTS;
        spares[rng.gen_range(0..spares.len())]
    });
    let spare_used = vehicle.break_part(part);
    EventOutcome {
        part: Some(part),
        spare_used,
        applied: true,
        ..EventOutcome::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ailment {
    Injury,
    Infection,
}

/// Afflict one person. Fizzles if they already suffer from it or are dead.
pub fn afflict(person: &mut Person, ailment: Ailment) -> EventOutcome {
    let applied = match ailment {
        Ailment::Injury => person.injure(),
        Ailment::Infection => person.infect(),
    };
    EventOutcome {
        person: Some(person.name.clone()),
        applied,
        ..EventOutcome::default()
    }
}

/// Afflict a random living passenger.
pub fn afflict_passenger(vehicle: &mut Vehicle, ailment: Ailment, rng: &mut dyn RngCore) -> EventOutcome {
    let living: Vec<usize> = vehicle
        .passengers()
        .iter()
        .enumerate()
        .filter(|(_, person)| person.is_alive())
        .map(|(index, _)| index)
        .collect();
    if living.is_empty() {
        return EventOutcome::default();
    }
    let pick = living[rng.gen_range(0..living.len())];
    vehicle
        .passenger_mut(pick)
        .map_or_else(EventOutcome::default, |person| afflict(person, ailment))
}

pub fn kill(person: &mut Person) -> EventOutcome {
    let applied = person.is_alive();
    person.kill();
    EventOutcome {
        person: Some(person.name.clone()),
        applied,
        ..EventOutcome::default()
    }
}

/// Mark the leader's death. Refuses to touch anyone else.
///
/// # Errors
///
/// Returns [`SimError::NotLeader`] when `person` is not the party leader.
pub fn leader_death(person: &mut Person, event: &str) -> SimResult<EventOutcome> {
    if !person.is_leader() {
        return Err(SimError::NotLeader {
            event: event.to_string(),
            person: person.name.clone(),
        });
    }
    Ok(kill(person))
}

// Data-driven handler ----------------------------------------------------------

/// Effect a table row applies, tagged by `type` in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventEffect {
    ReduceMileage { min: u32, max: u32 },
    SkipDays { days: u32 },
    DestroyItems,
    CreateItems,
    LoseItem { category: ItemCategory, max: u32 },
    BreakPart {
        #[serde(default)]
        part: Option<ItemCategory>,
    },
    InjurePassenger,
    InfectPassenger,
    Injure,
    Infect,
    Kill,
    LeaderDeath,
    Nothing,
}

impl EventEffect {
    #[must_use]
    pub const fn target_kind(&self) -> TargetKind {
        match self {
            Self::Injure | Self::Infect | Self::Kill | Self::LeaderDeath => TargetKind::Person,
            _ => TargetKind::Vehicle,
        }
    }

    /// Reject parameter combinations that could never apply.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Catalog`] describing the problem.
    pub fn validate(&self, id: &str) -> SimResult<()> {
        match self {
            Self::ReduceMileage { min, max } if min > max => Err(SimError::Catalog(format!(
                "event `{id}` reduces mileage by {min}..={max}"
            ))),
            Self::LoseItem { category, max } if !category.is_tradeable() || *max == 0 => {
                Err(SimError::Catalog(format!(
                    "event `{id}` cannot lose {max} {category}"
                )))
            }
            Self::BreakPart {
                part: Some(part), ..
            } if !part.is_spare_part() => Err(SimError::Catalog(format!(
                "event `{id}` breaks {part}, which is not a wagon part"
            ))),
            _ => Ok(()),
        }
    }
}

/// Table-driven handler: one effect plus text templates.
///
/// Templates accept `{person}`, `{items}`, `{miles}`, `{days}` and `{part}`.
/// `empty_text` is shown instead of `text` when the effect fizzled, and
/// `spare_text` when a breakdown was fixed on the spot with a spare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatedEvent {
    id: String,
    effect: EventEffect,
    text: String,
    empty_text: Option<String>,
    spare_text: Option<String>,
}

impl TemplatedEvent {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        effect: EventEffect,
        text: impl Into<String>,
        empty_text: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            effect,
            text: text.into(),
            empty_text,
            spare_text: None,
        }
    }

    #[must_use]
    pub fn with_spare_text(mut self, spare_text: impl Into<String>) -> Self {
        self.spare_text = Some(spare_text.into());
        self
    }
}

impl EventHandler for TemplatedEvent {
    fn target_kind(&self) -> TargetKind {
        self.effect.target_kind()
    }

    fn execute(
        &self,
        target: &mut EventTarget<'_>,
        rng: &mut dyn RngCore,
    ) -> SimResult<EventOutcome> {
        let expected = self.target_kind();
        let actual = target.kind();
        let wrong_target = || SimError::WrongTarget {
            event: self.id.clone(),
            expected,
            actual,
        };
        match target {
            EventTarget::Vehicle(vehicle) => match &self.effect {
                EventEffect::ReduceMileage { min, max } => {
                    Ok(reduce_mileage(vehicle, *min, *max, rng))
                }
                EventEffect::SkipDays { days } => Ok(skip_days(vehicle, *days)),
                EventEffect::DestroyItems => Ok(destroy_items(vehicle, rng)),
                EventEffect::CreateItems => Ok(create_items(vehicle, rng)),
                EventEffect::LoseItem { category, max } => {
                    Ok(lose_item(vehicle, *category, *max, rng))
                }
                EventEffect::BreakPart { part } => Ok(break_part(vehicle, *part, rng)),
                EventEffect::InjurePassenger => {
                    Ok(afflict_passenger(vehicle, Ailment::Injury, rng))
                }
                EventEffect::InfectPassenger => {
                    Ok(afflict_passenger(vehicle, Ailment::Infection, rng))
                }
                EventEffect::Nothing => Ok(EventOutcome {
                    applied: true,
                    ..EventOutcome::default()
                }),
                EventEffect::Injure
                | EventEffect::Infect
                | EventEffect::Kill
                | EventEffect::LeaderDeath => Err(wrong_target()),
            },
            EventTarget::Person(person) => match &self.effect {
                EventEffect::Injure => Ok(afflict(person, Ailment::Injury)),
                EventEffect::Infect => Ok(afflict(person, Ailment::Infection)),
                EventEffect::Kill => Ok(kill(person)),
                EventEffect::LeaderDeath => leader_death(person, &self.id),
                _ => Err(wrong_target()),
            },
        }
    }

    fn render(&self, outcome: &EventOutcome) -> String {
        let template = match (&self.empty_text, &self.spare_text) {
            (Some(empty), _) if !outcome.applied => empty,
            (_, Some(spare)) if outcome.spare_used => spare,
            _ => &self.text,
        };
        fill_template(template, outcome)
    }
}

/// Human list of item deltas, e.g. `40 pounds of food and 2 oxen`.
#[must_use]
pub fn describe_items(items: &[Item]) -> String {
    let parts: Vec<String> = items.iter().map(describe_item).collect();
    match parts.as_slice() {
        [] => "nothing".to_string(),
        [only] => only.clone(),
        [rest @ .., last] => format!("{} and {last}", rest.join(", ")),
    }
}

fn describe_item(item: &Item) -> String {
    match item.category {
        ItemCategory::Food | ItemCategory::Clothes => format!(
            "{} {} of {}",
            item.quantity,
            item.category.unit_for(item.quantity),
            item.name.to_lowercase()
        ),
        _ => format!("{} {}", item.quantity, item.category.unit_for(item.quantity)),
    }
}

fn fill_template(template: &str, outcome: &EventOutcome) -> String {
    let part = outcome.part.map_or("part", ItemCategory::key);
    template
        .replace("{person}", outcome.person.as_deref().unwrap_or("someone"))
        .replace("{items}", &describe_items(&outcome.items))
        .replace("{miles}", &outcome.miles.to_string())
        .replace("{days}", &outcome.days.to_string())
        .replace("{part}", part)
}

/// Descriptor for the manual leader-death event used when no table supplies one.
#[must_use]
pub fn leader_death_descriptor() -> EventDescriptor {
    EventDescriptor::new(
        LEADER_DEATH_EVENT,
        EventCategory::Special,
        ExecutionMode::Manual,
        0,
        TemplatedEvent::new(
            LEADER_DEATH_EVENT,
            EventEffect::LeaderDeath,
            "{person}, who led the wagon, has died. Without a leader the party scatters.",
            None,
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemCatalog;
    use crate::vehicle::VehicleStatus;
    use rand::rngs::mock::StepRng;

    fn wagon() -> Vehicle {
        Vehicle::new(&ItemCatalog::bundled().unwrap(), 0)
    }

    #[test]
    fn person_effects_reject_vehicles_before_mutating() {
        let handler = TemplatedEvent::new("snakebite", EventEffect::Injure, "{person} was bitten", None);
        let mut vehicle = wagon();
        vehicle.board(Person::new("Ada", true)).unwrap();
        let mut rng = StepRng::new(0, 0);
        let err = handler
            .execute(&mut EventTarget::Vehicle(&mut vehicle), &mut rng)
            .unwrap_err();
        assert!(matches!(
            err,
            SimError::WrongTarget {
                expected: TargetKind::Person,
                actual: TargetKind::Vehicle,
                ..
            }
        ));
        assert!(!vehicle.passengers()[0].is_injured());
    }

    #[test]
    fn leader_death_refuses_followers() {
        let mut follower = Person::new("Ben", false);
        let err = leader_death(&mut follower, LEADER_DEATH_EVENT).unwrap_err();
        assert!(matches!(err, SimError::NotLeader { .. }));
        assert!(follower.is_alive());

        let mut leader = Person::new("Ada", true);
        let outcome = leader_death(&mut leader, LEADER_DEATH_EVENT).unwrap();
        assert!(outcome.applied);
        assert!(!leader.is_alive());
    }

    #[test]
    fn templates_fill_placeholders() {
        let handler = TemplatedEvent::new(
            "thief",
            EventEffect::LoseItem {
                category: ItemCategory::Food,
                max: 5,
            },
            "A thief made off with {items}.",
            Some("A thief found nothing worth taking.".into()),
        );
        let mut vehicle = wagon();
        let mut rng = StepRng::new(0, 0);
        let outcome = handler
            .execute(&mut EventTarget::Vehicle(&mut vehicle), &mut rng)
            .unwrap();
        assert_eq!(handler.render(&outcome), "A thief found nothing worth taking.");

        let food = vehicle.item(ItemCategory::Food).unwrap().transaction(20);
        vehicle.add_item(&food);
        let outcome = handler
            .execute(&mut EventTarget::Vehicle(&mut vehicle), &mut rng)
            .unwrap();
        assert_eq!(handler.render(&outcome), "A thief made off with 1 pound of food.");
    }

    #[test]
    fn mileage_loss_reports_only_what_was_lost() {
        let mut vehicle = wagon();
        let mut rng = StepRng::new(0, 0);
        let outcome = reduce_mileage(&mut vehicle, 5, 9, &mut rng);
        assert!(!outcome.applied);
        vehicle.set_status(VehicleStatus::Moving);
        let outcome = reduce_mileage(&mut vehicle, 5, 9, &mut rng);
        assert_eq!(outcome.miles, 0);
        assert!(!outcome.applied);
    }

    #[test]
    fn item_lists_read_naturally() {
        let catalog = ItemCatalog::bundled().unwrap();
        let food = catalog.get(ItemCategory::Food).unwrap().transaction(40);
        let oxen = catalog.get(ItemCategory::Animal).unwrap().transaction(2);
        let ammo = catalog.get(ItemCategory::Ammo).unwrap().transaction(30);
        assert_eq!(describe_items(&[]), "nothing");
        assert_eq!(
            describe_items(&[food, oxen, ammo]),
            "40 pounds of food, 2 oxen and 30 bullets"
        );
    }

    #[test]
    fn single_units_are_singular() {
        let catalog = ItemCatalog::bundled().unwrap();
        let ox = catalog.get(ItemCategory::Animal).unwrap().transaction(1);
        let clothes = catalog.get(ItemCategory::Clothes).unwrap().transaction(1);
        assert_eq!(describe_items(&[clothes, ox]), "1 set of clothing and 1 ox");
    }

    #[test]
    fn breakdowns_say_whether_a_spare_was_fitted() {
        let handler = TemplatedEvent::new(
            "snap",
            EventEffect::BreakPart {
                part: Some(ItemCategory::Axle),
            },
            "The {part} snaps.",
            None,
        )
        .with_spare_text("The {part} snaps, so you fit a spare.");
        let mut vehicle = wagon();
        let mut rng = StepRng::new(0, 0);
        let spare = vehicle.item(ItemCategory::Axle).unwrap().transaction(1);
        vehicle.add_item(&spare);

        let outcome = handler
            .execute(&mut EventTarget::Vehicle(&mut vehicle), &mut rng)
            .unwrap();
        assert!(outcome.spare_used);
        assert_eq!(handler.render(&outcome), "The axle snaps, so you fit a spare.");
        assert_eq!(vehicle.status(), VehicleStatus::Stopped);

        let outcome = handler
            .execute(&mut EventTarget::Vehicle(&mut vehicle), &mut rng)
            .unwrap();
        assert!(!outcome.spare_used);
        assert_eq!(handler.render(&outcome), "The axle snaps.");
        assert_eq!(vehicle.status(), VehicleStatus::Broken);
    }

    #[test]
    fn bad_rows_fail_validation() {
        let effect = EventEffect::ReduceMileage { min: 9, max: 2 };
        assert!(effect.validate("mud").is_err());
        let effect = EventEffect::LoseItem {
            category: ItemCategory::Cash,
            max: 3,
        };
        assert!(effect.validate("pickpocket").is_err());
        let effect = EventEffect::BreakPart {
            part: Some(ItemCategory::Food),
        };
        assert!(effect.validate("snap").is_err());
        assert!(EventEffect::Nothing.validate("calm").is_ok());
    }
}
