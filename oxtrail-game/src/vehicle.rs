//! The wagon: inventory, passengers and daily movement.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::ItemCatalog;
use crate::config::SimConfig;
use crate::constants::{
    LOG_TARGET_PARTY, PACE_FACTOR_GRUELING, PACE_FACTOR_STEADY, PACE_FACTOR_STRENUOUS,
    RATION_LBS_BARE_BONES, RATION_LBS_FILLING, RATION_LBS_MEAGER,
};
use crate::error::{SimError, SimResult};
use crate::item::{Item, ItemCategory, ItemList};
use crate::numbers::{cents_to_dollars, mean, round_f64_to_i32};
use crate::person::{DayConditions, HealthStatus, Person};
use crate::rng::{coin_flip, roll_chance};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    #[default]
    Stopped,
    Moving,
    Broken,
}

impl VehicleStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Moving => "moving",
            Self::Broken => "broken down",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TravelPace {
    #[default]
    Steady,
    Strenuous,
    Grueling,
}

impl TravelPace {
    pub const ALL: [Self; 3] = [Self::Steady, Self::Strenuous, Self::Grueling];

    #[must_use]
    pub const fn mileage_factor(self) -> f64 {
        match self {
            Self::Steady => PACE_FACTOR_STEADY,
            Self::Strenuous => PACE_FACTOR_STRENUOUS,
            Self::Grueling => PACE_FACTOR_GRUELING,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Steady => "steady",
            Self::Strenuous => "strenuous",
            Self::Grueling => "grueling",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RationLevel {
    #[default]
    Filling,
    Meager,
    BareBones,
}

impl RationLevel {
    pub const ALL: [Self; 3] = [Self::Filling, Self::Meager, Self::BareBones];

    /// Pounds of food one passenger eats per day.
    #[must_use]
    pub const fn pounds_per_person(self) -> u32 {
        match self {
            Self::Filling => RATION_LBS_FILLING,
            Self::Meager => RATION_LBS_MEAGER,
            Self::BareBones => RATION_LBS_BARE_BONES,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Filling => "filling",
            Self::Meager => "meager",
            Self::BareBones => "bare bones",
        }
    }
}

/// Summary of one day of passenger upkeep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartyReport {
    pub fed: bool,
    pub food_eaten: u32,
    pub deaths: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    inventory: BTreeMap<ItemCategory, Item>,
    passengers: Vec<Person>,
    pace: TravelPace,
    ration: RationLevel,
    odometer: u32,
    mileage: i32,
    status: VehicleStatus,
    broken_part: Option<ItemCategory>,
    skip_days: u32,
}

impl Vehicle {
    /// Stock a wagon with one entry per catalog category and the starting cash.
    #[must_use]
    pub fn new(catalog: &ItemCatalog, starting_cash_cents: i64) -> Self {
        let inventory: BTreeMap<ItemCategory, Item> = catalog
            .iter()
            .map(|item| (item.category, item.clone()))
            .collect();
        let mut vehicle = Self {
            inventory,
            passengers: Vec::new(),
            pace: TravelPace::default(),
            ration: RationLevel::default(),
            odometer: 0,
            mileage: 0,
            status: VehicleStatus::Stopped,
            broken_part: None,
            skip_days: 0,
        };
        if let Some(item) = vehicle.inventory.get_mut(&ItemCategory::Cash)
            && item.value_cents > 0
        {
            let units = starting_cash_cents.max(0) / item.value_cents;
            let units = u32::try_from(units).unwrap_or(u32::MAX);
            item.set_quantity(item.min_quantity.saturating_add(units));
        }
        vehicle
    }

    // Inventory ------------------------------------------------------------

    #[must_use]
    pub const fn inventory(&self) -> &BTreeMap<ItemCategory, Item> {
        &self.inventory
    }

    #[must_use]
    pub fn item(&self, category: ItemCategory) -> Option<&Item> {
        self.inventory.get(&category)
    }

    #[must_use]
    pub fn quantity(&self, category: ItemCategory) -> u32 {
        self.item(category).map_or(0, |item| item.quantity)
    }

    /// Cash on hand in cents. Always equal to the cash entry's total value.
    #[must_use]
    pub fn balance_cents(&self) -> i64 {
        self.item(ItemCategory::Cash)
            .map_or(0, Item::total_value_cents)
    }

    /// Cash that can actually be spent: units above the cash floor.
    #[must_use]
    pub fn spendable_cents(&self) -> i64 {
        self.item(ItemCategory::Cash).map_or(0, |cash| {
            cash.value_cents
                .saturating_mul(i64::from(cash.quantity.saturating_sub(cash.min_quantity)))
        })
    }

    /// Credit a transaction without payment, clamped to bounds. Returns the
    /// quantity actually added.
    pub fn add_item(&mut self, transaction: &Item) -> u32 {
        self.inventory
            .get_mut(&transaction.category)
            .map_or(0, |item| item.add_quantity(transaction.quantity))
    }

    /// Debit a transaction, clamped to bounds. Returns the quantity removed.
    pub fn remove_item(&mut self, transaction: &Item) -> u32 {
        self.inventory
            .get_mut(&transaction.category)
            .map_or(0, |item| item.remove_quantity(transaction.quantity))
    }

    /// Buy a transaction at its unit value. Only the quantity that fits is
    /// bought and charged. Returns `false` without touching anything when
    /// nothing fits or the balance cannot cover the cost.
    pub fn purchase(&mut self, transaction: &Item) -> bool {
        if !transaction.category.is_tradeable() {
            log::warn!(target: LOG_TARGET_PARTY, "cash cannot be purchased");
            return false;
        }
        let room = self.item(transaction.category).map_or(0, Item::room);
        let accepted = transaction.quantity.min(room);
        if accepted == 0 {
            return false;
        }
        let cost = transaction.transaction(accepted).total_value_cents();
        let Some(cash) = self.inventory.get_mut(&ItemCategory::Cash) else {
            return false;
        };
        let Some(cost_units) = cash_units_for(cost, cash.value_cents) else {
            return false;
        };
        if cash.quantity.saturating_sub(cash.min_quantity) < cost_units {
            return false;
        }
        cash.remove_quantity(cost_units);
        self.add_item(&transaction.transaction(accepted));
        log::debug!(
            target: LOG_TARGET_PARTY,
            "bought {accepted} {} for {cost} cents",
            transaction.category.unit()
        );
        true
    }

    /// Swap goods with a stranger. Rejected when the party cannot cover
    /// `give`.
    pub fn trade(&mut self, give: &Item, receive: &Item) -> bool {
        if give.category == receive.category
            || !give.category.is_tradeable()
            || !receive.category.is_tradeable()
        {
            return false;
        }
        if self.quantity(give.category) < give.quantity {
            return false;
        }
        self.remove_item(give);
        self.add_item(receive);
        true
    }

    /// Find abandoned goods: each tradeable category independently has a fair
    /// chance to gain `1..=max/4` units.
    pub fn create_random_items<R: Rng + ?Sized>(&mut self, rng: &mut R) -> ItemList {
        let snapshot: Vec<Item> = self.inventory.values().cloned().collect();
        let mut created = ItemList::new();
        for item in snapshot {
            if !item.category.is_tradeable() || !coin_flip(rng) {
                continue;
            }
            let upper = (item.max_quantity / 4).max(1);
            let amount = rng.gen_range(1..=upper);
            let applied = self.add_item(&item.transaction(amount));
            if applied > 0 {
                created.push(item.transaction(applied));
            }
        }
        created
    }

    /// Lose goods to a disaster: each stocked tradeable category independently
    /// has a fair chance to lose `1..=quantity` units.
    pub fn destroy_random_items<R: Rng + ?Sized>(&mut self, rng: &mut R) -> ItemList {
        let snapshot: Vec<Item> = self.inventory.values().cloned().collect();
        let mut destroyed = ItemList::new();
        for item in snapshot {
            if !item.category.is_tradeable() || item.quantity == 0 || !coin_flip(rng) {
                continue;
            }
            let amount = rng.gen_range(1..=item.quantity);
            let applied = self.remove_item(&item.transaction(amount));
            if applied > 0 {
                destroyed.push(item.transaction(applied));
            }
        }
        destroyed
    }

    // Passengers -----------------------------------------------------------

    #[must_use]
    pub fn passengers(&self) -> &[Person] {
        &self.passengers
    }

    pub fn passenger_mut(&mut self, index: usize) -> Option<&mut Person> {
        self.passengers.get_mut(index)
    }

    /// Add a passenger in boarding order.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DuplicateLeader`] when a second living leader boards.
    pub fn board(&mut self, person: Person) -> SimResult<()> {
        if person.is_leader() && self.leader().is_some_and(Person::is_alive) {
            return Err(SimError::DuplicateLeader(person.name));
        }
        self.passengers.push(person);
        Ok(())
    }

    #[must_use]
    pub fn leader(&self) -> Option<&Person> {
        self.passengers.iter().find(|person| person.is_leader())
    }

    /// Index of the leader when the leader has died.
    #[must_use]
    pub fn dead_leader_index(&self) -> Option<usize> {
        self.passengers
            .iter()
            .position(|person| person.is_leader() && !person.is_alive())
    }

    #[must_use]
    pub fn living_count(&self) -> usize {
        self.passengers
            .iter()
            .filter(|person| person.is_alive())
            .count()
    }

    /// True only for a non-empty party where everyone has died.
    #[must_use]
    pub fn all_dead(&self) -> bool {
        !self.passengers.is_empty() && self.passengers.iter().all(|person| !person.is_alive())
    }

    /// Mean health of the living, snapped to the nearest health level.
    #[must_use]
    pub fn average_health(&self) -> HealthStatus {
        let living: Vec<u64> = self
            .passengers
            .iter()
            .filter(|person| person.is_alive())
            .map(|person| u64::from(person.health().level()))
            .collect();
        mean(living.iter().sum(), living.len()).map_or(HealthStatus::Dead, HealthStatus::nearest)
    }

    /// Feed everyone and tick each living passenger.
    pub fn tick_passengers<R: Rng + ?Sized>(&mut self, resting: bool, rng: &mut R) -> PartyReport {
        let living = u32::try_from(self.living_count()).unwrap_or(u32::MAX);
        let needed = self.ration.pounds_per_person().saturating_mul(living);
        let available = self.quantity(ItemCategory::Food);
        let fed = available >= needed;
        let food_eaten = self
            .inventory
            .get_mut(&ItemCategory::Food)
            .map_or(0, |food| food.remove_quantity(needed));

        let conditions = DayConditions {
            fed,
            clothed: self.quantity(ItemCategory::Clothes) >= living,
            resting,
            ration: self.ration,
            pace: self.pace,
        };
        let mut deaths = Vec::new();
        for person in self.passengers.iter_mut().filter(|p| p.is_alive()) {
            person.tick(&conditions, rng);
            if !person.is_alive() {
                log::info!(target: LOG_TARGET_PARTY, "{} has died", person.name);
                deaths.push(person.name.clone());
            }
        }
        PartyReport {
            fed,
            food_eaten,
            deaths,
        }
    }

    // Settings -------------------------------------------------------------

    #[must_use]
    pub const fn pace(&self) -> TravelPace {
        self.pace
    }

    pub const fn set_pace(&mut self, pace: TravelPace) {
        self.pace = pace;
    }

    #[must_use]
    pub const fn ration(&self) -> RationLevel {
        self.ration
    }

    pub const fn set_ration(&mut self, ration: RationLevel) {
        self.ration = ration;
    }

    #[must_use]
    pub const fn status(&self) -> VehicleStatus {
        self.status
    }

    pub const fn set_status(&mut self, status: VehicleStatus) {
        self.status = status;
    }

    // Movement -------------------------------------------------------------

    #[must_use]
    pub const fn odometer(&self) -> u32 {
        self.odometer
    }

    /// Today's mileage: the pending roll before commit, the travelled distance after.
    #[must_use]
    pub const fn mileage(&self) -> i32 {
        self.mileage
    }

    /// Roll today's mileage from pace, draft animals and luck.
    pub fn roll_mileage<R: Rng + ?Sized>(&mut self, config: &SimConfig, rng: &mut R) -> i32 {
        let investment = cents_to_dollars(
            self.item(ItemCategory::Animal)
                .map_or(0, Item::total_value_cents),
        );
        let noise = rng.gen_range(0..=config.mileage_noise_max);
        let mut miles = config.base_mileage * self.pace.mileage_factor()
            + (investment - config.animal_investment_pivot) / config.animal_investment_divisor
            + f64::from(noise);
        if roll_chance(rng, config.bad_luck_chance) {
            miles /= 2.0;
        }
        self.mileage = round_f64_to_i32(miles);
        self.mileage
    }

    /// Shorten today's trip. Only applies while moving, never increases the
    /// mileage and floors at zero.
    pub fn reduce_mileage(&mut self, amount: u32) {
        if self.status != VehicleStatus::Moving || self.mileage <= 0 {
            return;
        }
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        self.mileage = self.mileage.saturating_sub(amount).max(0);
    }

    /// Apply today's mileage to the odometer, lifted to `min_daily`. Returns
    /// the miles travelled, zero unless the wagon is still moving.
    pub fn commit_mileage(&mut self, min_daily: i32) -> u32 {
        if self.status != VehicleStatus::Moving {
            self.mileage = 0;
            return 0;
        }
        self.mileage = self.mileage.max(min_daily.max(0));
        let travelled = u32::try_from(self.mileage).unwrap_or(0);
        self.odometer = self.odometer.saturating_add(travelled);
        travelled
    }

    /// Queue days that pass without any distance covered.
    pub const fn skip_days(&mut self, days: u32) {
        self.skip_days = self.skip_days.saturating_add(days);
    }

    #[must_use]
    pub const fn pending_skip_days(&self) -> u32 {
        self.skip_days
    }

    /// Consume one queued skip day, returning whether today is skipped.
    pub const fn take_skip_day(&mut self) -> bool {
        if self.skip_days == 0 {
            return false;
        }
        self.skip_days -= 1;
        true
    }

    // Breakdowns -----------------------------------------------------------

    #[must_use]
    pub const fn broken_part(&self) -> Option<ItemCategory> {
        self.broken_part
    }

    /// A part snapped. A spare is fitted when one is on hand; otherwise the
    /// wagon is broken until repaired. Returns `true` if a spare was used.
    pub fn break_part(&mut self, part: ItemCategory) -> bool {
        if !part.is_spare_part() {
            return false;
        }
        if self.take_spare(part) {
            log::debug!(target: LOG_TARGET_PARTY, "fitted a spare {part}");
            return true;
        }
        log::info!(target: LOG_TARGET_PARTY, "broken {part}, no spare on hand");
        self.broken_part = Some(part);
        self.status = VehicleStatus::Broken;
        false
    }

    /// Fit a spare for the broken part. Returns the part fixed, if any.
    pub fn repair(&mut self) -> Option<ItemCategory> {
        let part = self.broken_part?;
        if !self.take_spare(part) {
            return None;
        }
        self.broken_part = None;
        self.status = VehicleStatus::Stopped;
        Some(part)
    }

    fn take_spare(&mut self, part: ItemCategory) -> bool {
        self.inventory
            .get_mut(&part)
            .is_some_and(|spare| spare.remove_quantity(1) == 1)
    }
}

/// Cash units covering `cost`, rounded up. `None` when no whole number of
/// units can pay for it.
fn cash_units_for(cost: i64, unit_value: i64) -> Option<u32> {
    if cost <= 0 {
        return Some(0);
    }
    if unit_value <= 0 {
        return None;
    }
    u32::try_from((cost + unit_value - 1) / unit_value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn wagon() -> Vehicle {
        let catalog = ItemCatalog::bundled().unwrap();
        Vehicle::new(&catalog, 80_000)
    }

    #[test]
    fn reduce_mileage_floors_at_zero_and_never_increases() {
        let mut vehicle = wagon();
        vehicle.set_status(VehicleStatus::Moving);
        vehicle.mileage = 150;
        vehicle.reduce_mileage(200);
        assert_eq!(vehicle.mileage(), 0);
        vehicle.reduce_mileage(10);
        assert_eq!(vehicle.mileage(), 0);

        vehicle.mileage = 40;
        vehicle.set_status(VehicleStatus::Stopped);
        vehicle.reduce_mileage(10);
        assert_eq!(vehicle.mileage(), 40);
    }

    #[test]
    fn commit_lifts_to_the_daily_minimum() {
        let mut vehicle = wagon();
        vehicle.set_status(VehicleStatus::Moving);
        vehicle.mileage = 0;
        assert_eq!(vehicle.commit_mileage(10), 10);
        assert_eq!(vehicle.mileage(), 10);
        assert_eq!(vehicle.odometer(), 10);

        vehicle.set_status(VehicleStatus::Broken);
        vehicle.mileage = 30;
        assert_eq!(vehicle.commit_mileage(10), 0);
        assert_eq!(vehicle.odometer(), 10);
    }

    #[test]
    fn purchase_is_all_or_nothing() {
        let catalog = ItemCatalog::bundled().unwrap();
        let mut vehicle = Vehicle::new(&catalog, 1_000);
        let oxen = catalog.get(ItemCategory::Animal).unwrap();
        let before = vehicle.clone();
        assert!(!vehicle.purchase(&oxen.transaction(1)));
        assert_eq!(vehicle.balance_cents(), before.balance_cents());
        assert_eq!(vehicle.quantity(ItemCategory::Animal), 0);

        let food = catalog.get(ItemCategory::Food).unwrap();
        assert!(vehicle.purchase(&food.transaction(10)));
        assert_eq!(vehicle.quantity(ItemCategory::Food), 10);
        assert_eq!(vehicle.balance_cents(), 1_000 - 10 * food.value_cents);
    }

    #[test]
    fn purchase_only_charges_for_what_fits() {
        let catalog = ItemCatalog::bundled().unwrap();
        let mut vehicle = Vehicle::new(&catalog, 1_000_000);
        let wheel = catalog.get(ItemCategory::Wheel).unwrap();
        assert!(vehicle.purchase(&wheel.transaction(10)));
        assert_eq!(vehicle.quantity(ItemCategory::Wheel), wheel.max_quantity);
        let charged = i64::from(wheel.max_quantity) * wheel.value_cents;
        assert_eq!(vehicle.balance_cents(), 1_000_000 - charged);
        assert!(!vehicle.purchase(&wheel.transaction(1)));
    }

    fn catalog_with_cash(value_cents: i64, min_quantity: u32) -> ItemCatalog {
        let catalog = ItemCatalog::bundled().unwrap();
        let items = catalog.iter().cloned().map(|item| {
            if item.category == ItemCategory::Cash {
                Item::new(ItemCategory::Cash, "Cash", value_cents, min_quantity, item.max_quantity)
            } else {
                item
            }
        });
        ItemCatalog::from_items(items.collect::<Vec<_>>()).unwrap()
    }

    #[test]
    fn cash_floor_is_not_spendable() {
        let catalog = catalog_with_cash(1, 500);
        let mut vehicle = Vehicle::new(&catalog, 500);
        assert_eq!(vehicle.balance_cents(), 1_000);
        assert_eq!(vehicle.spendable_cents(), 500);

        let food = catalog.get(ItemCategory::Food).unwrap();
        assert!(!vehicle.purchase(&food.transaction(40)));
        assert_eq!(vehicle.balance_cents(), 1_000);
        assert_eq!(vehicle.quantity(ItemCategory::Food), 0);

        assert!(vehicle.purchase(&food.transaction(25)));
        assert_eq!(vehicle.spendable_cents(), 0);
        assert_eq!(vehicle.quantity(ItemCategory::Food), 25);
    }

    #[test]
    fn dollar_cash_units_charge_the_rounded_up_cost() {
        let catalog = catalog_with_cash(100, 0);
        let mut vehicle = Vehicle::new(&catalog, 100_000);
        assert_eq!(vehicle.quantity(ItemCategory::Cash), 1_000);
        assert_eq!(vehicle.balance_cents(), 100_000);

        let food = catalog.get(ItemCategory::Food).unwrap();
        assert!(vehicle.purchase(&food.transaction(40)));
        assert_eq!(vehicle.balance_cents(), 100_000 - 800);
        assert!(vehicle.purchase(&food.transaction(1)));
        assert_eq!(vehicle.balance_cents(), 100_000 - 900);
    }

    #[test]
    fn all_dead_needs_a_party() {
        let mut vehicle = wagon();
        assert!(!vehicle.all_dead());
        assert_eq!(vehicle.average_health(), HealthStatus::Dead);
        vehicle.board(Person::new("Ada", true)).unwrap();
        vehicle.board(Person::new("Ben", false)).unwrap();
        assert!(!vehicle.all_dead());
        for index in 0..2 {
            vehicle.passenger_mut(index).unwrap().kill();
        }
        assert!(vehicle.all_dead());
        assert_eq!(vehicle.dead_leader_index(), Some(0));
    }

    #[test]
    fn average_health_ignores_the_dead() {
        let mut vehicle = wagon();
        vehicle.board(Person::new("Ada", true)).unwrap();
        vehicle.board(Person::new("Ben", false)).unwrap();
        vehicle.board(Person::new("Cy", false)).unwrap();
        vehicle.passenger_mut(1).unwrap().set_health(HealthStatus::Fair);
        vehicle.passenger_mut(2).unwrap().kill();
        assert_eq!(vehicle.average_health(), HealthStatus::Fair);
    }

    #[test]
    fn second_living_leader_is_rejected() {
        let mut vehicle = wagon();
        vehicle.board(Person::new("Ada", true)).unwrap();
        let err = vehicle.board(Person::new("Bo", true)).unwrap_err();
        assert!(matches!(err, SimError::DuplicateLeader(name) if name == "Bo"));
    }

    #[test]
    fn random_items_respect_bounds_and_skip_cash() {
        let mut vehicle = wagon();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let cash = vehicle.balance_cents();
        for _ in 0..50 {
            vehicle.create_random_items(&mut rng);
            vehicle.destroy_random_items(&mut rng);
            for item in vehicle.inventory().values() {
                assert!(item.quantity >= item.min_quantity);
                assert!(item.quantity <= item.max_quantity);
            }
        }
        assert_eq!(vehicle.balance_cents(), cash);
    }

    #[test]
    fn destroy_reports_what_was_lost() {
        let mut vehicle = wagon();
        let food = vehicle.item(ItemCategory::Food).unwrap().transaction(40);
        vehicle.add_item(&food);
        let mut rng = StepRng::new(0, 0);
        let lost = vehicle.destroy_random_items(&mut rng);
        assert_eq!(lost.len(), 1);
        assert_eq!(lost[0].category, ItemCategory::Food);
        assert_eq!(lost[0].quantity, 1);
        assert_eq!(vehicle.quantity(ItemCategory::Food), 39);
    }

    #[test]
    fn spare_parts_prevent_breakdowns() {
        let mut vehicle = wagon();
        let axle = vehicle.item(ItemCategory::Axle).unwrap().transaction(1);
        vehicle.add_item(&axle);
        vehicle.set_status(VehicleStatus::Moving);
        assert!(vehicle.break_part(ItemCategory::Axle));
        assert_eq!(vehicle.status(), VehicleStatus::Moving);
        assert!(!vehicle.break_part(ItemCategory::Axle));
        assert_eq!(vehicle.status(), VehicleStatus::Broken);
        assert_eq!(vehicle.repair(), None);
        vehicle.add_item(&axle);
        assert_eq!(vehicle.repair(), Some(ItemCategory::Axle));
        assert_eq!(vehicle.status(), VehicleStatus::Stopped);
    }

    #[test]
    fn hungry_party_eats_what_is_left() {
        let mut vehicle = wagon();
        vehicle.board(Person::new("Ada", true)).unwrap();
        vehicle.board(Person::new("Ben", false)).unwrap();
        let food = vehicle.item(ItemCategory::Food).unwrap().transaction(4);
        vehicle.add_item(&food);
        let mut rng = StepRng::new(0, 0);
        let report = vehicle.tick_passengers(false, &mut rng);
        assert!(!report.fed);
        assert_eq!(report.food_eaten, 4);
        assert_eq!(vehicle.quantity(ItemCategory::Food), 0);
    }

    #[test]
    fn trade_requires_the_goods() {
        let mut vehicle = wagon();
        let clothes = vehicle.item(ItemCategory::Clothes).unwrap().transaction(2);
        let ammo = vehicle.item(ItemCategory::Ammo).unwrap().transaction(50);
        assert!(!vehicle.trade(&clothes, &ammo));
        vehicle.add_item(&clothes);
        assert!(vehicle.trade(&clothes, &ammo));
        assert_eq!(vehicle.quantity(ItemCategory::Clothes), 0);
        assert_eq!(vehicle.quantity(ItemCategory::Ammo), 50);
    }
}
