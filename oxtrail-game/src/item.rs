//! Inventory records and transactions.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{SimError, SimResult};

/// Short list of item deltas produced by a single action.
pub type ItemList = SmallVec<[Item; 4]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Food,
    Clothes,
    Ammo,
    Animal,
    Wheel,
    Axle,
    Tongue,
    Cash,
}

impl ItemCategory {
    pub const ALL: [Self; 8] = [
        Self::Food,
        Self::Clothes,
        Self::Ammo,
        Self::Animal,
        Self::Wheel,
        Self::Axle,
        Self::Tongue,
        Self::Cash,
    ];

    pub const SPARE_PARTS: [Self; 3] = [Self::Wheel, Self::Axle, Self::Tongue];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Clothes => "clothes",
            Self::Ammo => "ammo",
            Self::Animal => "animal",
            Self::Wheel => "wheel",
            Self::Axle => "axle",
            Self::Tongue => "tongue",
            Self::Cash => "cash",
        }
    }

    /// Unit noun used when rendering quantities.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Food => "pounds",
            Self::Clothes => "sets",
            Self::Ammo => "bullets",
            Self::Animal => "oxen",
            Self::Wheel => "wheels",
            Self::Axle => "axles",
            Self::Tongue => "tongues",
            Self::Cash => "cents",
        }
    }

    /// Unit noun agreeing with `quantity`.
    #[must_use]
    pub const fn unit_for(self, quantity: u32) -> &'static str {
        if quantity != 1 {
            return self.unit();
        }
        match self {
            Self::Food => "pound",
            Self::Clothes => "set",
            Self::Ammo => "bullet",
            Self::Animal => "ox",
            Self::Wheel => "wheel",
            Self::Axle => "axle",
            Self::Tongue => "tongue",
            Self::Cash => "cent",
        }
    }

    /// Money is never traded, found, or destroyed by random effects.
    #[must_use]
    pub const fn is_tradeable(self) -> bool {
        !matches!(self, Self::Cash)
    }

    #[must_use]
    pub const fn is_spare_part(self) -> bool {
        matches!(self, Self::Wheel | Self::Axle | Self::Tongue)
    }
}

impl std::fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A quantity of one category at a unit value. Inventory entries and
/// transactions share this shape: a transaction is an item whose quantity is
/// the delta to apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub category: ItemCategory,
    pub name: String,
    /// Value of one unit in cents.
    pub value_cents: i64,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub min_quantity: u32,
    pub max_quantity: u32,
}

impl Item {
    #[must_use]
    pub fn new(
        category: ItemCategory,
        name: impl Into<String>,
        value_cents: i64,
        min_quantity: u32,
        max_quantity: u32,
    ) -> Self {
        Self {
            category,
            name: name.into(),
            value_cents,
            quantity: min_quantity,
            min_quantity,
            max_quantity,
        }
    }

    /// Same-category item carrying `quantity` as a delta.
    #[must_use]
    pub fn transaction(&self, quantity: u32) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn total_value_cents(&self) -> i64 {
        self.value_cents.saturating_mul(i64::from(self.quantity))
    }

    /// Units that can still be added before hitting the upper bound.
    #[must_use]
    pub const fn room(&self) -> u32 {
        self.max_quantity.saturating_sub(self.quantity)
    }

    /// Add up to `amount`, clamped to the upper bound. Returns the applied amount.
    pub fn add_quantity(&mut self, amount: u32) -> u32 {
        let applied = amount.min(self.room());
        self.quantity += applied;
        applied
    }

    /// Remove up to `amount`, clamped to the lower bound. Returns the applied amount.
    pub fn remove_quantity(&mut self, amount: u32) -> u32 {
        let available = self.quantity.saturating_sub(self.min_quantity);
        let applied = amount.min(available);
        self.quantity -= applied;
        applied
    }

    /// Overwrite the quantity, clamped into bounds.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.clamp(self.min_quantity, self.max_quantity);
    }

    /// Check the record's bounds and pricing.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Catalog`] describing the first problem found.
    pub fn validate(&self) -> SimResult<()> {
        if self.name.trim().is_empty() {
            return Err(SimError::Catalog(format!(
                "{} entry has an empty name",
                self.category
            )));
        }
        if self.value_cents < 0 {
            return Err(SimError::Catalog(format!(
                "{} has a negative value ({})",
                self.name, self.value_cents
            )));
        }
        if self.min_quantity > self.max_quantity {
            return Err(SimError::Catalog(format!(
                "{} minimum {} exceeds maximum {}",
                self.name, self.min_quantity, self.max_quantity
            )));
        }
        if !(self.min_quantity..=self.max_quantity).contains(&self.quantity) {
            return Err(SimError::Catalog(format!(
                "{} starting quantity {} is outside {}..={}",
                self.name, self.quantity, self.min_quantity, self.max_quantity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food() -> Item {
        Item::new(ItemCategory::Food, "Food", 20, 0, 100)
    }

    #[test]
    fn quantities_clamp_to_bounds() {
        let mut item = food();
        assert_eq!(item.add_quantity(150), 100);
        assert_eq!(item.quantity, 100);
        assert_eq!(item.add_quantity(1), 0);
        assert_eq!(item.remove_quantity(30), 30);
        assert_eq!(item.remove_quantity(500), 70);
        assert_eq!(item.quantity, 0);
        item.set_quantity(900);
        assert_eq!(item.quantity, 100);
    }

    #[test]
    fn transactions_keep_category_and_price() {
        let item = food();
        let tx = item.transaction(12);
        assert_eq!(tx.category, ItemCategory::Food);
        assert_eq!(tx.total_value_cents(), 240);
        assert_eq!(item.quantity, 0);
    }

    #[test]
    fn validation_catches_inverted_bounds() {
        let mut item = food();
        item.min_quantity = 200;
        assert!(matches!(item.validate(), Err(SimError::Catalog(_))));
    }

    #[test]
    fn only_cash_is_untradeable() {
        let untradeable: Vec<_> = ItemCategory::ALL
            .iter()
            .filter(|category| !category.is_tradeable())
            .collect();
        assert_eq!(untradeable, vec![&ItemCategory::Cash]);
        assert!(ItemCategory::Axle.is_spare_part());
        assert!(!ItemCategory::Animal.is_spare_part());
    }
}
