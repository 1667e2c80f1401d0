//! Item catalog: default name, price and bounds for every inventory category.
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::error::{SimError, SimResult};
use crate::item::{Item, ItemCategory};

const DEFAULT_ITEMS_DATA: &str = include_str!("../data/items.json");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    items: Vec<Item>,
}

/// Lookup of default item definitions by category. Construction guarantees
/// every category has exactly one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCatalog {
    items: BTreeMap<ItemCategory, Item>,
}

impl ItemCatalog {
    /// Parse a catalog document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, an entry is invalid, a
    /// category is listed twice, or a category is missing.
    pub fn from_json(json: &str) -> SimResult<Self> {
        let file: CatalogFile = serde_json::from_str(json).map_err(|source| SimError::Parse {
            what: "item catalog",
            source,
        })?;
        Self::from_items(file.items)
    }

    /// Build a catalog from item definitions.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ItemCatalog::from_json`] minus parsing.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> SimResult<Self> {
        let mut by_category = BTreeMap::new();
        for item in items {
            item.validate()?;
            let category = item.category;
            if by_category.insert(category, item).is_some() {
                return Err(SimError::Catalog(format!(
                    "category {category} is listed more than once"
                )));
            }
        }
        if let Some(missing) = ItemCategory::ALL
            .iter()
            .find(|category| !by_category.contains_key(category))
        {
            return Err(SimError::Catalog(format!("category {missing} is missing")));
        }
        Ok(Self { items: by_category })
    }

    /// Catalog bundled with the crate.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled data is corrupt.
    pub fn bundled() -> SimResult<Self> {
        Self::from_json(DEFAULT_ITEMS_DATA)
    }

    /// Definition for `category`; present for every category by construction.
    #[must_use]
    pub fn get(&self, category: ItemCategory) -> Option<&Item> {
        self.items.get(&category)
    }

    #[must_use]
    pub fn price_cents(&self, category: ItemCategory) -> i64 {
        self.get(category).map_or(0, |item| item.value_cents)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_covers_every_category() {
        let catalog = ItemCatalog::bundled().unwrap();
        for category in ItemCategory::ALL {
            let item = catalog.get(category).expect("category present");
            assert_eq!(item.category, category);
            assert_eq!(item.quantity, 0);
        }
        assert_eq!(catalog.price_cents(ItemCategory::Cash), 1);
        assert!(catalog.price_cents(ItemCategory::Animal) > 0);
    }

    #[test]
    fn missing_category_is_rejected() {
        let json = r#"{ "items": [
            { "category": "food", "name": "Food", "value_cents": 20, "max_quantity": 10 }
        ] }"#;
        let err = ItemCatalog::from_json(json).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn duplicate_category_is_rejected() {
        let catalog = ItemCatalog::bundled().unwrap();
        let mut items: Vec<Item> = catalog.iter().cloned().collect();
        items.push(items[0].clone());
        let err = ItemCatalog::from_items(items).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn malformed_entry_is_rejected() {
        let json = r#"{ "items": [ { "category": "food" } ] }"#;
        assert!(matches!(
            ItemCatalog::from_json(json),
            Err(SimError::Parse { .. })
        ));
    }
}
