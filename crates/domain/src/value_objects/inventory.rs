//! Inventory value objects - per-category item counts held by a trainer.
//!
//! Counts are unsigned, so "never negative" holds by construction; decrement
//! floors at zero instead of failing. Callers that must not consume what the
//! trainer lacks check [`Inventory::has`] first.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Which inventory an item name is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    /// Generic items (`inv_items`), where ability items live
    Items,
    /// Equipment a monster can hold (`inv_helditems`)
    HeldItems,
}

impl ItemCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Items => "items",
            Self::HeldItems => "held_items",
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Item name to count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory(BTreeMap<String, u32>);

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used by fixtures and adapters.
    pub fn with(mut self, name: impl Into<String>, count: u32) -> Self {
        self.0.insert(name.into(), count);
        self
    }

    pub fn count(&self, name: &str) -> u32 {
        self.0.get(name).copied().unwrap_or(0)
    }

    /// True when the trainer holds at least one of `name`.
    pub fn has(&self, name: &str) -> bool {
        self.count(name) > 0
    }

    /// Returns the new count.
    pub fn increment(&mut self, name: &str, by: u32) -> u32 {
        let count = self.0.entry(name.to_string()).or_insert(0);
        *count = count.saturating_add(by);
        *count
    }

    /// Remove up to `by` of `name`, flooring at zero. Returns the new count.
    ///
    /// A depleted entry stays in the map with a zero count, matching how
    /// stored inventories have always looked.
    pub fn decrement(&mut self, name: &str, by: u32) -> u32 {
        match self.0.get_mut(name) {
            Some(count) => {
                *count = count.saturating_sub(by);
                *count
            }
            None => 0,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.0.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|count| *count == 0)
    }
}

impl FromIterator<(String, u32)> for Inventory {
    fn from_iter<T: IntoIterator<Item = (String, u32)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A trainer's two independent inventories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventories {
    pub items: Inventory,
    pub held_items: Inventory,
}

impl Inventories {
    pub fn new(items: Inventory, held_items: Inventory) -> Self {
        Self { items, held_items }
    }

    pub fn category(&self, category: ItemCategory) -> &Inventory {
        match category {
            ItemCategory::Items => &self.items,
            ItemCategory::HeldItems => &self.held_items,
        }
    }

    pub fn category_mut(&mut self, category: ItemCategory) -> &mut Inventory {
        match category {
            ItemCategory::Items => &mut self.items,
            ItemCategory::HeldItems => &mut self.held_items,
        }
    }
}
