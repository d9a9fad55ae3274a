//! Rule failures raised by the equipment and ability engines.

use thiserror::Error;

use crate::value_objects::ItemCategory;

/// Why a loadout change was refused.
///
/// Every variant is decided before any state is modified, so a refused
/// change never leaves a partial update behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadoutError {
    /// A required field is missing, or an item/ability name is unknown
    #[error("{0}")]
    InvalidInput(String),

    /// The trainer does not hold a positive count of the item
    #[error("Trainer does not have {item}")]
    InsufficientInventory {
        item: String,
        category: ItemCategory,
    },

    /// The monster is not in a state the operation applies to
    #[error("{0}")]
    InvalidState(String),

    /// Fewer than two abilities exist to draw an initial ability pair from
    #[error("Failed to generate abilities: the ability catalog has {available} entries, need at least 2")]
    CatalogExhausted { available: usize },
}

impl LoadoutError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn insufficient(item: impl Into<String>, category: ItemCategory) -> Self {
        Self::InsufficientInventory {
            item: item.into(),
            category,
        }
    }
}
