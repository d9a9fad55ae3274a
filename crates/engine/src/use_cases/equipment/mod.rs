//! Equipment use cases.
//!
//! Moves held items between a trainer's bag and a monster. Each operation
//! holds the monster's lock from the ownership check through the commit.

use std::sync::Arc;

use menagerie_domain::{MonsterId, ReturnedItem, Reversal};

mod error;
mod give_held_item;
mod remove_held_item;

pub use error::EquipmentError;
pub use give_held_item::GiveHeldItem;
pub use remove_held_item::RemoveHeldItem;

/// Container for equipment use cases.
pub struct EquipmentUseCases {
    pub give: Arc<GiveHeldItem>,
    pub remove: Arc<RemoveHeldItem>,
}

impl EquipmentUseCases {
    pub fn new(give: Arc<GiveHeldItem>, remove: Arc<RemoveHeldItem>) -> Self {
        Self { give, remove }
    }
}

/// Report how a returned item's stats were restored.
fn log_reversal(monster_id: MonsterId, returned: &ReturnedItem) {
    match &returned.reversal {
        Reversal::Stored(delta) => {
            tracing::debug!(monster_id = %monster_id, item = %returned.name, delta = %delta, "Reversed stored held-item change");
        }
        Reversal::Recomputed { item, delta } => {
            tracing::warn!(
                monster_id = %monster_id,
                item = %item,
                delta = %delta,
                recompute_safe = item.is_recompute_safe(),
                "Held item has no stored change, reversed by recomputing its effect"
            );
        }
        Reversal::Unmanaged => {
            tracing::warn!(monster_id = %monster_id, item = %returned.name, "Monster held an item with no managed effect, stats left unchanged");
        }
    }
}
