//! Equipment rules - moving a held item between a trainer's inventory and a
//! monster, applying or reversing its stat effect on the way.
//!
//! The engine is pure: it takes the current monster and trainer by reference
//! and returns the updated pair. Callers persist both or neither.

use crate::aggregates::{HeldItemSlot, Monster, Trainer};
use crate::catalog::{EffectCatalog, HeldItem};
use crate::value_objects::{ItemCategory, StatDelta};

use super::LoadoutError;

/// How the stats of a returned item were restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reversal {
    /// The change recorded at equip time was subtracted.
    Stored(StatDelta),
    /// No change was recorded, so the item's delta was re-evaluated against
    /// the monster's current stats and subtracted. Exact only when the item
    /// reads none of the fields it writes.
    Recomputed { item: HeldItem, delta: StatDelta },
    /// The name has no managed effect; stats were left alone.
    Unmanaged,
}

/// An item taken off a monster and put back into inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnedItem {
    pub name: String,
    pub reversal: Reversal,
}

/// The result of an equipment operation, ready to persist as one unit.
#[derive(Debug, Clone)]
pub struct EquipmentChange {
    pub monster: Monster,
    pub trainer: Trainer,
    pub returned: Option<ReturnedItem>,
    pub equipped: Option<HeldItem>,
    /// Effective change made by the newly equipped item, after clamping.
    pub applied: StatDelta,
    pub message: String,
}

pub struct EquipmentEngine<'a> {
    catalog: &'a EffectCatalog,
}

impl<'a> EquipmentEngine<'a> {
    pub fn new(catalog: &'a EffectCatalog) -> Self {
        Self { catalog }
    }

    /// Take the monster's held item off and return it to the trainer.
    ///
    /// # Errors
    ///
    /// `InvalidState` if the monster holds nothing.
    pub fn remove_held_item(
        &self,
        monster: &Monster,
        trainer: &Trainer,
    ) -> Result<EquipmentChange, LoadoutError> {
        let mut monster = monster.clone();
        let mut trainer = trainer.clone();
        let returned = self
            .return_held_item(&mut monster, &mut trainer)
            .ok_or_else(|| {
                LoadoutError::invalid_state(format!(
                    "{} is not holding any item",
                    monster.name()
                ))
            })?;

        let message = format!(
            "Removed {} from {} and returned it to {}'s bag",
            returned.name,
            monster.name(),
            trainer.name()
        );

        Ok(EquipmentChange {
            monster,
            trainer,
            returned: Some(returned),
            equipped: None,
            applied: StatDelta::new(),
            message,
        })
    }

    /// Equip `item_name` from the trainer's held-item inventory, returning
    /// whatever the monster held before.
    ///
    /// The new item's delta is evaluated against the monster as it stands
    /// after the old item has been reversed.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `item_name` is not a catalog held item
    /// - `InsufficientInventory` if the trainer has none of it
    pub fn give_held_item(
        &self,
        monster: &Monster,
        trainer: &Trainer,
        item_name: &str,
    ) -> Result<EquipmentChange, LoadoutError> {
        let item_name = item_name.trim();
        if item_name.is_empty() {
            return Err(LoadoutError::invalid_input("Item name is required"));
        }
        let item = self
            .catalog
            .held_item(item_name)
            .ok_or_else(|| LoadoutError::invalid_input(format!("Unknown held item: {}", item_name)))?;
        if !trainer.inventory(ItemCategory::HeldItems).has(item.name()) {
            return Err(LoadoutError::insufficient(item.name(), ItemCategory::HeldItems));
        }

        let mut monster = monster.clone();
        let mut trainer = trainer.clone();
        let returned = self.return_held_item(&mut monster, &mut trainer);

        let delta = item.delta(&monster);
        let applied = monster.stats_mut().apply(&delta);
        monster.set_held_item(HeldItemSlot::new(item.name(), applied.clone()));
        trainer
            .inventory_mut(ItemCategory::HeldItems)
            .decrement(item.name(), 1);

        let message = match &returned {
            Some(old) => format!(
                "{} swapped {} for {} ({})",
                monster.name(),
                old.name,
                item,
                applied
            ),
            None => format!("{} is now holding {} ({})", monster.name(), item, applied),
        };

        Ok(EquipmentChange {
            monster,
            trainer,
            returned,
            equipped: Some(item),
            applied,
            message,
        })
    }

    /// Reverse and unequip the current item, crediting it back to the
    /// trainer's held-item inventory.
    fn return_held_item(&self, monster: &mut Monster, trainer: &mut Trainer) -> Option<ReturnedItem> {
        let slot = monster.take_held_item()?;

        let reversal = match slot.applied() {
            Some(applied) => {
                monster.stats_mut().reverse(applied);
                Reversal::Stored(applied.clone())
            }
            None => match self.catalog.held_item(slot.name()) {
                Some(item) => {
                    let delta = item.delta(monster);
                    monster.stats_mut().reverse(&delta);
                    Reversal::Recomputed { item, delta }
                }
                None => Reversal::Unmanaged,
            },
        };

        trainer
            .inventory_mut(ItemCategory::HeldItems)
            .increment(slot.name(), 1);

        Some(ReturnedItem {
            name: slot.name().to_string(),
            reversal,
        })
    }
}
