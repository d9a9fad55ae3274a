//! Trainer aggregate - the player-owned holder of monsters and inventories.

use crate::ids::{PlayerId, TrainerId};
use crate::value_objects::{Inventories, Inventory, ItemCategory, TrainerName};

/// A trainer record.
///
/// # Invariants
///
/// - no inventory count is ever negative (counts are unsigned)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trainer {
    id: TrainerId,
    player_id: PlayerId,
    name: TrainerName,
    inventories: Inventories,
    version: i64,
}

impl Trainer {
    pub fn new(player_id: PlayerId, name: TrainerName) -> Self {
        Self {
            id: TrainerId::new(),
            player_id,
            name,
            inventories: Inventories::default(),
            version: 0,
        }
    }

    #[inline]
    pub fn id(&self) -> TrainerId {
        self.id
    }

    /// The player who owns this trainer.
    #[inline]
    pub fn player_id(&self) -> &PlayerId {
        &self.player_id
    }

    #[inline]
    pub fn name(&self) -> &TrainerName {
        &self.name
    }

    #[inline]
    pub fn inventories(&self) -> &Inventories {
        &self.inventories
    }

    pub fn inventory(&self, category: ItemCategory) -> &Inventory {
        self.inventories.category(category)
    }

    #[inline]
    pub fn version(&self) -> i64 {
        self.version
    }

    pub fn with_id(mut self, id: TrainerId) -> Self {
        self.id = id;
        self
    }

    pub fn with_inventories(mut self, inventories: Inventories) -> Self {
        self.inventories = inventories;
        self
    }

    pub fn with_version(mut self, version: i64) -> Self {
        self.version = version;
        self
    }

    pub(crate) fn inventory_mut(&mut self, category: ItemCategory) -> &mut Inventory {
        self.inventories.category_mut(category)
    }
}
