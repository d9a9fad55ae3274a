//! Give held item use case.
//!
//! Equips an item from the trainer's held-item inventory, returning any
//! item the monster was already holding.

use std::sync::Arc;

use menagerie_domain::{EffectCatalog, EquipmentChange, EquipmentEngine, MonsterId, PlayerId, TrainerId};

use crate::infrastructure::locks::MonsterLocks;
use crate::infrastructure::ports::LoadoutStore;
use crate::use_cases::ownership::OwnershipGuard;

use super::{log_reversal, EquipmentError};

pub struct GiveHeldItem {
    ownership: Arc<OwnershipGuard>,
    store: Arc<dyn LoadoutStore>,
    catalog: Arc<EffectCatalog>,
    locks: Arc<MonsterLocks>,
}

impl GiveHeldItem {
    pub fn new(
        ownership: Arc<OwnershipGuard>,
        store: Arc<dyn LoadoutStore>,
        catalog: Arc<EffectCatalog>,
        locks: Arc<MonsterLocks>,
    ) -> Self {
        Self {
            ownership,
            store,
            catalog,
            locks,
        }
    }

    /// Execute the give held item use case.
    ///
    /// # Returns
    /// * `Ok(EquipmentChange)` - Both records committed
    /// * `Err(EquipmentError)` - Nothing was written
    pub async fn execute(
        &self,
        caller: &PlayerId,
        trainer_id: TrainerId,
        monster_id: MonsterId,
        item_name: &str,
    ) -> Result<EquipmentChange, EquipmentError> {
        let _lock = self.locks.acquire(monster_id).await;

        let (monster, trainer) = self
            .ownership
            .authorize(caller, trainer_id, monster_id)
            .await?;

        let change = EquipmentEngine::new(&self.catalog).give_held_item(&monster, &trainer, item_name)?;
        if let Some(returned) = &change.returned {
            log_reversal(monster_id, returned);
        }

        self.store.commit(&change.monster, &change.trainer).await?;

        tracing::info!(
            monster_id = %monster_id,
            trainer_id = %trainer_id,
            item = %item_name.trim(),
            replaced = ?change.returned.as_ref().map(|r| r.name.as_str()),
            applied = %change.applied,
            "Held item equipped"
        );
        Ok(change)
    }
}
