//! Remove held item use case.
//!
//! Takes the monster's held item off, reverses its effect and puts it back
//! in the trainer's held-item inventory.

use std::sync::Arc;

use menagerie_domain::{EffectCatalog, EquipmentChange, EquipmentEngine, MonsterId, PlayerId, TrainerId};

use crate::infrastructure::locks::MonsterLocks;
use crate::infrastructure::ports::LoadoutStore;
use crate::use_cases::ownership::OwnershipGuard;

use super::{log_reversal, EquipmentError};

pub struct RemoveHeldItem {
    ownership: Arc<OwnershipGuard>,
    store: Arc<dyn LoadoutStore>,
    catalog: Arc<EffectCatalog>,
    locks: Arc<MonsterLocks>,
}

impl RemoveHeldItem {
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

    pub async fn execute(
        &self,
        caller: &PlayerId,
        trainer_id: TrainerId,
        monster_id: MonsterId,
    ) -> Result<EquipmentChange, EquipmentError> {
        let _lock = self.locks.acquire(monster_id).await;

        let (monster, trainer) = self
            .ownership
            .authorize(caller, trainer_id, monster_id)
            .await?;

        let change = EquipmentEngine::new(&self.catalog).remove_held_item(&monster, &trainer)?;
        if let Some(returned) = &change.returned {
            log_reversal(monster_id, returned);
        }

        self.store.commit(&change.monster, &change.trainer).await?;

        tracing::info!(
            monster_id = %monster_id,
            trainer_id = %trainer_id,
            item = ?change.returned.as_ref().map(|r| r.name.as_str()),
            "Held item removed"
        );
        Ok(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockLoadoutStore, MockMonsterRepo, MockTrainerRepo};
    use crate::use_cases::ownership::test_support::*;
    use menagerie_domain::{
        HeldItemSlot, Inventory, ItemCategory, LoadoutError, Monster, Reversal, Stat, StatDelta,
        StatField, Trainer,
    };

    fn use_case(monster: &Monster, trainer: &Trainer, store: MockLoadoutStore) -> RemoveHeldItem {
        let mut monsters = MockMonsterRepo::new();
        let m = monster.clone();
        monsters.expect_get().returning(move |_| Ok(Some(m.clone())));
        let mut trainers = MockTrainerRepo::new();
        let t = trainer.clone();
        trainers.expect_get().returning(move |_| Ok(Some(t.clone())));

        RemoveHeldItem::new(
            Arc::new(OwnershipGuard::new(Arc::new(monsters), Arc::new(trainers))),
            Arc::new(store),
            Arc::new(EffectCatalog::builtin().unwrap()),
            Arc::new(MonsterLocks::new()),
        )
    }

    #[tokio::test]
    async fn when_holding_nothing_returns_invalid_state() {
        let trainer = trainer_with(Inventory::new(), Inventory::new());
        let monster = monster_of(&trainer);
        let mut store = MockLoadoutStore::new();
        store.expect_commit().never();

        let result = use_case(&monster, &trainer, store)
            .execute(&caller(), trainer.id(), monster.id())
            .await;

        assert!(matches!(
            result,
            Err(EquipmentError::Loadout(LoadoutError::InvalidState(_)))
        ));
    }

    #[tokio::test]
    async fn removal_subtracts_stored_change_and_returns_item() {
        let trainer = trainer_with(Inventory::new(), Inventory::new());
        // Equipped when spe_ev was 112.
        let monster = monster_of(&trainer).with_held_item(Some(HeldItemSlot::new(
            "Balanced Shell",
            StatDelta::new()
                .with(StatField::ev(Stat::Def), 6)
                .with(StatField::ev(Stat::Spd), 6)
                .with(StatField::ev(Stat::Spe), -12),
        )));
        let mut store = MockLoadoutStore::new();
        store
            .expect_commit()
            .withf(|m, t| {
                m.held_item().is_none()
                    && m.stats().ev(Stat::Spe) == 112
                    && m.stats().ev(Stat::Def) == 0
                    && t.inventory(ItemCategory::HeldItems).count("Balanced Shell") == 1
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let change = use_case(&monster, &trainer, store)
            .execute(&caller(), trainer.id(), monster.id())
            .await
            .unwrap();

        assert!(matches!(
            change.returned.map(|r| r.reversal),
            Some(Reversal::Stored(_))
        ));
    }

    #[tokio::test]
    async fn legacy_record_is_reversed_by_recompute() {
        let trainer = trainer_with(Inventory::new(), Inventory::new());
        let monster = monster_of(&trainer).with_held_item(Some(HeldItemSlot::legacy("Quick Feather")));
        let mut store = MockLoadoutStore::new();
        store.expect_commit().returning(|_, _| Ok(()));

        let change = use_case(&monster, &trainer, store)
            .execute(&caller(), trainer.id(), monster.id())
            .await
            .unwrap();

        // spe_iv was 0, so the recomputed -2 floors at 0.
        assert_eq!(change.monster.stats().iv(Stat::Spe), 0);
        assert!(matches!(
            change.returned.map(|r| r.reversal),
            Some(Reversal::Recomputed { .. })
        ));
    }
}
