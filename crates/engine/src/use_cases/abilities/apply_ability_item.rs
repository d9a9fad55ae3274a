//! Apply ability item use case.
//!
//! Consumes an ability item from the trainer's generic inventory and changes
//! the monster's active ability.

use std::sync::Arc;

use menagerie_domain::{
    AbilityCatalog, AbilityChange, AbilityEngine, EffectCatalog, MonsterId, PlayerId, TrainerId,
};

use crate::infrastructure::locks::MonsterLocks;
use crate::infrastructure::ports::{LoadoutStore, RandomPort};
use crate::use_cases::ownership::OwnershipGuard;

use super::error::report_exhausted;
use super::AbilityItemError;

pub struct ApplyAbilityItem {
    ownership: Arc<OwnershipGuard>,
    store: Arc<dyn LoadoutStore>,
    items: Arc<EffectCatalog>,
    abilities: Arc<AbilityCatalog>,
    random: Arc<dyn RandomPort>,
    locks: Arc<MonsterLocks>,
}

impl ApplyAbilityItem {
    pub fn new(
        ownership: Arc<OwnershipGuard>,
        store: Arc<dyn LoadoutStore>,
        items: Arc<EffectCatalog>,
        abilities: Arc<AbilityCatalog>,
        random: Arc<dyn RandomPort>,
        locks: Arc<MonsterLocks>,
    ) -> Self {
        Self {
            ownership,
            store,
            items,
            abilities,
            random,
            locks,
        }
    }

    /// Execute the apply ability item use case.
    ///
    /// A monster without abilities gets its initial pair drawn first, in the
    /// same commit as the item's effect.
    pub async fn execute(
        &self,
        caller: &PlayerId,
        trainer_id: TrainerId,
        monster_id: MonsterId,
        item_name: &str,
        selected_ability: Option<&str>,
    ) -> Result<AbilityChange, AbilityItemError> {
        let _lock = self.locks.acquire(monster_id).await;

        let (monster, trainer) = self
            .ownership
            .authorize(caller, trainer_id, monster_id)
            .await?;

        let change = AbilityEngine::new(&self.items, &self.abilities)
            .apply_item(&monster, &trainer, item_name, selected_ability, |upper| {
                self.random.gen_index(upper)
            })
            .map_err(report_exhausted)?;

        if change.synthesized {
            tracing::info!(monster_id = %monster_id, "Initial abilities assigned before applying item");
        }
        if change.was_out_of_band {
            tracing::info!(
                monster_id = %monster_id,
                previous = ?change.previous.as_ref().map(|a| a.as_str()),
                "Active ability was neither known ability"
            );
        }

        self.store.commit(&change.monster, &change.trainer).await?;

        tracing::info!(
            monster_id = %monster_id,
            trainer_id = %trainer_id,
            item = %change.item,
            active = %change.active,
            "Ability item applied"
        );
        Ok(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedRandom;
    use crate::infrastructure::ports::{MockLoadoutStore, MockMonsterRepo, MockTrainerRepo};
    use crate::use_cases::ownership::test_support::*;
    use crate::use_cases::ownership::OwnershipError;
    use menagerie_domain::{AbilityEntry, AbilityName, Inventory, ItemCategory, LoadoutError, Monster, Trainer};

    fn name(s: &str) -> AbilityName {
        AbilityName::new(s).unwrap()
    }

    fn use_case_with(
        monster: &Monster,
        trainer: &Trainer,
        store: MockLoadoutStore,
        abilities: AbilityCatalog,
    ) -> ApplyAbilityItem {
        let mut monsters = MockMonsterRepo::new();
        let m = monster.clone();
        monsters.expect_get().returning(move |_| Ok(Some(m.clone())));
        let mut trainers = MockTrainerRepo::new();
        let t = trainer.clone();
        trainers.expect_get().returning(move |_| Ok(Some(t.clone())));

        ApplyAbilityItem::new(
            Arc::new(OwnershipGuard::new(Arc::new(monsters), Arc::new(trainers))),
            Arc::new(store),
            Arc::new(EffectCatalog::builtin().unwrap()),
            Arc::new(abilities),
            Arc::new(FixedRandom(0)),
            Arc::new(MonsterLocks::new()),
        )
    }

    fn use_case(monster: &Monster, trainer: &Trainer, store: MockLoadoutStore) -> ApplyAbilityItem {
        use_case_with(monster, trainer, store, AbilityCatalog::builtin().unwrap())
    }

    #[tokio::test]
    async fn capsule_flips_active_and_consumes_item() {
        let trainer = trainer_with(Inventory::new().with("Ability Capsule", 1), Inventory::new());
        let monster = knowing(monster_of(&trainer), "Overgrow", "Overgrow", "Chlorophyll");
        let mut store = MockLoadoutStore::new();
        store
            .expect_commit()
            .withf(|m, t| {
                m.abilities().and_then(|a| a.active()) == Some(&name("Chlorophyll"))
                    && t.inventory(ItemCategory::Items).count("Ability Capsule") == 0
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let change = use_case(&monster, &trainer, store)
            .execute(&caller(), trainer.id(), monster.id(), "Ability Capsule", None)
            .await
            .unwrap();

        assert_eq!(
            change.message,
            "Changed Sproutle's ability from Overgrow to Chlorophyll"
        );
    }

    #[tokio::test]
    async fn scroll_with_unknown_ability_is_rejected_before_commit() {
        let trainer = trainer_with(Inventory::new().with("Scroll of Secrets", 1), Inventory::new());
        let monster = knowing(monster_of(&trainer), "Overgrow", "Overgrow", "Chlorophyll");
        let mut store = MockLoadoutStore::new();
        store.expect_commit().never();

        let result = use_case(&monster, &trainer, store)
            .execute(
                &caller(),
                trainer.id(),
                monster.id(),
                "Scroll of Secrets",
                Some("Not An Ability"),
            )
            .await;

        assert!(matches!(
            result,
            Err(AbilityItemError::Loadout(LoadoutError::InvalidInput(_)))
        ));
    }

    #[tokio::test]
    async fn monster_without_abilities_gets_them_in_same_commit() {
        let trainer = trainer_with(Inventory::new().with("Scroll of Secrets", 1), Inventory::new());
        let monster = monster_of(&trainer);
        let mut store = MockLoadoutStore::new();
        store
            .expect_commit()
            .withf(|m, _| {
                let set = m.abilities();
                set.is_some_and(|s| s.active() == Some(&name("Levitate")))
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let change = use_case(&monster, &trainer, store)
            .execute(&caller(), trainer.id(), monster.id(), "Scroll of Secrets", Some("Levitate"))
            .await
            .unwrap();

        assert!(change.synthesized);
    }

    #[tokio::test]
    async fn exhausted_catalog_is_reported() {
        let trainer = trainer_with(Inventory::new().with("Ability Capsule", 1), Inventory::new());
        let monster = monster_of(&trainer);
        let mut store = MockLoadoutStore::new();
        store.expect_commit().never();
        let tiny = AbilityCatalog::from_entries(vec![AbilityEntry::new(name("Blaze"), "")]).unwrap();

        let result = use_case_with(&monster, &trainer, store, tiny)
            .execute(&caller(), trainer.id(), monster.id(), "Ability Capsule", None)
            .await;

        assert!(matches!(
            result,
            Err(AbilityItemError::Loadout(LoadoutError::CatalogExhausted { available: 1 }))
        ));
    }

    #[tokio::test]
    async fn when_trainer_missing_returns_not_found() {
        let trainer = trainer_with(Inventory::new(), Inventory::new());
        let monster = monster_of(&trainer);
        let monsters = MockMonsterRepo::new();
        let mut trainers = MockTrainerRepo::new();
        trainers.expect_get().returning(|_| Ok(None));
        let mut store = MockLoadoutStore::new();
        store.expect_commit().never();

        let use_case = ApplyAbilityItem::new(
            Arc::new(OwnershipGuard::new(Arc::new(monsters), Arc::new(trainers))),
            Arc::new(store),
            Arc::new(EffectCatalog::builtin().unwrap()),
            Arc::new(AbilityCatalog::builtin().unwrap()),
            Arc::new(FixedRandom(0)),
            Arc::new(MonsterLocks::new()),
        );
        let result = use_case
            .execute(&caller(), trainer.id(), monster.id(), "Ability Capsule", None)
            .await;

        assert!(matches!(
            result,
            Err(AbilityItemError::Ownership(OwnershipError::NotFound("Trainer")))
        ));
    }
}
