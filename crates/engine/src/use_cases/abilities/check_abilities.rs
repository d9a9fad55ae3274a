//! Check abilities use case.
//!
//! Reads a monster's ability triple with descriptions, drawing and saving
//! an initial pair first if the monster has none.

use std::sync::Arc;

use menagerie_domain::{
    AbilityCatalog, AbilityEngine, EffectCatalog, LoadoutError, MonsterId, PlayerId,
};

use crate::infrastructure::locks::MonsterLocks;
use crate::infrastructure::ports::{MonsterRepo, RandomPort};
use crate::use_cases::ownership::OwnershipGuard;

use super::error::report_exhausted;
use super::{AbilityItemError, DescribedAbility};

/// A monster's abilities with their descriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityReport {
    pub active: Option<DescribedAbility>,
    pub known1: DescribedAbility,
    pub known2: DescribedAbility,
}

pub struct CheckAbilities {
    ownership: Arc<OwnershipGuard>,
    monsters: Arc<dyn MonsterRepo>,
    items: Arc<EffectCatalog>,
    abilities: Arc<AbilityCatalog>,
    random: Arc<dyn RandomPort>,
    locks: Arc<MonsterLocks>,
}

impl CheckAbilities {
    pub fn new(
        ownership: Arc<OwnershipGuard>,
        monsters: Arc<dyn MonsterRepo>,
        items: Arc<EffectCatalog>,
        abilities: Arc<AbilityCatalog>,
        random: Arc<dyn RandomPort>,
        locks: Arc<MonsterLocks>,
    ) -> Self {
        Self {
            ownership,
            monsters,
            items,
            abilities,
            random,
            locks,
        }
    }

    pub async fn execute(
        &self,
        caller: &PlayerId,
        monster_id: MonsterId,
    ) -> Result<AbilityReport, AbilityItemError> {
        let _lock = self.locks.acquire(monster_id).await;

        let (monster, _) = self
            .ownership
            .authorize_monster(caller, monster_id)
            .await?;

        let assigned = AbilityEngine::new(&self.items, &self.abilities)
            .ensure_abilities(&monster, |upper| self.random.gen_index(upper))
            .map_err(report_exhausted)?;
        let monster = match assigned {
            Some(assigned) => {
                let saved = self.monsters.save_abilities(&assigned).await?;
                tracing::info!(monster_id = %monster_id, "Initial abilities assigned");
                saved
            }
            None => monster,
        };

        let set = monster.abilities().ok_or_else(|| {
            LoadoutError::invalid_state(format!("{} has no abilities", monster.name()))
        })?;

        Ok(AbilityReport {
            active: set
                .active()
                .map(|name| DescribedAbility::lookup(&self.abilities, name)),
            known1: DescribedAbility::lookup(&self.abilities, set.known1()),
            known2: DescribedAbility::lookup(&self.abilities, set.known2()),
        })
    }
}
