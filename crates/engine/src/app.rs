//! Application state and composition.

use std::sync::Arc;

use menagerie_domain::{AbilityCatalog, EffectCatalog};

use crate::infrastructure::{
    clock::SystemRandom,
    locks::MonsterLocks,
    ports::{LoadoutStore, MonsterRepo, RandomPort, TrainerRepo},
    roster::SqliteRosterRepo,
};
use crate::use_cases::{
    abilities::{ApplyAbilityItem, CheckAbilities, ListAbilities},
    equipment::{GiveHeldItem, RemoveHeldItem},
    AbilityUseCases, EquipmentUseCases, OwnershipGuard,
};

/// Main application state.
///
/// Holds all repositories and use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Container for all repository ports.
pub struct Repositories {
    pub monster: Arc<dyn MonsterRepo>,
    pub trainer: Arc<dyn TrainerRepo>,
    pub loadout: Arc<dyn LoadoutStore>,
}

/// Container for all use cases.
pub struct UseCases {
    pub equipment: EquipmentUseCases,
    pub abilities: AbilityUseCases,
}

impl App {
    /// Create a new App backed by the SQLite roster.
    pub fn new(
        roster: Arc<SqliteRosterRepo>,
        items: Arc<EffectCatalog>,
        abilities: Arc<AbilityCatalog>,
    ) -> Self {
        let repositories = Repositories {
            monster: roster.clone(),
            trainer: roster.clone(),
            loadout: roster,
        };
        Self::with_ports(repositories, items, abilities, Arc::new(SystemRandom::new()))
    }

    /// Wire use cases over arbitrary port implementations.
    pub fn with_ports(
        repositories: Repositories,
        items: Arc<EffectCatalog>,
        abilities: Arc<AbilityCatalog>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let locks = Arc::new(MonsterLocks::new());
        let ownership = Arc::new(OwnershipGuard::new(
            repositories.monster.clone(),
            repositories.trainer.clone(),
        ));

        let equipment = EquipmentUseCases::new(
            Arc::new(GiveHeldItem::new(
                ownership.clone(),
                repositories.loadout.clone(),
                items.clone(),
                locks.clone(),
            )),
            Arc::new(RemoveHeldItem::new(
                ownership.clone(),
                repositories.loadout.clone(),
                items.clone(),
                locks.clone(),
            )),
        );

        let abilities_uc = AbilityUseCases::new(
            Arc::new(ApplyAbilityItem::new(
                ownership.clone(),
                repositories.loadout.clone(),
                items.clone(),
                abilities.clone(),
                random.clone(),
                locks.clone(),
            )),
            Arc::new(CheckAbilities::new(
                ownership,
                repositories.monster.clone(),
                items,
                abilities.clone(),
                random,
                locks,
            )),
            Arc::new(ListAbilities::new(abilities)),
        );

        Self {
            repositories,
            use_cases: UseCases {
                equipment,
                abilities: abilities_uc,
            },
        }
    }
}
