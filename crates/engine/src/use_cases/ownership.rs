//! Ownership guard - runs before any loadout change.

use std::sync::Arc;

use menagerie_domain::{Monster, MonsterId, PlayerId, Trainer, TrainerId};

use crate::infrastructure::ports::{MonsterRepo, RepoError, TrainerRepo};

/// Why a caller may not touch a monster.
#[derive(Debug, thiserror::Error)]
pub enum OwnershipError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Loads a trainer and monster and checks the caller may act on them.
pub struct OwnershipGuard {
    monsters: Arc<dyn MonsterRepo>,
    trainers: Arc<dyn TrainerRepo>,
}

impl OwnershipGuard {
    pub fn new(monsters: Arc<dyn MonsterRepo>, trainers: Arc<dyn TrainerRepo>) -> Self {
        Self { monsters, trainers }
    }

    /// Checks, in order: the trainer exists, the monster exists, the caller
    /// owns the trainer, and the trainer owns the monster.
    pub async fn authorize(
        &self,
        caller: &PlayerId,
        trainer_id: TrainerId,
        monster_id: MonsterId,
    ) -> Result<(Monster, Trainer), OwnershipError> {
        let trainer = self
            .trainers
            .get(trainer_id)
            .await?
            .ok_or(OwnershipError::NotFound("Trainer"))?;
        let monster = self
            .monsters
            .get(monster_id)
            .await?
            .ok_or(OwnershipError::NotFound("Monster"))?;

        if trainer.player_id() != caller {
            tracing::debug!(trainer_id = %trainer_id, caller = %caller, "Caller does not own trainer");
            return Err(OwnershipError::Forbidden("You do not own this trainer"));
        }
        if monster.trainer_id() != trainer_id {
            tracing::debug!(monster_id = %monster_id, trainer_id = %trainer_id, "Monster belongs to another trainer");
            return Err(OwnershipError::Forbidden(
                "This trainer does not own this monster",
            ));
        }

        Ok((monster, trainer))
    }

    /// Loads a monster and checks the caller owns its trainer.
    pub async fn authorize_monster(
        &self,
        caller: &PlayerId,
        monster_id: MonsterId,
    ) -> Result<(Monster, Trainer), OwnershipError> {
        let monster = self
            .monsters
            .get(monster_id)
            .await?
            .ok_or(OwnershipError::NotFound("Monster"))?;
        self.authorize(caller, monster.trainer_id(), monster_id).await
    }
}
