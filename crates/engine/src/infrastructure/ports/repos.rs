//! Repository port traits for database access.

use async_trait::async_trait;
use menagerie_domain::{Monster, MonsterId, Trainer, TrainerId};

use super::error::RepoError;

// =============================================================================
// Database Ports (one per aggregate)
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MonsterRepo: Send + Sync {
    async fn get(&self, id: MonsterId) -> Result<Option<Monster>, RepoError>;

    /// Write the monster's ability triple, checked against its version.
    ///
    /// Returns the monster carrying its new version.
    async fn save_abilities(&self, monster: &Monster) -> Result<Monster, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrainerRepo: Send + Sync {
    async fn get(&self, id: TrainerId) -> Result<Option<Trainer>, RepoError>;
}

// =============================================================================
// Loadout Commit
// =============================================================================

/// Writes a monster and its trainer as one unit.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoadoutStore: Send + Sync {
    /// Persist both records in one transaction.
    ///
    /// Each row is only written if its stored version still equals the
    /// version carried by the record. Otherwise nothing is written and
    /// `RepoError::Conflict` is returned. Both versions are bumped on success.
    async fn commit(&self, monster: &Monster, trainer: &Trainer) -> Result<(), RepoError>;
}
