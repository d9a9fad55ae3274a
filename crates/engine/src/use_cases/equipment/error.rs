//! Equipment operation errors.

use menagerie_domain::LoadoutError;

use crate::infrastructure::ports::RepoError;
use crate::use_cases::ownership::OwnershipError;

/// Errors that can occur while giving or removing a held item.
#[derive(Debug, thiserror::Error)]
pub enum EquipmentError {
    #[error(transparent)]
    Ownership(#[from] OwnershipError),
    #[error(transparent)]
    Loadout(#[from] LoadoutError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
