//! Ability operation errors.

use menagerie_domain::LoadoutError;

use crate::infrastructure::ports::RepoError;
use crate::use_cases::ownership::OwnershipError;

/// Errors that can occur while applying an ability item or reading a
/// monster's abilities.
#[derive(Debug, thiserror::Error)]
pub enum AbilityItemError {
    #[error(transparent)]
    Ownership(#[from] OwnershipError),
    #[error(transparent)]
    Loadout(#[from] LoadoutError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Log catalog exhaustion, the one rule failure that is a server fault.
pub(super) fn report_exhausted(err: LoadoutError) -> LoadoutError {
    if let LoadoutError::CatalogExhausted { available } = &err {
        tracing::error!(available = *available, "Ability catalog too small to draw initial abilities");
    }
    err
}
