//! Ability use cases.
//!
//! Applying ability items, and reading a monster's abilities or the full
//! ability reference list.

use std::sync::Arc;

use menagerie_domain::{AbilityCatalog, AbilityName};

mod apply_ability_item;
mod check_abilities;
mod error;
mod list_abilities;

pub use apply_ability_item::ApplyAbilityItem;
pub use check_abilities::{AbilityReport, CheckAbilities};
pub use error::AbilityItemError;
pub use list_abilities::ListAbilities;

pub const NO_DESCRIPTION: &str = "No description available";

/// Container for ability use cases.
pub struct AbilityUseCases {
    pub apply: Arc<ApplyAbilityItem>,
    pub check: Arc<CheckAbilities>,
    pub list: Arc<ListAbilities>,
}

impl AbilityUseCases {
    pub fn new(
        apply: Arc<ApplyAbilityItem>,
        check: Arc<CheckAbilities>,
        list: Arc<ListAbilities>,
    ) -> Self {
        Self { apply, check, list }
    }
}

/// An ability name with its catalog description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribedAbility {
    pub name: AbilityName,
    pub description: String,
}

impl DescribedAbility {
    fn lookup(catalog: &AbilityCatalog, name: &AbilityName) -> Self {
        let description = catalog
            .description(name.as_str())
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(NO_DESCRIPTION);
        Self {
            name: name.clone(),
            description: description.to_string(),
        }
    }
}
