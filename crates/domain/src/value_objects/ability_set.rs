//! AbilitySet - the two abilities a monster knows plus the active one.

use serde::{Deserialize, Serialize};

use super::names::AbilityName;

/// A monster's ability triple.
///
/// `known1`/`known2` are fixed once assigned. `active` is normally one of
/// them, but a free-choice item may set it to any catalog ability, and rows
/// written before initial assignment defaulted the active slot may hold none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySet {
    active: Option<AbilityName>,
    known1: AbilityName,
    known2: AbilityName,
}

impl AbilitySet {
    /// A fresh triple with the first known ability active.
    pub fn new(known1: AbilityName, known2: AbilityName) -> Self {
        Self {
            active: Some(known1.clone()),
            known1,
            known2,
        }
    }

    /// Rehydrate a stored triple, including one without an active ability.
    pub fn from_parts(
        active: Option<AbilityName>,
        known1: AbilityName,
        known2: AbilityName,
    ) -> Self {
        Self {
            active,
            known1,
            known2,
        }
    }

    pub fn active(&self) -> Option<&AbilityName> {
        self.active.as_ref()
    }

    pub fn known1(&self) -> &AbilityName {
        &self.known1
    }

    pub fn known2(&self) -> &AbilityName {
        &self.known2
    }

    /// Whether `name` is one of the two known abilities.
    pub fn knows(&self, name: &AbilityName) -> bool {
        *name == self.known1 || *name == self.known2
    }

    /// Replace the active ability. The known pair is never touched.
    pub fn set_active(&mut self, ability: AbilityName) {
        self.active = Some(ability);
    }
}
