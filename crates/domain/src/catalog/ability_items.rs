//! Ability-changing items, consumed from the generic items inventory.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbilityItem {
    /// Flips the active ability between the two known abilities.
    AbilityCapsule,
    /// Sets the active ability to any ability in the reference catalog.
    ScrollOfSecrets,
}

impl AbilityItem {
    pub const ALL: [AbilityItem; 2] = [Self::AbilityCapsule, Self::ScrollOfSecrets];

    pub fn name(&self) -> &'static str {
        match self {
            Self::AbilityCapsule => "Ability Capsule",
            Self::ScrollOfSecrets => "Scroll of Secrets",
        }
    }

    /// Whether the caller must name the ability to switch to.
    pub fn requires_selection(&self) -> bool {
        matches!(self, Self::ScrollOfSecrets)
    }
}

impl fmt::Display for AbilityItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
