//! Validated name newtypes for domain entities
//!
//! These newtypes ensure that names are valid by construction:
//! - Non-empty
//! - Within length limits
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for name fields
const MAX_NAME_LENGTH: usize = 200;

macro_rules! define_name {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// # Errors
            ///
            /// Returns `DomainError::Validation` if the name is empty after
            /// trimming or exceeds 200 characters.
            pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
                let name = name.into();
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::validation(concat!($label, " cannot be empty")));
                }
                if trimmed.len() > MAX_NAME_LENGTH {
                    return Err(DomainError::validation(format!(
                        "{} cannot exceed {} characters",
                        $label, MAX_NAME_LENGTH
                    )));
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Returns the name as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(name: $name) -> String {
                name.0
            }
        }
    };
}

define_name!(
    /// A validated monster nickname
    MonsterName,
    "Monster name"
);

define_name!(
    /// A validated trainer name
    TrainerName,
    "Trainer name"
);

define_name!(
    /// A validated ability name. Membership in the reference catalog is
    /// checked separately by [`crate::catalog::AbilityCatalog`].
    AbilityName,
    "Ability name"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_trimmed() {
        let name = AbilityName::new("  Run Away ").unwrap();
        assert_eq!(name.as_str(), "Run Away");
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = MonsterName::new("   ").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: Monster name cannot be empty"
        );
    }

    #[test]
    fn test_long_name_rejected() {
        assert!(TrainerName::new("x".repeat(201)).is_err());
    }

    #[test]
    fn test_serde_validates() {
        assert!(serde_json::from_str::<AbilityName>(r#""""#).is_err());
        let name: AbilityName = serde_json::from_str(r#""Levitate""#).unwrap();
        assert_eq!(name.as_str(), "Levitate");
    }
}
