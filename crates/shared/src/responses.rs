//! Response bodies for the loadout API
//!
//! Every body carries a `success` flag. Failures add a machine-readable
//! [`ErrorKind`] next to the human-readable message.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Success Envelope
// =============================================================================

/// Result of a loadout change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

impl ActionResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

// =============================================================================
// Error Envelope
// =============================================================================

/// Error classification for failed requests
///
/// Each kind maps to exactly one HTTP status in the engine's HTTP layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No caller identity on the request
    NotAuthenticated,
    /// Trainer or monster does not exist
    NotFound,
    /// Caller does not own the trainer, or the monster is not the trainer's
    Forbidden,
    /// Missing field, unknown item or unknown ability
    InvalidInput,
    /// The trainer has none of the requested item
    InsufficientInventory,
    /// The monster is not in a state the operation applies to
    InvalidState,
    /// Too few abilities to draw an initial pair from
    CatalogExhausted,
    /// A concurrent writer changed the records first
    Conflict,
    /// Anything else
    Internal,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 9] = [
        Self::NotAuthenticated,
        Self::NotFound,
        Self::Forbidden,
        Self::InvalidInput,
        Self::InsufficientInventory,
        Self::InvalidState,
        Self::CatalogExhausted,
        Self::Conflict,
        Self::Internal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => "not_authenticated",
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::InvalidInput => "invalid_input",
            Self::InsufficientInventory => "insufficient_inventory",
            Self::InvalidState => "invalid_state",
            Self::CatalogExhausted => "catalog_exhausted",
            Self::Conflict => "conflict",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown error kind: {0}")]
pub struct UnknownErrorKind(pub String);

impl FromStr for ErrorKind {
    type Err = UnknownErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownErrorKind(s.to_string()))
    }
}

/// Failed request body: `{success: false, error, message}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorKind,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error,
            message: message.into(),
        }
    }
}

// =============================================================================
// Ability Queries
// =============================================================================

/// One entry of the ability reference list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityView {
    pub name: String,
    pub effect: String,
}

/// `GET /api/monsters/{monster_id}/abilities`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilitiesResponse {
    pub success: bool,
    /// `None` for records whose active ability was never set
    pub ability: Option<String>,
    pub ability1: String,
    pub ability2: String,
    pub ability_description: String,
    pub ability1_description: String,
    pub ability2_description: String,
}

/// `GET /api/abilities`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityListResponse {
    pub success: bool,
    pub abilities: Vec<AbilityView>,
}

impl AbilityListResponse {
    pub fn new(abilities: Vec<AbilityView>) -> Self {
        Self {
            success: true,
            abilities,
        }
    }
}
