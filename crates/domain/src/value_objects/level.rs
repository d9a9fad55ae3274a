//! Level value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

pub const MAX_LEVEL: u8 = 100;

/// A monster level in `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    pub fn new(value: u8) -> Result<Self, DomainError> {
        if value == 0 || value > MAX_LEVEL {
            return Err(DomainError::validation(format!(
                "Level must be between 1 and {}, got {}",
                MAX_LEVEL, value
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Level {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> u8 {
        level.0
    }
}
