//! Stat value objects - the six battle stats, their two pools, and sparse deltas.
//!
//! Provides type safety for stat references instead of magic column names
//! like "spe_ev" or "atk_iv".

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// The six battle stats every monster carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    /// Hit points
    Hp,
    /// Physical attack
    Atk,
    /// Physical defense
    Def,
    /// Special attack
    Spa,
    /// Special defense
    Spd,
    /// Speed
    Spe,
}

impl Stat {
    pub const ALL: [Stat; 6] = [
        Self::Hp,
        Self::Atk,
        Self::Def,
        Self::Spa,
        Self::Spd,
        Self::Spe,
    ];

    /// Returns the short column prefix (e.g., "atk", "spe").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hp => "hp",
            Self::Atk => "atk",
            Self::Def => "def",
            Self::Spa => "spa",
            Self::Spd => "spd",
            Self::Spe => "spe",
        }
    }

    /// Returns the full name of the stat (e.g., "Special Attack").
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Hp => "HP",
            Self::Atk => "Attack",
            Self::Def => "Defense",
            Self::Spa => "Special Attack",
            Self::Spd => "Special Defense",
            Self::Spe => "Speed",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hp" => Ok(Self::Hp),
            "atk" | "attack" => Ok(Self::Atk),
            "def" | "defense" => Ok(Self::Def),
            "spa" | "spatk" | "special attack" => Ok(Self::Spa),
            "spd" | "spdef" | "special defense" => Ok(Self::Spd),
            "spe" | "speed" => Ok(Self::Spe),
            _ => Err(DomainError::parse(format!("Unknown stat: {}", s))),
        }
    }
}

/// Which of the two bounded pools a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatPool {
    /// Potential (`*_iv`), fixed at birth, 0..=31
    Potential,
    /// Investment (`*_ev`), trained, 0..=252
    Investment,
}

impl StatPool {
    /// Inclusive ceiling of the pool.
    pub fn ceiling(&self) -> u16 {
        match self {
            Self::Potential => 31,
            Self::Investment => 252,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Potential => "iv",
            Self::Investment => "ev",
        }
    }

    /// Clamp a signed intermediate value into the pool's bounds.
    pub fn clamp_value(&self, value: i32) -> u16 {
        value.clamp(0, i32::from(self.ceiling())) as u16
    }
}

/// A single stat column: a stat in a given pool (e.g., `spe_ev`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StatField {
    pub stat: Stat,
    pub pool: StatPool,
}

impl StatField {
    pub const fn iv(stat: Stat) -> Self {
        Self {
            stat,
            pool: StatPool::Potential,
        }
    }

    pub const fn ev(stat: Stat) -> Self {
        Self {
            stat,
            pool: StatPool::Investment,
        }
    }

    /// Column name as stored (e.g., "atk_ev").
    pub fn column(&self) -> String {
        format!("{}_{}", self.stat.as_str(), self.pool.suffix())
    }
}

impl fmt::Display for StatField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.stat, self.pool.suffix())
    }
}

impl FromStr for StatField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (stat, pool) = s
            .rsplit_once('_')
            .ok_or_else(|| DomainError::parse(format!("Unknown stat field: {}", s)))?;
        let pool = match pool {
            "iv" => StatPool::Potential,
            "ev" => StatPool::Investment,
            _ => return Err(DomainError::parse(format!("Unknown stat field: {}", s))),
        };
        Ok(Self {
            stat: stat.parse()?,
            pool,
        })
    }
}

impl TryFrom<String> for StatField {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<StatField> for String {
    fn from(field: StatField) -> String {
        field.to_string()
    }
}

/// A sparse set of signed per-field changes.
///
/// Fields absent from the map are unchanged. Zero entries are dropped so two
/// deltas with the same effect compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatDelta(BTreeMap<StatField, i32>);

impl StatDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; accumulates onto any existing entry.
    pub fn with(mut self, field: StatField, amount: i32) -> Self {
        self.add(field, amount);
        self
    }

    pub fn add(&mut self, field: StatField, amount: i32) {
        let entry = self.0.entry(field).or_insert(0);
        *entry += amount;
        if *entry == 0 {
            self.0.remove(&field);
        }
    }

    pub fn get(&self, field: StatField) -> i32 {
        self.0.get(&field).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatField, i32)> + '_ {
        self.0.iter().map(|(field, amount)| (*field, *amount))
    }

    /// The same changes with every sign flipped.
    pub fn negated(&self) -> Self {
        Self(self.0.iter().map(|(field, amount)| (*field, -amount)).collect())
    }
}

impl fmt::Display for StatDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("no stat changes");
        }
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, amount)| format!("{} {:+}", field, amount))
            .collect();
        f.write_str(&parts.join(", "))
    }
}
