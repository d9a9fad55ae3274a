//! StatSpread - the twelve bounded potential/investment values of a monster.
//!
//! # Invariants
//!
//! - every potential value is in `0..=31`
//! - every investment value is in `0..=252`
//!
//! Construction validates; every mutation clamps.

use super::stat::{Stat, StatDelta, StatField, StatPool};
use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatSpread {
    iv: [u16; 6],
    ev: [u16; 6],
}

fn slot(stat: Stat) -> usize {
    match stat {
        Stat::Hp => 0,
        Stat::Atk => 1,
        Stat::Def => 2,
        Stat::Spa => 3,
        Stat::Spd => 4,
        Stat::Spe => 5,
    }
}

impl StatSpread {
    /// Build a spread from raw values, rejecting anything out of bounds.
    ///
    /// Arrays are ordered hp, atk, def, spa, spd, spe.
    pub fn new(iv: [u16; 6], ev: [u16; 6]) -> Result<Self, DomainError> {
        for stat in Stat::ALL {
            let i = slot(stat);
            if iv[i] > StatPool::Potential.ceiling() {
                return Err(DomainError::validation(format!(
                    "{} must be between 0 and {}, got {}",
                    StatField::iv(stat),
                    StatPool::Potential.ceiling(),
                    iv[i]
                )));
            }
            if ev[i] > StatPool::Investment.ceiling() {
                return Err(DomainError::validation(format!(
                    "{} must be between 0 and {}, got {}",
                    StatField::ev(stat),
                    StatPool::Investment.ceiling(),
                    ev[i]
                )));
            }
        }
        Ok(Self { iv, ev })
    }

    pub fn get(&self, field: StatField) -> u16 {
        match field.pool {
            StatPool::Potential => self.iv[slot(field.stat)],
            StatPool::Investment => self.ev[slot(field.stat)],
        }
    }

    pub fn iv(&self, stat: Stat) -> u16 {
        self.iv[slot(stat)]
    }

    pub fn ev(&self, stat: Stat) -> u16 {
        self.ev[slot(stat)]
    }

    /// Set a field, clamping into its pool. Returns the stored value.
    pub fn set_clamped(&mut self, field: StatField, value: i32) -> u16 {
        let clamped = field.pool.clamp_value(value);
        match field.pool {
            StatPool::Potential => self.iv[slot(field.stat)] = clamped,
            StatPool::Investment => self.ev[slot(field.stat)] = clamped,
        }
        clamped
    }

    /// Add every entry of `delta`, clamping each field to its pool.
    ///
    /// Returns the change that actually landed, which differs from `delta`
    /// wherever a bound was hit.
    pub fn apply(&mut self, delta: &StatDelta) -> StatDelta {
        let mut effective = StatDelta::new();
        for (field, amount) in delta.iter() {
            let before = i32::from(self.get(field));
            let after = i32::from(self.set_clamped(field, before + amount));
            effective.add(field, after - before);
        }
        effective
    }

    /// Subtract every entry of `delta`, clamping each field to its pool.
    pub fn reverse(&mut self, delta: &StatDelta) -> StatDelta {
        self.apply(&delta.negated())
    }

    /// All twelve fields with their current values, potentials first.
    pub fn fields(&self) -> impl Iterator<Item = (StatField, u16)> + '_ {
        Stat::ALL
            .into_iter()
            .map(|stat| (StatField::iv(stat), self.iv(stat)))
            .chain(
                Stat::ALL
                    .into_iter()
                    .map(|stat| (StatField::ev(stat), self.ev(stat))),
            )
    }

    /// Whether every field is within its pool bounds.
    pub fn is_within_bounds(&self) -> bool {
        self.fields().all(|(field, value)| value <= field.pool.ceiling())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_out_of_bounds() {
        assert!(StatSpread::new([32, 0, 0, 0, 0, 0], [0; 6]).is_err());
        assert!(StatSpread::new([0; 6], [0, 0, 0, 0, 0, 253]).is_err());
        assert!(StatSpread::new([31; 6], [252; 6]).is_ok());
    }

    #[test]
    fn test_apply_clamps_at_ceiling_and_reports_effective_change() {
        let mut spread = StatSpread::new([0; 6], [0, 248, 0, 0, 0, 0]).unwrap();
        let delta = StatDelta::new().with(StatField::ev(Stat::Atk), 10);

        let effective = spread.apply(&delta);

        assert_eq!(spread.ev(Stat::Atk), 252);
        assert_eq!(effective.get(StatField::ev(Stat::Atk)), 4);
    }

    #[test]
    fn test_reverse_floors_at_zero() {
        let mut spread = StatSpread::new([1, 0, 0, 0, 0, 0], [0; 6]).unwrap();
        let delta = StatDelta::new().with(StatField::iv(Stat::Hp), 3);

        spread.reverse(&delta);

        assert_eq!(spread.iv(Stat::Hp), 0);
    }

    #[test]
    fn test_apply_then_reverse_effective_is_exact() {
        let original = StatSpread::new([30, 5, 5, 5, 5, 5], [10, 250, 0, 0, 0, 0]).unwrap();
        let mut spread = original;
        let delta = StatDelta::new()
            .with(StatField::ev(Stat::Atk), 10)
            .with(StatField::iv(Stat::Hp), 4);

        let effective = spread.apply(&delta);
        spread.reverse(&effective);

        assert_eq!(spread, original);
    }

    #[test]
    fn test_fields_lists_all_twelve() {
        let spread = StatSpread::default();
        assert_eq!(spread.fields().count(), 12);
        assert!(spread.is_within_bounds());
    }
}
