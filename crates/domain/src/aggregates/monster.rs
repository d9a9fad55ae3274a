//! Monster aggregate - a creature owned by exactly one trainer.
//!
//! # Invariants
//!
//! - every potential field is in `0..=31` and every investment field in
//!   `0..=252` (enforced by [`StatSpread`])
//! - `held_item`, when set, is the name the item is filed under in the
//!   trainer's held-item inventory
//!
//! Stats, the held item and the ability triple are only changed through the
//! loadout rules in [`crate::loadout`].

use serde::{Deserialize, Serialize};

use crate::ids::{MonsterId, TrainerId};
use crate::value_objects::{AbilitySet, Level, MonsterName, StatDelta, StatSpread};

/// The item a monster is holding, plus the change it made when equipped.
///
/// `applied` is the effective per-field change recorded at equip time.
/// Records written before it was tracked carry `None`, and removal then has
/// to recompute the delta from the monster's current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldItemSlot {
    name: String,
    applied: Option<StatDelta>,
}

impl HeldItemSlot {
    pub fn new(name: impl Into<String>, applied: StatDelta) -> Self {
        Self {
            name: name.into(),
            applied: Some(applied),
        }
    }

    /// A slot persisted without its applied change.
    pub fn legacy(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            applied: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn applied(&self) -> Option<&StatDelta> {
        self.applied.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monster {
    // Identity
    id: MonsterId,
    trainer_id: TrainerId,
    name: MonsterName,

    level: Level,
    stats: StatSpread,
    held_item: Option<HeldItemSlot>,
    abilities: Option<AbilitySet>,

    // Optimistic concurrency token, bumped by the store on every write
    version: i64,
}

impl Monster {
    pub fn new(trainer_id: TrainerId, name: MonsterName, level: Level, stats: StatSpread) -> Self {
        Self {
            id: MonsterId::new(),
            trainer_id,
            name,
            level,
            stats,
            held_item: None,
            abilities: None,
            version: 0,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> MonsterId {
        self.id
    }

    #[inline]
    pub fn trainer_id(&self) -> TrainerId {
        self.trainer_id
    }

    #[inline]
    pub fn name(&self) -> &MonsterName {
        &self.name
    }

    #[inline]
    pub fn level(&self) -> Level {
        self.level
    }

    #[inline]
    pub fn stats(&self) -> &StatSpread {
        &self.stats
    }

    #[inline]
    pub fn held_item(&self) -> Option<&HeldItemSlot> {
        self.held_item.as_ref()
    }

    #[inline]
    pub fn abilities(&self) -> Option<&AbilitySet> {
        self.abilities.as_ref()
    }

    #[inline]
    pub fn version(&self) -> i64 {
        self.version
    }

    // =========================================================================
    // Builder methods (rehydration from storage, fixtures)
    // =========================================================================

    pub fn with_id(mut self, id: MonsterId) -> Self {
        self.id = id;
        self
    }

    pub fn with_held_item(mut self, slot: Option<HeldItemSlot>) -> Self {
        self.held_item = slot;
        self
    }

    pub fn with_abilities(mut self, abilities: Option<AbilitySet>) -> Self {
        self.abilities = abilities;
        self
    }

    pub fn with_version(mut self, version: i64) -> Self {
        self.version = version;
        self
    }

    // =========================================================================
    // Loadout mutations
    // =========================================================================

    pub(crate) fn stats_mut(&mut self) -> &mut StatSpread {
        &mut self.stats
    }

    pub(crate) fn take_held_item(&mut self) -> Option<HeldItemSlot> {
        self.held_item.take()
    }

    pub(crate) fn set_held_item(&mut self, slot: HeldItemSlot) {
        self.held_item = Some(slot);
    }

    pub(crate) fn abilities_mut(&mut self) -> Option<&mut AbilitySet> {
        self.abilities.as_mut()
    }

    pub(crate) fn assign_abilities(&mut self, abilities: AbilitySet) {
        self.abilities = Some(abilities);
    }
}
