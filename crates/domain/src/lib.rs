//! Menagerie Domain - monsters, trainers, catalogs, and the loadout rules.
//!
//! ## Structure
//!
//! - `value_objects/` - stats, inventories, names, the ability triple
//! - `aggregates/` - `Monster` and `Trainer`
//! - `catalog/` - the held-item/ability-item registry and the ability list
//! - `loadout/` - the pure equipment and ability engines

extern crate self as menagerie_domain;

pub mod aggregates;
pub mod catalog;
pub mod error;
pub mod ids;
pub mod loadout;
pub mod value_objects;

pub use aggregates::{HeldItemSlot, Monster, Trainer};
pub use catalog::{
    AbilityCatalog, AbilityEntry, AbilityItem, CatalogError, Effect, EffectCatalog, HeldItem,
    Registration,
};
pub use error::DomainError;
pub use ids::{MonsterId, PlayerId, TrainerId};
pub use loadout::{
    AbilityChange, AbilityEngine, EquipmentChange, EquipmentEngine, LoadoutError, ReturnedItem,
    Reversal,
};
pub use value_objects::{
    AbilityName, AbilitySet, Inventories, Inventory, ItemCategory, Level, MonsterName, Stat,
    StatDelta, StatField, StatPool, StatSpread, TrainerName, MAX_LEVEL,
};
