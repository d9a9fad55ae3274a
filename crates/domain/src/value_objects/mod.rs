//! Value objects - Immutable objects defined by their attributes

mod ability_set;
mod inventory;
mod level;
mod names;
mod stat;
mod stat_spread;

pub use ability_set::AbilitySet;
pub use inventory::{Inventories, Inventory, ItemCategory};
pub use level::{Level, MAX_LEVEL};
pub use names::{AbilityName, MonsterName, TrainerName};
pub use stat::{Stat, StatDelta, StatField, StatPool};
pub use stat_spread::StatSpread;
