//! Aggregates - entities that own their invariants.

pub mod monster;
pub mod trainer;

pub use monster::{HeldItemSlot, Monster};
pub use trainer::Trainer;

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::ids::{PlayerId, TrainerId};
    use crate::value_objects::{Level, MonsterName, StatSpread, TrainerName};

    pub fn monster_with(stats: StatSpread, level: u8) -> Monster {
        Monster::new(
            TrainerId::new(),
            MonsterName::new("Sproutle").unwrap(),
            Level::new(level).unwrap(),
            stats,
        )
    }

    pub fn trainer() -> Trainer {
        Trainer::new(
            PlayerId::new("player-1").unwrap(),
            TrainerName::new("Ash").unwrap(),
        )
    }
}
