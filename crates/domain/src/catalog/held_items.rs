//! Held items - equipment a monster can carry, each with a stat-delta function.

use std::fmt;

use crate::aggregates::Monster;
use crate::value_objects::{Stat, StatDelta, StatField};

const ATK_EV: StatField = StatField::ev(Stat::Atk);
const DEF_EV: StatField = StatField::ev(Stat::Def);
const SPA_EV: StatField = StatField::ev(Stat::Spa);
const SPD_EV: StatField = StatField::ev(Stat::Spd);
const SPE_EV: StatField = StatField::ev(Stat::Spe);
const HP_EV: StatField = StatField::ev(Stat::Hp);
const SPE_IV: StatField = StatField::iv(Stat::Spe);

/// Every held item the engine manages.
///
/// Items without a stat effect are still members: holding them changes only
/// the monster's `held_item`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeldItem {
    IronPlating,
    QuickFeather,
    TempoBand,
    VeteransMedal,
    MuscleBand,
    WiseGlasses,
    BalancedShell,
    EchoCharm,
    Everstone,
    LuckyCharm,
}

impl HeldItem {
    pub const ALL: [HeldItem; 10] = [
        Self::IronPlating,
        Self::QuickFeather,
        Self::TempoBand,
        Self::VeteransMedal,
        Self::MuscleBand,
        Self::WiseGlasses,
        Self::BalancedShell,
        Self::EchoCharm,
        Self::Everstone,
        Self::LuckyCharm,
    ];

    /// Display name, which is also the inventory key.
    pub fn name(&self) -> &'static str {
        match self {
            Self::IronPlating => "Iron Plating",
            Self::QuickFeather => "Quick Feather",
            Self::TempoBand => "Tempo Band",
            Self::VeteransMedal => "Veteran's Medal",
            Self::MuscleBand => "Muscle Band",
            Self::WiseGlasses => "Wise Glasses",
            Self::BalancedShell => "Balanced Shell",
            Self::EchoCharm => "Echo Charm",
            Self::Everstone => "Everstone",
            Self::LuckyCharm => "Lucky Charm",
        }
    }

    /// The changes this item makes when equipped on `monster` as it is now.
    pub fn delta(&self, monster: &Monster) -> StatDelta {
        let stats = monster.stats();
        match self {
            Self::IronPlating => StatDelta::new().with(DEF_EV, 2).with(SPE_IV, -2),
            Self::QuickFeather => StatDelta::new().with(SPE_IV, 2),
            Self::TempoBand => {
                let half = i32::from(stats.get(SPE_EV) / 2);
                StatDelta::new().with(ATK_EV, half).with(SPA_EV, half)
            }
            Self::VeteransMedal => {
                StatDelta::new().with(HP_EV, i32::from(monster.level().value() / 4))
            }
            Self::MuscleBand => StatDelta::new().with(ATK_EV, 10),
            Self::WiseGlasses => StatDelta::new().with(SPA_EV, 10),
            Self::BalancedShell => StatDelta::new()
                .with(DEF_EV, 6)
                .with(SPD_EV, 6)
                .with(SPE_EV, -12),
            Self::EchoCharm => StatDelta::new().with(ATK_EV, i32::from(stats.get(ATK_EV) / 4)),
            Self::Everstone | Self::LuckyCharm => StatDelta::new(),
        }
    }

    /// Stat fields the delta function reads.
    pub fn reads(&self) -> &'static [StatField] {
        match self {
            Self::TempoBand => &[SPE_EV],
            Self::EchoCharm => &[ATK_EV],
            _ => &[],
        }
    }

    /// Stat fields the delta function may write.
    pub fn writes(&self) -> &'static [StatField] {
        match self {
            Self::IronPlating => &[DEF_EV, SPE_IV],
            Self::QuickFeather => &[SPE_IV],
            Self::TempoBand => &[ATK_EV, SPA_EV],
            Self::VeteransMedal => &[HP_EV],
            Self::MuscleBand => &[ATK_EV],
            Self::WiseGlasses => &[SPA_EV],
            Self::BalancedShell => &[DEF_EV, SPD_EV, SPE_EV],
            Self::EchoCharm => &[ATK_EV],
            Self::Everstone | Self::LuckyCharm => &[],
        }
    }

    /// Whether re-evaluating the delta after application yields the same
    /// delta, i.e. the function reads nothing it writes.
    pub fn is_recompute_safe(&self) -> bool {
        !self.reads().iter().any(|field| self.writes().contains(field))
    }
}

impl fmt::Display for HeldItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregates::test_support::monster_with;
    use crate::value_objects::StatSpread;

    #[test]
    fn test_tempo_band_reads_speed_investment() {
        let stats = StatSpread::new([0; 6], [0, 0, 0, 0, 0, 100]).unwrap();
        let monster = monster_with(stats, 40);

        let delta = HeldItem::TempoBand.delta(&monster);

        assert_eq!(delta.get(ATK_EV), 50);
        assert_eq!(delta.get(SPA_EV), 50);
        assert_eq!(delta.get(SPE_EV), 0);
    }

    #[test]
    fn test_veterans_medal_floors_level_quarter() {
        let monster = monster_with(StatSpread::default(), 43);
        assert_eq!(HeldItem::VeteransMedal.delta(&monster).get(HP_EV), 10);
    }

    #[test]
    fn test_effectless_items_have_empty_delta() {
        let monster = monster_with(StatSpread::default(), 10);
        assert!(HeldItem::Everstone.delta(&monster).is_empty());
        assert!(HeldItem::LuckyCharm.delta(&monster).is_empty());
    }

    #[test]
    fn test_deltas_only_touch_declared_fields() {
        let stats = StatSpread::new([20; 6], [120; 6]).unwrap();
        let monster = monster_with(stats, 60);
        for item in HeldItem::ALL {
            for (field, _) in item.delta(&monster).iter() {
                assert!(
                    item.writes().contains(&field),
                    "{} writes undeclared field {}",
                    item,
                    field
                );
            }
        }
    }

    #[test]
    fn test_only_echo_charm_is_self_referential() {
        let unsafe_items: Vec<HeldItem> = HeldItem::ALL
            .into_iter()
            .filter(|item| !item.is_recompute_safe())
            .collect();
        assert_eq!(unsafe_items, vec![HeldItem::EchoCharm]);
    }
}
