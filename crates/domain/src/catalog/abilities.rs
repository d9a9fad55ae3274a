//! Ability reference catalog - the read-only list of valid ability names.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::CatalogError;
use crate::loadout::LoadoutError;
use crate::value_objects::AbilityName;

/// One catalog ability with its rules text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityEntry {
    pub name: AbilityName,
    #[serde(default)]
    pub effect: String,
}

impl AbilityEntry {
    pub fn new(name: AbilityName, effect: impl Into<String>) -> Self {
        Self {
            name,
            effect: effect.into(),
        }
    }
}

const BUILTIN_ABILITIES: &[(&str, &str)] = &[
    ("Adaptability", "Powers up moves of the same type as the monster."),
    ("Blaze", "Powers up Fire-type moves when HP is low."),
    ("Chlorophyll", "Boosts Speed in harsh sunlight."),
    ("Clear Body", "Prevents other monsters from lowering its stats."),
    ("Compound Eyes", "Boosts the accuracy of moves."),
    ("Cursed Body", "May disable a move used on the monster."),
    ("Guts", "Boosts Attack when afflicted by a status condition."),
    ("Huge Power", "Doubles the monster's Attack stat."),
    ("Hustle", "Boosts Attack but lowers accuracy."),
    ("Inner Focus", "Protects the monster from flinching."),
    ("Intimidate", "Lowers the foe's Attack stat on entry."),
    ("Keen Eye", "Prevents other monsters from lowering accuracy."),
    ("Levitate", "Gives full immunity to Ground-type moves."),
    ("Magic Guard", "Only takes damage from attacks."),
    ("Moxie", "Boosts Attack after knocking out a foe."),
    ("Multiscale", "Reduces damage taken while HP is full."),
    ("Natural Cure", "Heals status conditions when switching out."),
    ("Overgrow", "Powers up Grass-type moves when HP is low."),
    ("Pressure", "Raises the PP the foe uses for its moves."),
    ("Regenerator", "Restores a little HP when switching out."),
    ("Run Away", "Enables a sure getaway from wild monsters."),
    ("Sand Veil", "Boosts evasion in a sandstorm."),
    ("Serene Grace", "Boosts the likelihood of added effects."),
    ("Shed Skin", "May heal its own status conditions."),
    ("Sheer Force", "Removes added effects to increase move damage."),
    ("Sturdy", "Cannot be knocked out with one hit from full HP."),
    ("Swift Swim", "Boosts Speed in rain."),
    ("Synchronize", "Passes on burn, poison, or paralysis to the foe."),
    ("Technician", "Powers up the monster's weaker moves."),
    ("Torrent", "Powers up Water-type moves when HP is low."),
];

/// Read-only list of valid abilities, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AbilityCatalog {
    entries: Vec<AbilityEntry>,
    by_name: HashMap<String, usize>,
}

impl AbilityCatalog {
    /// Validate and index a list of abilities.
    ///
    /// # Errors
    ///
    /// `CatalogError::DuplicateName` if two entries share a name.
    pub fn from_entries(entries: Vec<AbilityEntry>) -> Result<Self, CatalogError> {
        let mut by_name = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if by_name.insert(entry.name.as_str().to_string(), i).is_some() {
                return Err(CatalogError::DuplicateName(entry.name.to_string()));
            }
        }
        Ok(Self { entries, by_name })
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        let entries = BUILTIN_ABILITIES
            .iter()
            .map(|(name, effect)| {
                AbilityName::new(*name)
                    .map(|name| AbilityEntry::new(name, *effect))
                    .map_err(|e| CatalogError::InvalidEntry(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_entries(entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&AbilityEntry> {
        self.by_name.get(name.trim()).map(|i| &self.entries[*i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Rules text for `name`, if the catalog knows it.
    pub fn description(&self, name: &str) -> Option<&str> {
        self.get(name).map(|entry| entry.effect.as_str())
    }

    /// All entries ordered by name.
    pub fn sorted(&self) -> Vec<&AbilityEntry> {
        let mut sorted: Vec<&AbilityEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        sorted
    }

    /// Draw two distinct abilities.
    ///
    /// `pick(n)` must return an index in `0..n`; callers inject their RNG.
    ///
    /// # Errors
    ///
    /// `LoadoutError::CatalogExhausted` when fewer than two abilities exist.
    pub fn draw_pair(
        &self,
        mut pick: impl FnMut(usize) -> usize,
    ) -> Result<(AbilityName, AbilityName), LoadoutError> {
        let n = self.entries.len();
        if n < 2 {
            return Err(LoadoutError::CatalogExhausted { available: n });
        }
        let first = pick(n).min(n - 1);
        let mut second = pick(n - 1).min(n - 2);
        if second >= first {
            second += 1;
        }
        Ok((
            self.entries[first].name.clone(),
            self.entries[second].name.clone(),
        ))
    }
}
