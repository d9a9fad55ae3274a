//! List abilities use case.

use std::sync::Arc;

use menagerie_domain::AbilityCatalog;

use super::DescribedAbility;

pub struct ListAbilities {
    abilities: Arc<AbilityCatalog>,
}

impl ListAbilities {
    pub fn new(abilities: Arc<AbilityCatalog>) -> Self {
        Self { abilities }
    }

    /// Every ability in the reference catalog, sorted by name.
    pub fn execute(&self) -> Vec<DescribedAbility> {
        self.abilities
            .sorted()
            .into_iter()
            .map(|entry| DescribedAbility::lookup(&self.abilities, &entry.name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menagerie_domain::{AbilityEntry, AbilityName};

    #[test]
    fn abilities_are_sorted_by_name() {
        let name = |s: &str| AbilityName::new(s).unwrap();
        let catalog = AbilityCatalog::from_entries(vec![
            AbilityEntry::new(name("Sturdy"), "Survives a hit"),
            AbilityEntry::new(name("Blaze"), "Fire boost"),
            AbilityEntry::new(name("Levitate"), ""),
        ])
        .unwrap();

        let listed = ListAbilities::new(Arc::new(catalog)).execute();

        let names: Vec<&str> = listed.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Blaze", "Levitate", "Sturdy"]);
        assert_eq!(listed[1].description, "No description available");
    }
}
