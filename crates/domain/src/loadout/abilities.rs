//! Ability rules - initial ability assignment and ability-changing items.

use crate::aggregates::{Monster, Trainer};
use crate::catalog::{AbilityCatalog, AbilityItem, EffectCatalog};
use crate::value_objects::{AbilityName, AbilitySet, ItemCategory};

use super::LoadoutError;

/// The result of applying an ability item, ready to persist as one unit.
#[derive(Debug, Clone)]
pub struct AbilityChange {
    pub monster: Monster,
    pub trainer: Trainer,
    pub item: AbilityItem,
    pub previous: Option<AbilityName>,
    pub active: AbilityName,
    /// The monster had no ability triple and one was drawn first.
    pub synthesized: bool,
    /// The previous active ability was neither of the two known abilities.
    pub was_out_of_band: bool,
    pub message: String,
}

pub struct AbilityEngine<'a> {
    items: &'a EffectCatalog,
    abilities: &'a AbilityCatalog,
}

impl<'a> AbilityEngine<'a> {
    pub fn new(items: &'a EffectCatalog, abilities: &'a AbilityCatalog) -> Self {
        Self { items, abilities }
    }

    /// Give `monster` an initial ability triple if it has none.
    ///
    /// Returns the updated monster when a triple was drawn, `None` when the
    /// monster already had one.
    ///
    /// # Errors
    ///
    /// `CatalogExhausted` when the reference catalog has fewer than two
    /// abilities.
    pub fn ensure_abilities(
        &self,
        monster: &Monster,
        pick: impl FnMut(usize) -> usize,
    ) -> Result<Option<Monster>, LoadoutError> {
        if monster.abilities().is_some() {
            return Ok(None);
        }
        let (known1, known2) = self.abilities.draw_pair(pick)?;
        let mut monster = monster.clone();
        monster.assign_abilities(AbilitySet::new(known1, known2));
        Ok(Some(monster))
    }

    /// Consume one ability item from the trainer and change the monster's
    /// active ability.
    ///
    /// - `Ability Capsule`: active becomes known2 if it was known1, otherwise
    ///   known1 (including when it was some third ability)
    /// - `Scroll of Secrets`: active becomes `selected`, which must be in the
    ///   reference catalog but need not be known
    ///
    /// All input checks run before anything is changed.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for an unknown item, a missing selection, or a
    ///   selection not in the catalog
    /// - `InsufficientInventory` if the trainer has none of the item
    /// - `CatalogExhausted` if an initial triple is needed and cannot be drawn
    pub fn apply_item(
        &self,
        monster: &Monster,
        trainer: &Trainer,
        item_name: &str,
        selected: Option<&str>,
        pick: impl FnMut(usize) -> usize,
    ) -> Result<AbilityChange, LoadoutError> {
        let item_name = item_name.trim();
        if item_name.is_empty() {
            return Err(LoadoutError::invalid_input("Item name is required"));
        }
        let item = self
            .items
            .ability_item(item_name)
            .ok_or_else(|| LoadoutError::invalid_input(format!("Invalid item: {}", item_name)))?;
        if !trainer.inventory(ItemCategory::Items).has(item.name()) {
            return Err(LoadoutError::insufficient(item.name(), ItemCategory::Items));
        }

        let selection = if item.requires_selection() {
            let raw = selected
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| LoadoutError::invalid_input("Missing selected ability"))?;
            let entry = self.abilities.get(raw).ok_or_else(|| {
                LoadoutError::invalid_input(format!("Invalid ability selected: {}", raw))
            })?;
            Some(entry.name.clone())
        } else {
            None
        };

        let (mut monster, synthesized) = match self.ensure_abilities(monster, pick)? {
            Some(assigned) => (assigned, true),
            None => (monster.clone(), false),
        };
        let mut trainer = trainer.clone();

        let monster_name = monster.name().to_string();
        let abilities = monster.abilities_mut().ok_or_else(|| {
            LoadoutError::invalid_state(format!("{} has no abilities", monster_name))
        })?;

        let previous = abilities.active().cloned();
        let was_out_of_band = previous
            .as_ref()
            .is_some_and(|active| !abilities.knows(active));
        let active = match selection {
            Some(selected) => selected,
            None => match &previous {
                Some(current) if current == abilities.known1() => abilities.known2().clone(),
                _ => abilities.known1().clone(),
            },
        };
        abilities.set_active(active.clone());

        trainer
            .inventory_mut(ItemCategory::Items)
            .decrement(item.name(), 1);

        let message = match &previous {
            Some(old) => format!(
                "Changed {}'s ability from {} to {}",
                monster_name, old, active
            ),
            None => format!("Set {}'s ability to {}", monster_name, active),
        };

        Ok(AbilityChange {
            monster,
            trainer,
            item,
            previous,
            active,
            synthesized,
            was_out_of_band,
            message,
        })
    }
}
