//! Catalogs - the immutable tables consulted by the loadout rules.
//!
//! - [`EffectCatalog`]: every named item with a managed effect, split into
//!   held items (stat deltas) and ability items (ability changes)
//! - [`AbilityCatalog`]: the reference list of valid ability names
//!
//! Both are built once at startup and shared read-only afterwards.

mod abilities;
mod ability_items;
mod held_items;

use std::collections::HashMap;

use thiserror::Error;

use crate::value_objects::ItemCategory;

pub use abilities::{AbilityCatalog, AbilityEntry};
pub use ability_items::AbilityItem;
pub use held_items::HeldItem;

/// Catalog load failures. Any of these aborts startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate catalog name: {0}")]
    DuplicateName(String),

    #[error("Catalog entry {name} registered under {registered}, but is only legal in {legal}")]
    WrongCategory {
        name: String,
        registered: ItemCategory,
        legal: ItemCategory,
    },

    #[error("Catalog entry registered as {registered:?} but the effect is named {actual:?}")]
    NameMismatch {
        registered: String,
        actual: &'static str,
    },

    #[error("Catalog is missing an entry for {0}")]
    Missing(&'static str),

    #[error("Invalid catalog entry: {0}")]
    InvalidEntry(String),
}

/// A managed item effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    Held(HeldItem),
    Ability(AbilityItem),
}

impl Effect {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Held(item) => item.name(),
            Self::Ability(item) => item.name(),
        }
    }

    /// The only inventory category this effect may be registered under.
    pub fn legal_category(&self) -> ItemCategory {
        match self {
            Self::Held(_) => ItemCategory::HeldItems,
            Self::Ability(_) => ItemCategory::Items,
        }
    }

    fn all() -> impl Iterator<Item = Effect> {
        HeldItem::ALL
            .into_iter()
            .map(Effect::Held)
            .chain(AbilityItem::ALL.into_iter().map(Effect::Ability))
    }
}

/// One row of the registry: the display name, the category it is filed
/// under, and the effect it resolves to.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub category: ItemCategory,
    pub effect: Effect,
}

impl Registration {
    pub fn new(name: impl Into<String>, category: ItemCategory, effect: Effect) -> Self {
        Self {
            name: name.into(),
            category,
            effect,
        }
    }
}

/// Name-keyed table of every managed item effect.
#[derive(Debug, Clone)]
pub struct EffectCatalog {
    entries: HashMap<String, Registration>,
}

impl EffectCatalog {
    /// Validate a registry.
    ///
    /// Every registration must be named exactly as its effect, be filed under
    /// the effect's legal category, and be unique; every effect must be
    /// registered. A misspelled or miscategorized entry therefore fails here
    /// rather than becoming a silent no-op at request time.
    pub fn from_registrations(registrations: Vec<Registration>) -> Result<Self, CatalogError> {
        let mut entries = HashMap::with_capacity(registrations.len());
        for registration in registrations {
            if registration.name.trim().is_empty() {
                return Err(CatalogError::InvalidEntry(
                    "catalog names cannot be empty".to_string(),
                ));
            }
            if registration.name != registration.effect.name() {
                return Err(CatalogError::NameMismatch {
                    registered: registration.name,
                    actual: registration.effect.name(),
                });
            }
            let legal = registration.effect.legal_category();
            if registration.category != legal {
                return Err(CatalogError::WrongCategory {
                    name: registration.name,
                    registered: registration.category,
                    legal,
                });
            }
            if entries.contains_key(&registration.name) {
                return Err(CatalogError::DuplicateName(registration.name));
            }
            entries.insert(registration.name.clone(), registration);
        }

        for effect in Effect::all() {
            if !entries.contains_key(effect.name()) {
                return Err(CatalogError::Missing(effect.name()));
            }
        }

        Ok(Self { entries })
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        let registrations = Effect::all()
            .map(|effect| Registration::new(effect.name(), effect.legal_category(), effect))
            .collect();
        Self::from_registrations(registrations)
    }

    /// Resolve a name to its effect, or `None` when the name has no managed
    /// effect.
    pub fn lookup(&self, name: &str) -> Option<Effect> {
        self.entries.get(name).map(|registration| registration.effect)
    }

    pub fn held_item(&self, name: &str) -> Option<HeldItem> {
        match self.lookup(name) {
            Some(Effect::Held(item)) => Some(item),
            _ => None,
        }
    }

    pub fn ability_item(&self, name: &str) -> Option<AbilityItem> {
        match self.lookup(name) {
            Some(Effect::Ability(item)) => Some(item),
            _ => None,
        }
    }

    /// Names registered under `category`, sorted.
    pub fn names_in(&self, category: ItemCategory) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .entries
            .values()
            .filter(|registration| registration.category == category)
            .map(|registration| registration.name.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}
