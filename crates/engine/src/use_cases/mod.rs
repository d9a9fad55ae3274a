//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area. Every
//! mutating use case runs the ownership guard first and persists through
//! the loadout store.

pub mod abilities;
pub mod equipment;
pub mod ownership;

pub use abilities::AbilityUseCases;
pub use equipment::EquipmentUseCases;
pub use ownership::{OwnershipError, OwnershipGuard};
