//! Loadout rules - the pure equipment and ability engines.
//!
//! Both engines read the catalogs, take the current monster and trainer by
//! reference, and return a complete updated pair plus a user-facing message.
//! Nothing is persisted here.

mod abilities;
mod equipment;
mod error;

pub use abilities::{AbilityChange, AbilityEngine};
pub use equipment::{EquipmentChange, EquipmentEngine, ReturnedItem, Reversal};
pub use error::LoadoutError;
