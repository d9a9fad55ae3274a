//! Menagerie Shared - wire types for the loadout API
//!
//! This crate contains the request and response bodies exchanged with the
//! HTTP edge:
//! - Loadout requests (held-item equip/remove, ability item use)
//! - Success and failure envelopes
//! - Ability query responses
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, uuid, serde_json, and thiserror
//! 2. **No business logic** - Pure data types and serialization
//! 3. **No domain IDs** - use raw `uuid::Uuid` in DTOs

pub mod requests;
pub mod responses;

pub use requests::{ApplyAbilityItemRequest, EquipAction, EquipRequest};
pub use responses::{
    AbilitiesResponse, AbilityListResponse, AbilityView, ActionResponse, ErrorKind,
    ErrorResponse, UnknownErrorKind,
};
