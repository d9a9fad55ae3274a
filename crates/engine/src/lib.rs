//! Menagerie Engine library.
//!
//! Server-side loadout handling: held items, ability items and ability
//! lookups for trainers' monsters.
//!
//! ## Structure
//!
//! - `use_cases/` - ownership checks, locking and persistence around the domain engines
//! - `infrastructure/` - ports plus the SQLite roster, clock and locks
//! - `api/` - HTTP entry points
//! - `config` - environment configuration
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod config;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
