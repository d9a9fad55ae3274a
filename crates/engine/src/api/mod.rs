//! API layer - HTTP entry points.

pub mod auth;
pub mod http;

pub use auth::Caller;
pub use http::{routes, ApiError};
