//! Shared types for the vidgate viewing-session engine
//!
//! This crate defines the stable surface between the engine and the routing
//! layer that fronts it:
//! - Catalog video view
//! - Viewing state and daily summary
//! - Watch-log requests and grid/status responses

mod types;

pub use types::*;

/// Current API version
pub const API_VERSION: u32 = 1;
