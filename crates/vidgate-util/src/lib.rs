//! Shared utilities for vidgate
//!
//! This crate provides:
//! - The `VideoId` type (validated platform identifier format)
//! - UTC time utilities (day keys, duration formatting, mock time)
//! - Default paths for config and data directories

mod ids;
mod paths;
mod time;

pub use ids::*;
pub use paths::*;
pub use time::*;
