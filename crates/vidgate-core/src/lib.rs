//! Viewing-session engine for vidgate
//!
//! This crate is the heart of vidgate, containing:
//! - Daily-limit state derivation (Normal -> WindDown -> Grace -> Locked)
//! - Engagement weights derived from the watch-history ledger
//! - Duration-aware, novelty-balanced video selection
//! - The continue-vs-interrupt decision for in-progress playback
//! - Watch logging with the countable-time derivation
//!
//! Nothing here caches state across requests: every call re-derives the
//! day's summary from the ledger, so restarts and multiple instances agree.

mod engagement;
mod error;
mod interruption;
mod limits;
mod logger;
mod selector;
mod service;

pub use engagement::*;
pub use error::*;
pub use interruption::*;
pub use limits::*;
pub use logger::*;
pub use selector::*;
pub use service::*;
