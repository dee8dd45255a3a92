//! Engine error types
//!
//! There is deliberately no transient/retryable class here: every error is
//! local to one request, and retry/backoff lives with the ingestion
//! collaborator, not in this engine.

use thiserror::Error;
use vidgate_store::StoreError;

/// Errors surfaced by the viewing-session engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// Missing or out-of-range settings. Fatal, never retried, never
    /// treated as "unlimited".
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Implausible or tampered watch-event payload. The request is
    /// rejected and logged; nothing is clamped or written.
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    /// No eligible video exists at all, even after relaxation. A
    /// user-visible no-content condition rather than a failure.
    #[error("No eligible videos available")]
    ServiceUnavailable,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

pub type EngineResult<T> = Result<T, EngineError>;
