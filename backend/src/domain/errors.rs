//! Domain error type surfaced to presentation layers.

use thiserror::Error;

/// Errors reported by the public service methods.
///
/// Low-level storage errors never cross this boundary raw: each public
/// method logs the underlying failure and wraps it in a `Storage` variant
/// naming the operation, so callers can tell *what* failed without knowing
/// the storage error type.
#[derive(Debug, Error)]
pub enum ReportError {
    /// An aggregation must have an owner; generation fails fast with no
    /// partial write when no profile has been set up.
    #[error("no user profile has been set up")]
    MissingProfile,

    /// Monthly generation was asked for a month outside 1..=12.
    #[error("invalid month: {0}")]
    InvalidMonth(u32),

    /// The import snapshot is malformed; rejected before any mutation.
    #[error("invalid backup format: {0}")]
    InvalidSnapshot(String),

    /// An underlying storage read/write failed.
    #[error("failed to {operation}")]
    Storage {
        operation: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ReportError {
    pub fn storage(operation: &'static str, source: anyhow::Error) -> Self {
        log::error!("Storage failure during {}: {:#}", operation, source);
        Self::Storage { operation, source }
    }
}

/// Result alias for public service methods.
pub type ReportResult<T> = Result<T, ReportError>;
