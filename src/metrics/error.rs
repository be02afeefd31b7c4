//! Metrics error types.
//!
//! Calculator operations report missing or invalid data as `None`. These
//! errors only surface at the boundary where loosely typed input (JSON
//! records, strings) is turned into the typed model.

use thiserror::Error;

/// Errors that can occur while parsing metrics input.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Input could not be parsed as JSON.
    #[error("Malformed input: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Input parsed but has the wrong shape.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unrecognised pace zone name.
    #[error("Unknown pace zone: {0}")]
    UnknownPaceZone(String),

    /// Unrecognised class type.
    #[error("Unknown class type: {0}")]
    UnknownClassType(String),
}

/// Result type for metrics boundary operations.
pub type MetricsResult<T> = Result<T, MetricsError>;
