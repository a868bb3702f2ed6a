//! Error types for cart snapshot sources.

use thiserror::Error;

/// Failures while obtaining a cart snapshot.
///
/// These never leave the detector: a failed read counts as "not ready".
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SnapshotError {
    /// The host state could not be reached at all.
    #[error("Cart state unavailable: {0}")]
    Unavailable(String),

    /// Reading the backing file failed.
    #[error("Cart state I/O error: {0}")]
    Io(String),

    /// The host state was not valid JSON.
    #[error("Cart state is not valid JSON: {0}")]
    Parse(String),
}

impl From<std::io::Error> for SnapshotError {
    fn from(e: std::io::Error) -> Self {
        SnapshotError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(e: serde_json::Error) -> Self {
        SnapshotError::Parse(e.to_string())
    }
}
