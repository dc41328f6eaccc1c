//! Error types for greener-nights.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can abort a merge run.
///
/// Every variant is fatal: the store file is never written once one of these
/// has been raised.
#[derive(Error, Debug)]
pub enum GreenerNightsError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Malformed record #{index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("Calendar store {} is corrupt: {reason}", path.display())]
    StoreCorrupt { path: PathBuf, reason: String },

    #[error("Could not access calendar store {}: {source}", path.display())]
    StoreIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not read input {}: {source}", path.display())]
    InputIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for greener-nights operations.
pub type GreenerNightsResult<T> = Result<T, GreenerNightsError>;
