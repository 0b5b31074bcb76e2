//! Error types for the name network pipeline.

use thiserror::Error;

/// Errors raised while building, pruning, partitioning or writing a name network.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Malformed input row (e.g. a non-integer frequency or rank).
    #[error("data format error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Config file could not be decoded.
    #[error("config file error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value is out of range.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        name: &'static str,
        message: String,
    },

    /// Bigram ranks are not a bijection onto `1..=count`.
    #[error("bigram rank invariant violated: min rank {min}, max rank {max}, expected 1..={expected}")]
    RankInvariant {
        min: usize,
        max: usize,
        expected: usize,
    },

    /// A name contains a bigram the frequency index never saw.
    #[error("bigram '{bigram}' of name '{name}' is missing from the frequency index")]
    UnknownBigram {
        name: String,
        bigram: String,
    },
}

/// Result type for name network operations.
pub type Result<T> = std::result::Result<T, NetworkError>;
