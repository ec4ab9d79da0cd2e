//! Error types for the move pool

use thiserror::Error;

/// Main error type for the move pool crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("move {value} is out of range (must be 0-8)")]
    InvalidMove { value: i32 },

    #[error("rotation of {degrees} degrees is not supported (expected 0, 90, 180 or 270)")]
    InvalidRotation { degrees: u16 },

    #[error("no available steps in pool")]
    EmptyPool,

    #[error("a draw of move {pending} is still waiting for feedback")]
    DrawPending { pending: usize },

    #[error("no pending draw to confirm")]
    NoPendingDraw,

    #[error("invalid step token '{token}': {source}")]
    ParseStep {
        token: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("history record declares {declared} values but only {available} are present")]
    TruncatedHistory { declared: u64, available: u64 },

    #[error("history record length field is incomplete: {available} of 8 bytes present")]
    TruncatedLength { available: usize },

    #[error("history record declares {declared} values, which exceeds addressable size")]
    HistoryTooLong { declared: u64 },

    #[error("configuration error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
