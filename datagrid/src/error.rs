//! Error types

use thiserror::Error;

/// Errors raised while normalizing a grid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No row-key function was supplied.
    #[error("a row key function is required")]
    MissingRowKey,

    /// The length menu has no entries.
    #[error("length menu must not be empty")]
    EmptyLengthMenu,

    /// A page length of zero was configured.
    #[error("page lengths must be greater than zero")]
    ZeroLength,

    /// An initial order entry names a column that does not exist.
    #[error("unknown column name: {0}")]
    UnknownColumn(String),

    /// An initial order entry points past the last column.
    #[error("column index {index} out of range ({count} columns)")]
    ColumnOutOfRange {
        /// Requested column index.
        index: usize,
        /// Number of configured columns.
        count: usize,
    },

    /// Settings could not be parsed.
    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
}

/// Failure reported by a remote fetch collaborator.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct FetchError {
    /// Error message
    pub message: String,
}

impl FetchError {
    /// Create a new fetch error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<String> for FetchError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for FetchError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Top-level error type.
#[derive(Debug, Error)]
pub enum GridError {
    /// Configuration was rejected.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The fetch collaborator failed.
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// A spawned refresh task panicked.
    #[error("refresh task panicked: {message}")]
    RefreshPanicked {
        /// Panic payload, if it was a string.
        message: String,
    },
}
