//! Error types for cppedit

use thiserror::Error;

/// Result type alias for cppedit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring highlighting or running the binary.
///
/// Highlighting a block never fails; every variant here is a setup-time
/// or I/O problem.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid pattern for rule `{name}`: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("unknown style tag: {0}")]
    UnknownTag(String),

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("{0}")]
    Message(String),
}
