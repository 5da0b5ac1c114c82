//! Error types for the VSM matching layer
//!
//! Match outcomes never produce errors: an unparseable numeric term, malformed
//! UTF-8 or an index without fields all end up as "no hits". The errors in
//! this module cover configuration and setup only.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use std::io;
use thiserror::Error;

/// Result type alias for VSM operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the VSM matching layer
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration text could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration is structurally valid but inconsistent
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// A field name was referenced that no field spec declares
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// A field spec named a search method we do not support
    #[error("Unknown search method: {0}")]
    UnknownSearchMethod(String),
}

impl Error {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Error::InvalidConfig(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }
}
