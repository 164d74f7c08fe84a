//! Error types for the evtc engine
//!
//! Malformed log *data* never produces an error: unmatched pairs are closed
//! or dropped and unresolved references become [`AgentId::UNKNOWN`]. The
//! variants here cover the two remaining classes: metadata a caller
//! unconditionally needs but the log does not carry, and misuse of the API.
//!
//! [`AgentId::UNKNOWN`]: crate::AgentId::UNKNOWN

use crate::types::AgentId;
use std::io;
use thiserror::Error;

/// Result type alias for evtc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the evtc engine
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (reading a configuration file)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration could not be parsed or failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// A metadata record required by the caller is absent from the log
    #[error("Missing metadata: {0}")]
    MissingMetadata(&'static str),

    /// Invalid use of the engine API (a programming error, not a data problem)
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// The API requires a real agent but was handed the unknown sentinel
    /// or an id that does not belong to this log
    #[error("Unknown agent: {0:?}")]
    UnknownAgent(AgentId),
}

impl Error {
    /// Shorthand for [`Error::InvalidOperation`]
    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Error::InvalidOperation(msg.into())
    }

    /// True for the error classes that signal a defect in the caller
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Error::InvalidOperation(_) | Error::UnknownAgent(_))
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
