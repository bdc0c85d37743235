//! Error types for surrogate
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Absence is data, not an error, almost everywhere: a method missing from
//! one side of a comparison or a call that never happened shows up in the
//! result types. The variants below are the cases where absence or
//! malformed input has to be surfaced to the caller.

use crate::types::{MethodKind, Side};
use std::io;
use thiserror::Error;

/// Result type alias for surrogate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for surrogate
#[derive(Debug, Error)]
pub enum Error {
    /// A parameter signature was requested for a side the method is not on
    #[error("no {kind} method `{method}` on the {side} to check the signature of")]
    NoSignature {
        /// Method name
        method: String,
        /// Namespace the method was looked up in
        kind: MethodKind,
        /// Which definition was missing the method
        side: Side,
    },

    /// A comparer was given something that is not a usable type definition
    #[error("invalid comparison target: {0}")]
    InvalidComparisonTarget(String),

    /// A formal parameter could not be parsed
    #[error("malformed parameter `{parameter}`: {reason}")]
    MalformedParameter {
        /// The offending parameter text
        parameter: String,
        /// Why it was rejected
        reason: String,
    },

    /// A surrogate was asked to dispatch a method it does not define
    #[error("undefined {kind} method `{method}`")]
    UnknownMethod {
        /// Method name
        method: String,
        /// Namespace the method was dispatched in
        kind: MethodKind,
    },

    /// A queue of scripted return values ran dry
    #[error("no more values queued for `{method}`")]
    DefaultsExhausted {
        /// Method whose queue is empty
        method: String,
    },

    /// A method was scripted to fail
    #[error("{message}")]
    ScriptedFailure {
        /// Method that was scripted to fail
        method: String,
        /// The scripted error message
        message: String,
    },

    /// Configuration could not be read or parsed
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error (reading configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Create an `InvalidComparisonTarget` error
    pub fn invalid_target(reason: impl Into<String>) -> Self {
        Error::InvalidComparisonTarget(reason.into())
    }

    /// Create a `MalformedParameter` error
    pub fn malformed(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a `NoSignature` error
    pub fn is_no_signature(&self) -> bool {
        matches!(self, Error::NoSignature { .. })
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
