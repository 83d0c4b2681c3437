//! Error types for the audio switching tool

use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum Error {
    #[error("{what} not found")]
    NotFound { what: String },

    #[error("{0}")]
    Unsupported(String),

    #[error("{context} failed with status {status}")]
    Platform { status: i32, context: String },

    #[error("Discovery error: {0}")]
    Discovery(String),

    /// At least one sub-operation of an `all`-type command failed; the
    /// per-operation diagnostics were already emitted.
    #[error("one or more device operations failed")]
    Partial,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// A selection criterion matched no device.
    pub fn not_found(what: impl Into<String>) -> Self {
        Error::NotFound { what: what.into() }
    }

    /// Diagnostic to print for a failed invocation. `None` for aggregate
    /// failures, whose per-operation diagnostics already went out.
    pub fn user_message(&self) -> Option<String> {
        match self {
            Error::Partial => None,
            other => Some(other.to_string()),
        }
    }

    /// A host property or discovery call returned a nonzero status.
    pub fn platform(status: i32, context: impl Into<String>) -> Self {
        Error::Platform {
            status,
            context: context.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
