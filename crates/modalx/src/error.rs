#![forbid(unsafe_code)]

//! Error types.
//!
//! Stack operations (`open`, `close`, hook registration) never fail; they degrade
//! and log. Only loading, decoding and configuration surface these errors.

use std::fmt;

/// Failure reported by a module loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    message: String,
}

impl LoadError {
    /// Create a load error with a human-readable message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The loader's message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for LoadError {}

/// Errors from modal loading, payload decoding and configuration.
#[derive(Debug)]
pub enum ModalError {
    /// Discovery found no module for the name.
    NotFound { name: String },
    /// A module's loader failed.
    Load { name: String, source: LoadError },
    /// No name was given and none could be parsed from the identifier.
    Unnamed { identifier: String },
    /// Payload or option data did not match the requested type.
    Decode(serde_json::Error),
    /// Configuration was rejected.
    Config(String),
    /// A configuration file could not be read.
    Io(std::io::Error),
}

impl fmt::Display for ModalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { name } => write!(f, "no modal found with name [{name}]"),
            Self::Load { name, source } => write!(f, "failed to load modal [{name}]: {source}"),
            Self::Unnamed { identifier } => {
                write!(f, "cannot derive a modal name from `{identifier}`")
            }
            Self::Decode(err) => write!(f, "decode error: {err}"),
            Self::Config(msg) => write!(f, "invalid config: {msg}"),
            Self::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for ModalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load { source, .. } => Some(source),
            Self::Decode(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::NotFound { .. } | Self::Unnamed { .. } | Self::Config(_) => None,
        }
    }
}

impl From<serde_json::Error> for ModalError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err)
    }
}

impl From<std::io::Error> for ModalError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
