#![forbid(unsafe_code)]

//! Store configuration.
//!
//! Configuration is plain data with serde defaults, so partial files are fine:
//!
//! ```json
//! { "clone_payloads": false, "naming": { "lazy_suffix": "modal" } }
//! ```
//!
//! Every loader validates the result. TOML files require the `toml-config`
//! feature.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ModalError;
use crate::naming::NamingConvention;

/// Label of the built-in loading placeholder.
pub const DEFAULT_SPINNER_LABEL: &str = "Loading...";

/// Tunables for a [`ModalStore`](crate::store::ModalStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalConfig {
    /// Identifier suffixes used by discovery.
    pub naming: NamingConvention,
    /// Deep-copy payloads through JSON on open. When off, every payload is
    /// passed by reference.
    pub clone_payloads: bool,
    /// Label of the built-in placeholder.
    pub spinner_label: String,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            naming: NamingConvention::default(),
            clone_payloads: true,
            spinner_label: DEFAULT_SPINNER_LABEL.to_owned(),
        }
    }
}

impl ModalConfig {
    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ModalError> {
        self.naming.validate()
    }

    /// Parse and validate JSON.
    pub fn from_json_str(input: &str) -> Result<Self, ModalError> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate TOML.
    #[cfg(feature = "toml-config")]
    pub fn from_toml_str(input: &str) -> Result<Self, ModalError> {
        let config: Self =
            toml::from_str(input).map_err(|err| ModalError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a `.json` (or, with `toml-config`, `.toml`) file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModalError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&input),
            #[cfg(feature = "toml-config")]
            Some("toml") => Self::from_toml_str(&input),
            _ => Err(ModalError::Config(format!(
                "unsupported config file: {}",
                path.display()
            ))),
        }
    }
}
