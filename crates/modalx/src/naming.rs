#![forbid(unsafe_code)]

//! Module identifier convention.
//!
//! Discovered modules are keyed by path-like identifiers of the form
//! `<dir>/<name>[.<group>].<suffix>`. The suffix selects the [`ModuleKind`]; the
//! first dotted segment of the file stem is the modal (or spinner) name and the
//! optional second segment is its group.
//!
//! ```
//! use modalx::naming::{ModuleKind, NamingConvention};
//!
//! let naming = NamingConvention::default();
//! let parsed = naming.parse("src/modals/profile.users.amdl", ModuleKind::Lazy).unwrap();
//! assert_eq!(parsed.name, "profile");
//! assert_eq!(parsed.group.as_deref(), Some("users"));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ModalError;

/// What a discovered module provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    /// A modal resolved on first open and loaded on first render.
    Lazy,
    /// A modal loaded eagerly at install time.
    Eager,
    /// A placeholder for one modal name or group.
    Spinner,
    /// The fallback placeholder for every modal.
    GlobalSpinner,
}

/// Name and optional group recovered from an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleName {
    pub name: String,
    pub group: Option<String>,
}

/// Suffixes for each [`ModuleKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConvention {
    pub lazy_suffix: String,
    pub eager_suffix: String,
    pub spinner_suffix: String,
    pub global_spinner_suffix: String,
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self {
            lazy_suffix: "amdl".into(),
            eager_suffix: "mdl".into(),
            spinner_suffix: "s".into(),
            global_spinner_suffix: "g".into(),
        }
    }
}

impl NamingConvention {
    /// The suffix used for `kind`.
    #[must_use]
    pub fn suffix(&self, kind: ModuleKind) -> &str {
        match kind {
            ModuleKind::Lazy => &self.lazy_suffix,
            ModuleKind::Eager => &self.eager_suffix,
            ModuleKind::Spinner => &self.spinner_suffix,
            ModuleKind::GlobalSpinner => &self.global_spinner_suffix,
        }
    }

    /// Parse `identifier` as a module of `kind`.
    #[must_use]
    pub fn parse(&self, identifier: &str, kind: ModuleKind) -> Option<ModuleName> {
        parse_identifier(identifier, self.suffix(kind))
    }

    /// Reject empty, dotted, slashed or duplicate suffixes.
    pub fn validate(&self) -> Result<(), ModalError> {
        let suffixes = [
            &self.lazy_suffix,
            &self.eager_suffix,
            &self.spinner_suffix,
            &self.global_spinner_suffix,
        ];
        for (i, suffix) in suffixes.iter().enumerate() {
            if suffix.is_empty() {
                return Err(ModalError::Config("module suffix must not be empty".into()));
            }
            if suffix.contains(['.', '/']) {
                return Err(ModalError::Config(format!(
                    "module suffix `{suffix}` must not contain `.` or `/`"
                )));
            }
            if suffixes[..i].contains(suffix) {
                return Err(ModalError::Config(format!(
                    "module suffix `{suffix}` is used twice"
                )));
            }
        }
        Ok(())
    }
}

/// Parse `<dir>/<name>[.<group>].<suffix>`.
///
/// Returns `None` when the identifier does not end in `.<suffix>` or has an
/// empty name.
#[must_use]
pub fn parse_identifier(identifier: &str, suffix: &str) -> Option<ModuleName> {
    let file = identifier.rsplit('/').next().unwrap_or(identifier);
    let stem = file.strip_suffix(suffix)?.strip_suffix('.')?;
    let mut parts = stem.split('.');
    let name = parts.next().filter(|n| !n.is_empty())?;
    let group = parts.next().filter(|g| !g.is_empty()).map(str::to_owned);
    Some(ModuleName {
        name: name.to_owned(),
        group,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_without_group() {
        let parsed = parse_identifier("/src/modals/Confirm.amdl", "amdl");
        assert_eq!(
            parsed,
            Some(ModuleName {
                name: "Confirm".into(),
                group: None
            })
        );
    }

    #[test]
    fn parses_group() {
        let parsed = parse_identifier("a/b/profile.users.s", "s").unwrap();
        assert_eq!(parsed.name, "profile");
        assert_eq!(parsed.group.as_deref(), Some("users"));
    }

    #[test]
    fn identifier_without_directory() {
        let parsed = parse_identifier("confirm.mdl", "mdl").unwrap();
        assert_eq!(parsed.name, "confirm");
    }

    #[test]
    fn suffix_must_be_a_whole_segment() {
        assert!(parse_identifier("modals/profile.amdl", "mdl").is_none());
        assert!(parse_identifier("modals/profileamdl", "amdl").is_none());
        assert!(parse_identifier("modals/.amdl", "amdl").is_none());
    }

    #[test]
    fn kinds_use_their_own_suffix() {
        let naming = NamingConvention::default();
        assert!(naming.parse("x/a.g", ModuleKind::GlobalSpinner).is_some());
        assert!(naming.parse("x/a.g", ModuleKind::Spinner).is_none());
        assert!(naming.parse("x/a.mdl", ModuleKind::Eager).is_some());
        assert!(naming.parse("x/a.mdl", ModuleKind::Lazy).is_none());
    }

    #[test]
    fn validate_rejects_bad_suffixes() {
        assert!(NamingConvention::default().validate().is_ok());

        let dotted = NamingConvention {
            lazy_suffix: "a.mdl".into(),
            ..NamingConvention::default()
        };
        assert!(matches!(dotted.validate(), Err(ModalError::Config(_))));

        let duplicate = NamingConvention {
            spinner_suffix: "g".into(),
            ..NamingConvention::default()
        };
        assert!(matches!(duplicate.validate(), Err(ModalError::Config(_))));

        let empty = NamingConvention {
            eager_suffix: String::new(),
            ..NamingConvention::default()
        };
        assert!(empty.validate().is_err());
    }
}
