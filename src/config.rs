//! Generator configuration.
//!
//! The defaults reproduce the naming conventions of the wait event catalog
//! shipped with the server: `WAIT_EVENT_` members, `WaitEvent*` classes,
//! `PG_WAIT_*` base constants and `pgstat_get_wait_*` lookup functions. A
//! JSON file can override any subset of the fields; unknown fields are
//! rejected so a typo cannot silently fall back to a default.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_EVENT_PREFIX: &str = "WAIT_EVENT_";
pub const DEFAULT_CLASS_PREFIX: &str = "WaitEvent";

/// Classes whose enumeration and lookup code is generated elsewhere. They are
/// still documented.
pub const DEFAULT_EXEMPT_CLASSES: [&str; 2] = ["WaitEventLWLock", "WaitEventLock"];

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Prefix every identifier of a code-generating class must carry.
    pub event_prefix: String,
    /// Prefix shared by class names; stripped to form short names.
    pub class_prefix: String,
    pub exempt_classes: Vec<String>,
    /// Prefix of the constant anchoring each enumeration's first member.
    pub base_constant_prefix: String,
    pub lookup_function_prefix: String,
    /// Initial value of every lookup function's result.
    pub unknown_event_name: String,
    /// Header included by the declarations artifact.
    pub base_header: String,
    pub types_file: String,
    pub lookup_file: String,
    pub docs_file: String,
    /// Catalog name quoted in the "do not edit" banners.
    pub source_label: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            event_prefix: DEFAULT_EVENT_PREFIX.to_string(),
            class_prefix: DEFAULT_CLASS_PREFIX.to_string(),
            exempt_classes: DEFAULT_EXEMPT_CLASSES
                .iter()
                .map(|name| name.to_string())
                .collect(),
            base_constant_prefix: "PG_WAIT_".to_string(),
            lookup_function_prefix: "pgstat_get_wait_".to_string(),
            unknown_event_name: "unknown wait event".to_string(),
            base_header: "utils/wait_event.h".to_string(),
            types_file: "wait_event_types.h".to_string(),
            lookup_file: "pgstat_wait_event.c".to_string(),
            docs_file: "wait_event_types.sgml".to_string(),
            source_label: "wait_event_names.txt".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Parse a configuration file and validate the merged result.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading generator config {}", path.display()))?;
        let config: GeneratorConfig = serde_json::from_str(&data)
            .with_context(|| format!("parsing generator config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("validating generator config {}", path.display()))?;
        Ok(config)
    }

    /// Load `path` when given, otherwise fall back to the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("event_prefix", &self.event_prefix),
            ("class_prefix", &self.class_prefix),
            ("base_constant_prefix", &self.base_constant_prefix),
            ("lookup_function_prefix", &self.lookup_function_prefix),
        ] {
            if value.is_empty() {
                bail!("{field} must not be empty");
            }
            if !is_identifier(value) {
                bail!("{field} must match ^[A-Za-z0-9_]+$, got {value}");
            }
        }

        if self.unknown_event_name.contains('"') || self.unknown_event_name.contains('\\') {
            bail!("unknown_event_name must not contain quotes or backslashes");
        }
        if self.base_header.trim().is_empty() {
            bail!("base_header must not be empty");
        }
        for (field, value) in [
            ("base_header", &self.base_header),
            ("source_label", &self.source_label),
        ] {
            if let Some(bad) = ["\"", "\n", "\r", "*/", "--"]
                .into_iter()
                .find(|token| value.contains(token))
            {
                bail!("{field} must not contain {bad:?}, got {value:?}");
            }
        }
        if self.exempt_classes.iter().any(|name| !is_identifier(name)) {
            bail!("exempt_classes must only contain class identifiers");
        }

        let files = [
            ("types_file", &self.types_file),
            ("lookup_file", &self.lookup_file),
            ("docs_file", &self.docs_file),
        ];
        for (field, value) in files {
            validate_file_name(field, value)?;
        }
        if self.types_file == self.lookup_file
            || self.types_file == self.docs_file
            || self.lookup_file == self.docs_file
        {
            bail!("types_file, lookup_file and docs_file must be distinct");
        }
        Ok(())
    }

    pub fn is_exempt(&self, class_name: &str) -> bool {
        self.exempt_classes.iter().any(|name| name == class_name)
    }

    /// Class name with the shared class prefix removed (`WaitEventIO` -> `IO`).
    pub fn short_class_name<'a>(&self, class_name: &'a str) -> &'a str {
        class_name
            .strip_prefix(self.class_prefix.as_str())
            .filter(|rest| !rest.is_empty())
            .unwrap_or(class_name)
    }
}

pub(crate) fn is_identifier(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn validate_file_name(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        bail!("{field} must not be empty");
    }
    let path = Path::new(value);
    if path.file_name().and_then(|name| name.to_str()) != Some(value) {
        bail!("{field} must be a plain file name, got {value}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_validate() {
        GeneratorConfig::default()
            .validate()
            .expect("defaults should validate");
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"event_prefix": "WE_", "docs_file": "events.sgml"}}"#).unwrap();
        let config = GeneratorConfig::load(file.path()).expect("config loads");
        assert_eq!(config.event_prefix, "WE_");
        assert_eq!(config.docs_file, "events.sgml");
        assert_eq!(config.class_prefix, DEFAULT_CLASS_PREFIX);
        assert!(config.is_exempt("WaitEventLock"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"event_prefx": "WE_"}}"#).unwrap();
        assert!(GeneratorConfig::load(file.path()).is_err());
    }

    #[test]
    fn rejects_paths_and_clashing_artifacts() {
        let mut config = GeneratorConfig {
            types_file: "../wait_event_types.h".to_string(),
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());

        config.types_file = "pgstat_wait_event.c".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_identifier_prefixes() {
        let config = GeneratorConfig {
            base_constant_prefix: "PG WAIT".to_string(),
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_comment_breaking_header_and_label() {
        for header in ["utils/\"wait_event.h", "utils/wait_event.h\n#define X"] {
            let config = GeneratorConfig {
                base_header: header.to_string(),
                ..GeneratorConfig::default()
            };
            assert!(config.validate().is_err(), "{header:?}");
        }
        for label in ["names.txt */ int x; /*", "names.txt -- x", "names.txt\r\n"] {
            let config = GeneratorConfig {
                source_label: label.to_string(),
                ..GeneratorConfig::default()
            };
            let err = config.validate().unwrap_err().to_string();
            assert!(err.contains("source_label"), "{err}");
        }
    }

    #[test]
    fn short_class_name_strips_prefix_only_when_present() {
        let config = GeneratorConfig::default();
        assert_eq!(config.short_class_name("WaitEventActivity"), "Activity");
        assert_eq!(config.short_class_name("Activity"), "Activity");
        assert_eq!(config.short_class_name("WaitEvent"), "WaitEvent");
    }
}
