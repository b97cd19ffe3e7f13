// crates/faculty-core/src/options.rs

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::Result;

/// Options accepted by the synchronization entry points.
///
/// No option changes mapping behaviour yet. Keys are kept so that callers can
/// pass the settings intended for a persisting synchronization without
/// tripping a parse error.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SyncOptions {
    #[serde(flatten)]
    pub extra: toml::Table,
}

impl SyncOptions {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    pub fn is_empty(&self) -> bool {
        self.extra.is_empty()
    }

    pub(crate) fn log_ignored(&self) {
        for key in self.extra.keys() {
            debug!(option = %key, "Ignoring unrecognized sync option");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_options_parse() {
        let options = SyncOptions::from_toml_str("").expect("parse options");
        assert!(options.is_empty());
    }

    #[test]
    fn unknown_keys_are_retained() {
        let toml = r#"
dry_run = true

[mongo]
database = "faculty_db"
"#;

        let options = SyncOptions::from_toml_str(toml).expect("parse options");
        assert_eq!(options.extra.get("dry_run"), Some(&toml::Value::Boolean(true)));
        assert!(options.extra.contains_key("mongo"));
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = SyncOptions::from_toml_str("dry_run = ").unwrap_err();
        assert!(matches!(err, crate::SyncError::Options(_)));
    }
}
