//! Comparison configuration via `surrogate.toml`
//!
//! Projects that check many surrogates against their real implementations
//! keep the shared settings in one file: the default comparison mode and
//! any extra helper methods their own surrogate tooling adds.

use crate::error::{Error, Result};
use crate::helpers::HelperRegistry;
use crate::types::MethodKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name looked up by callers.
pub const CONFIG_FILE_NAME: &str = "surrogate.toml";

/// Extra helper method names, per namespace.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HelperConfig {
    /// Class-level helper names
    #[serde(default)]
    pub class: Vec<String>,
    /// Instance-level helper names
    #[serde(default)]
    pub instance: Vec<String>,
}

/// Configuration loaded from `surrogate.toml`.
///
/// # Example
///
/// ```toml
/// # Require an exact surface unless a caller says otherwise
/// subset = false
///
/// [helpers]
/// class = ["reset_all"]
/// instance = ["debug_dump"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SurrogateConfig {
    /// Default comparison mode: allow the actual type to have extra methods.
    #[serde(default)]
    pub subset: bool,
    /// Extra helper methods excluded from every comparison.
    #[serde(default)]
    pub helpers: HelperConfig,
}

impl SurrogateConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Surrogate configuration
#
# Comparison mode (default: false)
#   false = the real type must expose exactly the surrogate's public methods
#   true  = the real type may expose extra public methods
subset = false

# Helper methods added by your own tooling, excluded from comparisons.
# [helpers]
# class = []
# instance = []
"#
    }

    /// Parse config from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the content is not valid configuration.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// The configured helpers as a registry.
    pub fn helper_registry(&self) -> HelperRegistry {
        let mut registry = HelperRegistry::new();
        for name in &self.helpers.class {
            registry.register(MethodKind::Class, name.as_str());
        }
        for name in &self.helpers.instance {
            registry.register(MethodKind::Instance, name.as_str());
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_toml_parses_to_default() {
        let config = SurrogateConfig::from_toml_str(SurrogateConfig::default_toml()).unwrap();
        assert_eq!(config, SurrogateConfig::default());
        assert!(!config.subset);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SurrogateConfig::from_toml_str("").unwrap();
        assert!(!config.subset);
        assert!(config.helper_registry().is_empty());
    }

    #[test]
    fn test_helpers_section() {
        let config = SurrogateConfig::from_toml_str(
            r#"
subset = true

[helpers]
class = ["reset_all"]
instance = ["debug_dump", "trace_calls"]
"#,
        )
        .unwrap();
        assert!(config.subset);
        let registry = config.helper_registry();
        assert!(registry.is_helper(MethodKind::Class, "reset_all"));
        assert!(registry.is_helper(MethodKind::Instance, "trace_calls"));
        assert!(!registry.is_helper(MethodKind::Instance, "reset_all"));
    }

    #[test]
    fn test_invalid_config() {
        let err = SurrogateConfig::from_toml_str("subset = \"sometimes\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "subset = true").unwrap();
        drop(file);

        let config = SurrogateConfig::from_file(&path).unwrap();
        assert!(config.subset);
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SurrogateConfig::from_file(&dir.path().join(CONFIG_FILE_NAME)).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
