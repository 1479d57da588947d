//! Pipeline options.
//!
//! Options can be built in code or loaded from TOML:
//!
//! ```toml
//! tag_key = "check"
//! recurse = true
//! fail_fast = false
//! ```

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tag key read when none is configured.
pub const DEFAULT_TAG_KEY: &str = "validate";

/// Options controlling a validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineOptions {
    /// Tag key whose text holds the directives.
    pub tag_key: String,
    /// Whether to descend into nested records and records inside lists.
    pub recurse: bool,
    /// Whether to stop after the first field that fails.
    pub fail_fast: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            tag_key: DEFAULT_TAG_KEY.to_string(),
            recurse: true,
            fail_fast: false,
        }
    }
}

impl PipelineOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tag key.
    pub fn with_tag_key(mut self, tag_key: impl Into<String>) -> Self {
        self.tag_key = tag_key.into();
        self
    }

    /// Enable or disable descending into nested records.
    pub fn with_recurse(mut self, recurse: bool) -> Self {
        self.recurse = recurse;
        self
    }

    /// Enable or disable stopping at the first failing field.
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Parse options from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let options: PipelineOptions = toml::from_str(text)?;
        options.check()?;
        Ok(options)
    }

    /// Load options from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check the options are usable.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.tag_key.trim().is_empty() {
            return Err(ConfigError::EmptyTagKey);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let options = PipelineOptions::default();
        assert_eq!(options.tag_key, "validate");
        assert!(options.recurse);
        assert!(!options.fail_fast);
    }

    #[test]
    fn test_builder_setters() {
        let options = PipelineOptions::new()
            .with_tag_key("check")
            .with_recurse(false)
            .with_fail_fast(true);

        assert_eq!(options.tag_key, "check");
        assert!(!options.recurse);
        assert!(options.fail_fast);
    }

    #[test]
    fn test_from_toml_partial() {
        let options = PipelineOptions::from_toml_str("fail_fast = true").unwrap();
        assert_eq!(options.tag_key, DEFAULT_TAG_KEY);
        assert!(options.fail_fast);
    }

    #[test]
    fn test_from_toml_rejects_bad_input() {
        assert!(matches!(
            PipelineOptions::from_toml_str("tag_key = \"\""),
            Err(ConfigError::EmptyTagKey)
        ));
        assert!(matches!(
            PipelineOptions::from_toml_str("unknown = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tag_key = \"rules\"\nrecurse = false").unwrap();

        let options = PipelineOptions::from_file(file.path()).unwrap();
        assert_eq!(options.tag_key, "rules");
        assert!(!options.recurse);

        let missing = PipelineOptions::from_file("/nonexistent/tagcheck.toml");
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
