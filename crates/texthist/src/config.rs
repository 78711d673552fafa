#![forbid(unsafe_code)]

//! Configuration for the text history.
//!
//! Every field has a default matching the behavior of a stock text entry,
//! so `HistoryConfig::default()` needs no tuning. With the
//! `history-config` feature the configuration can also be loaded from
//! TOML or JSON:
//!
//! ```toml
//! max_undo_levels = 500
//! enabled = true
//!
//! [merge]
//! max_merged_chars = 1000
//! ```

#[cfg(feature = "history-config")]
use std::path::Path;

#[cfg(feature = "history-config")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Undo depth of a stock text entry.
pub const DEFAULT_MAX_UNDO_LEVELS: usize = 200;

/// Longest insertion run, in characters, that keystroke coalescing will
/// build outside a user transaction.
pub const DEFAULT_MAX_MERGED_CHARS: usize = 1000;

/// Configuration for insert coalescing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "history-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "history-config", serde(default))]
pub struct MergeConfig {
    /// Maximum merged insertion size before forcing a split.
    pub max_merged_chars: usize,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            max_merged_chars: DEFAULT_MAX_MERGED_CHARS,
        }
    }
}

/// Configuration for a [`TextHistory`](crate::TextHistory).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "history-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "history-config", serde(default))]
pub struct HistoryConfig {
    /// Maximum number of entries across undo and redo (0 = unlimited).
    pub max_undo_levels: usize,
    /// Whether edits are recorded at all.
    pub enabled: bool,
    /// Configuration for coalescing.
    pub merge: MergeConfig,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_undo_levels: DEFAULT_MAX_UNDO_LEVELS,
            enabled: true,
            merge: MergeConfig::default(),
        }
    }
}

impl HistoryConfig {
    /// Create a configuration with a custom depth limit.
    #[must_use]
    pub fn new(max_undo_levels: usize) -> Self {
        Self {
            max_undo_levels,
            ..Self::default()
        }
    }

    /// Create unlimited configuration.
    #[must_use]
    pub fn unlimited() -> Self {
        Self::new(0)
    }

    #[must_use]
    pub fn with_max_undo_levels(mut self, levels: usize) -> Self {
        self.max_undo_levels = levels;
        self
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the merge configuration.
    #[must_use]
    pub fn with_merge_config(mut self, merge: MergeConfig) -> Self {
        self.merge = merge;
        self
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.merge.max_merged_chars == 0 {
            errors.push("merge.max_merged_chars must be > 0".into());
        }
        errors
    }

    fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from a TOML string.
    #[cfg(feature = "history-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "history-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "history-config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "history-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Check the configuration, returning it unchanged when valid.
    pub fn check(self) -> Result<Self, ConfigError> {
        self.validated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HistoryConfig::default();
        assert_eq!(config.max_undo_levels, 200);
        assert!(config.enabled);
        assert_eq!(config.merge.max_merged_chars, 1000);
    }

    #[test]
    fn test_config_unlimited() {
        assert_eq!(HistoryConfig::unlimited().max_undo_levels, 0);
    }

    #[test]
    fn test_builder() {
        let config = HistoryConfig::new(10)
            .with_enabled(false)
            .with_merge_config(MergeConfig {
                max_merged_chars: 5,
            });
        assert_eq!(config.max_undo_levels, 10);
        assert!(!config.enabled);
        assert_eq!(config.merge.max_merged_chars, 5);
        assert_eq!(config.with_max_undo_levels(3).max_undo_levels, 3);
    }

    #[test]
    fn test_default_validates_clean() {
        let errors = HistoryConfig::default().validate();
        assert!(errors.is_empty(), "default should validate: {errors:?}");
    }

    #[test]
    fn test_validate_catches_zero_merge_size() {
        let config = HistoryConfig::default().with_merge_config(MergeConfig {
            max_merged_chars: 0,
        });
        assert!(config.validate()[0].contains("merge.max_merged_chars"));
        assert!(matches!(config.check(), Err(ConfigError::Validation(_))));
    }

    #[cfg(feature = "history-config")]
    #[test]
    fn test_from_toml_partial() {
        let config = HistoryConfig::from_toml_str("max_undo_levels = 7\n").unwrap();
        assert_eq!(config.max_undo_levels, 7);
        assert!(config.enabled);
        assert_eq!(config.merge, MergeConfig::default());
    }

    #[cfg(feature = "history-config")]
    #[test]
    fn test_from_json() {
        let config = HistoryConfig::from_json_str(
            r#"{"enabled": false, "merge": {"max_merged_chars": 10}}"#,
        )
        .unwrap();
        assert!(!config.enabled);
        assert_eq!(config.merge.max_merged_chars, 10);
        assert_eq!(config.max_undo_levels, DEFAULT_MAX_UNDO_LEVELS);
    }

    #[cfg(feature = "history-config")]
    #[test]
    fn test_from_toml_rejects_invalid() {
        let err = HistoryConfig::from_toml_str("[merge]\nmax_merged_chars = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[cfg(feature = "history-config")]
    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.toml");
        std::fs::write(&path, "max_undo_levels = 42\n").unwrap();
        let config = HistoryConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.max_undo_levels, 42);
    }

    #[cfg(feature = "history-config")]
    #[test]
    fn test_missing_file_is_io_error() {
        let err = HistoryConfig::from_json_file("/nonexistent/history.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
