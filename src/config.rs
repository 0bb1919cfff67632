//! Aligner configuration.
//!
//! Supplies the minimum group size every bounds operation respects. Values are read from a
//! JSON document; any missing field falls back to its default.

use crate::types::Size;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid configuration JSON
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only settings consulted by every bounds operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlignerConfig {
    /// Floor for group width and height
    pub min_node_size: Size,
    /// Colour preset file; presets stay in memory only when unset
    pub color_presets: Option<PathBuf>,
}

impl AlignerConfig {
    /// Parses a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.sanitize();
        Ok(config)
    }

    /// Reads and parses a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    // A zero or negative floor would let operations collapse a group.
    fn sanitize(&mut self) {
        let defaults = Size::default();
        if self.min_node_size.width.is_nan() || self.min_node_size.width <= 0.0 {
            self.min_node_size.width = defaults.width;
        }
        if self.min_node_size.height.is_nan() || self.min_node_size.height <= 0.0 {
            self.min_node_size.height = defaults.height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_min_size() {
        let config = AlignerConfig::default();
        assert_eq!(config.min_node_size.width, 50.0);
        assert_eq!(config.min_node_size.height, 50.0);
    }

    #[test]
    fn test_parse_full_config() {
        let config =
            AlignerConfig::from_json_str(r#"{"minNodeSize": {"width": 80, "height": 120}}"#)
                .unwrap();
        assert_eq!(config.min_node_size.width, 80.0);
        assert_eq!(config.min_node_size.height, 120.0);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = AlignerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, AlignerConfig::default());

        let partial = AlignerConfig::from_json_str(r#"{"minNodeSize": {"width": 70}}"#).unwrap();
        assert_eq!(partial.min_node_size.width, 70.0);
        assert_eq!(partial.min_node_size.height, 50.0);
    }

    #[test]
    fn test_parse_preset_path() {
        let config =
            AlignerConfig::from_json_str(r#"{"colorPresets": "/tmp/color_presets.json"}"#)
                .unwrap();
        assert_eq!(
            config.color_presets,
            Some(PathBuf::from("/tmp/color_presets.json"))
        );
        assert_eq!(config.min_node_size, Size::default());
        assert_eq!(AlignerConfig::default().color_presets, None);
    }

    #[test]
    fn test_non_positive_floor_falls_back() {
        let config =
            AlignerConfig::from_json_str(r#"{"minNodeSize": {"width": 0, "height": -5}}"#)
                .unwrap();
        assert_eq!(config, AlignerConfig::default());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = AlignerConfig::from_json_str("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AlignerConfig::load("/definitely/not/here/aligner.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
