//! Configuration and settings management for PrintKit
//!
//! Provides configuration file handling and validation. Supports JSON
//! and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Export defaults (format, quality, resolution)
//! - Page preferences (orientation)

use printkit_core::error::ConfigError;
use printkit_core::{Error, Orientation, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Export default settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Default output encoding for artifacts
    pub format: OutputFormat,
    /// JPEG quality, 1-100. Ignored by the lossless formats.
    pub jpeg_quality: u8,
    /// Default output resolution in DPI
    pub dpi: u32,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            jpeg_quality: 90,
            dpi: 300,
        }
    }
}

/// Page preference settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PageSettings {
    /// Default print orientation
    #[serde(default)]
    pub orientation: Orientation,
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Export defaults
    #[serde(default)]
    pub export: ExportSettings,
    /// Page preferences
    #[serde(default)]
    pub page: PageSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            reason: e.to_string(),
        })?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseFailed {
                reason: e.to_string(),
            })?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
                reason: e.to_string(),
            })?
        } else {
            return Err(Error::other(
                "Config file must be .json or .toml".to_string(),
            ));
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)
                .map_err(|e| Error::other(format!("Failed to serialize config: {}", e)))?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)
                .map_err(|e| Error::other(format!("Failed to serialize config: {}", e)))?
        } else {
            return Err(Error::other(
                "Config file must be .json or .toml".to_string(),
            ));
        };

        std::fs::write(path, content)
            .map_err(|e| Error::other(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.export.jpeg_quality == 0 || self.export.jpeg_quality > 100 {
            return Err(ConfigError::InvalidValue {
                field: "export.jpeg_quality".to_string(),
                reason: "must be between 1 and 100".to_string(),
            }
            .into());
        }

        if self.export.dpi == 0 {
            return Err(ConfigError::InvalidValue {
                field: "export.dpi".to_string(),
                reason: "must be > 0".to_string(),
            }
            .into());
        }

        if self.export.dpi > 1200 {
            return Err(ConfigError::InvalidValue {
                field: "export.dpi".to_string(),
                reason: "resolutions above 1200 DPI are not supported".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.export.format, OutputFormat::Jpg);
        assert_eq!(config.export.jpeg_quality, 90);
        assert_eq!(config.export.dpi, 300);
        assert_eq!(config.page.orientation, Orientation::Portrait);
    }

    #[test]
    fn test_validate_rejects_bad_quality() {
        let mut config = Config::new();
        config.export.jpeg_quality = 0;
        assert!(config.validate().unwrap_err().is_config_error());
        config.export.jpeg_quality = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_dpi() {
        let mut config = Config::new();
        config.export.dpi = 0;
        assert!(config.validate().is_err());
        config.export.dpi = 2400;
        assert!(config.validate().is_err());
        config.export.dpi = 600;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::new();
        config.export.format = OutputFormat::Png;
        config.export.dpi = 600;
        config.page.orientation = Orientation::Landscape;
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::new();
        config.export.jpeg_quality = 75;
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[export]\nformat = \"png\"\njpeg_quality = 80\ndpi = 150\n").unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.export.format, OutputFormat::Png);
        assert_eq!(loaded.export.dpi, 150);
        assert_eq!(
            loaded.page.orientation,
            Orientation::Portrait,
            "Missing sections fall back to defaults"
        );
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "export: {}").unwrap();
        assert!(Config::load_from_file(&path).is_err());
    }

    #[test]
    fn test_invalid_file_fails_validation_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[export]\nformat = \"jpg\"\njpeg_quality = 90\ndpi = 0\n",
        )
        .unwrap();
        let err = Config::load_from_file(&path).unwrap_err();
        assert!(err.is_config_error());
    }
}
