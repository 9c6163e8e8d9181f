//! Settings manager
//!
//! Owns the application configuration and its location on disk. The
//! config file lives in the platform config directory under the
//! application's own folder.

use crate::config::Config;
use printkit_core::{Error, Result};
use std::path::PathBuf;

/// Directory name under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "printkit";
/// Default config file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Loads, holds, and persists the application configuration.
#[derive(Debug, Clone, Default)]
pub struct SettingsManager {
    config: Config,
}

impl SettingsManager {
    /// Create a manager with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Platform config directory for the application
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME))
            .ok_or_else(|| Error::other("Could not determine the config directory"))
    }

    /// Full path of the config file
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Create the config directory if it does not exist
    pub fn ensure_config_dir() -> Result<PathBuf> {
        let dir = Self::config_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Load settings from the default location
    ///
    /// Falls back to defaults when no config file exists yet; a file
    /// that exists but fails to read, parse, or validate is an error.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if path.exists() {
            Ok(Self {
                config: Config::load_from_file(&path)?,
            })
        } else {
            Ok(Self::new())
        }
    }

    /// Persist settings to the default location
    pub fn save(&self) -> Result<()> {
        Self::ensure_config_dir()?;
        self.config.save_to_file(&Self::config_file_path()?)
    }

    /// Get reference to config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get mutable reference to config
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_manager_holds_defaults() {
        let manager = SettingsManager::new();
        assert!(manager.config().validate().is_ok());
    }

    #[test]
    fn test_config_file_path_ends_with_app_dir() {
        if let Ok(path) = SettingsManager::config_file_path() {
            assert!(path.ends_with("printkit/config.toml"));
        }
    }

    #[test]
    fn test_config_mut_edits_are_visible() {
        let mut manager = SettingsManager::new();
        manager.config_mut().export.dpi = 150;
        assert_eq!(manager.config().export.dpi, 150);
    }
}
