//! Settings Manager
//!
//! Resolves platform-specific configuration paths and handles loading
//! and saving the application config at its default location.

use crate::config::Config;
use crate::error::{SettingsError, SettingsResult};
use std::path::PathBuf;

/// Directory name under the platform config root
const APP_DIR: &str = "archkit";

/// File name of the persisted configuration
const CONFIG_FILE: &str = "config.json";

/// File name of the persisted canvas session
const SESSION_FILE: &str = "session.json";

/// Stateless facade over the platform configuration directory
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsManager;

impl SettingsManager {
    /// Platform configuration directory for the application
    pub fn config_dir() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory(
                    "could not determine platform config directory".to_string(),
                )
            })
    }

    /// Full path of the configuration file
    pub fn config_file_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Full path of the persisted session file
    pub fn session_file_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join(SESSION_FILE))
    }

    /// Create the configuration directory if it does not exist
    pub fn ensure_config_dir() -> SettingsResult<()> {
        let dir = Self::config_dir()?;
        std::fs::create_dir_all(dir)?;
        Ok(())
    }

    /// Load the config from its default location
    ///
    /// A missing file yields the default config; a present but invalid
    /// file is an error.
    pub fn load() -> SettingsResult<Config> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Config::default());
        }

        Config::load_from_file(&path).map_err(|e| SettingsError::LoadError(e.to_string()))
    }

    /// Save the config to its default location
    pub fn save(config: &Config) -> SettingsResult<()> {
        Self::ensure_config_dir()?;
        let path = Self::config_file_path()?;
        config
            .save_to_file(&path)
            .map_err(|e| SettingsError::SaveError(e.to_string()))
    }
}
