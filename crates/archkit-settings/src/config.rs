//! Configuration and settings management for ArchKit
//!
//! Provides configuration file handling, settings management, and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Canvas defaults (node size, grid, connection curvature)
//! - UI preferences (theme, window geometry, overlays)
//! - Autosave policy (session key, write interval)
//! - Export defaults (output directory, recent files)

use archkit_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Theme selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Follow system preference
    System,
    /// Force light theme
    Light,
    /// Force dark theme
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Self::System
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::System => write!(f, "System"),
            Self::Light => write!(f, "Light"),
            Self::Dark => write!(f, "Dark"),
        }
    }
}

/// Canvas default settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasSettings {
    /// Default width for newly dropped nodes, in canvas units
    pub default_node_width: f64,
    /// Default height for newly dropped nodes, in canvas units
    pub default_node_height: f64,
    /// Background grid spacing in canvas units
    pub grid_size: f64,
    /// Snap node positions to the grid when moving
    #[serde(default)]
    pub snap_to_grid: bool,
    /// Control-point offset for connection curves, in canvas units
    pub connection_control_offset: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            default_node_width: 80.0,
            default_node_height: 80.0,
            grid_size: 20.0,
            snap_to_grid: false,
            connection_control_offset: 60.0,
        }
    }
}

/// UI preference settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Window width
    pub window_width: u32,
    /// Window height
    pub window_height: u32,
    /// Selected theme (light/dark/system)
    #[serde(default)]
    pub theme: Theme,
    /// Show the background grid
    pub show_grid: bool,
    /// Show connection labels at curve midpoints
    #[serde(default = "default_true")]
    pub show_connection_labels: bool,
}

fn default_true() -> bool {
    true
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 800,
            theme: Theme::default(),
            show_grid: true,
            show_connection_labels: true,
        }
    }
}

/// Autosave policy settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutosaveSettings {
    /// Write the session to the store automatically
    pub enabled: bool,
    /// Seconds between automatic session writes
    pub interval_secs: u64,
    /// Store key the serialized session is written under
    pub session_key: String,
}

impl Default for AutosaveSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 30,
            session_key: "archkit.session".to_string(),
        }
    }
}

/// Export default settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Default directory for diagram files
    pub default_directory: PathBuf,
    /// Pretty-print exported JSON
    pub pretty_json: bool,
    /// Number of recent files to track
    pub recent_files_count: usize,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            default_directory: dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")),
            pretty_json: true,
            recent_files_count: 10,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Canvas defaults
    pub canvas: CanvasSettings,
    /// UI preferences
    pub ui: UiSettings,
    /// Autosave policy
    pub autosave: AutosaveSettings,
    /// Export defaults
    pub export: ExportSettings,
    /// Recent files list
    #[serde(default)]
    pub recent_files: Vec<PathBuf>,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::other(format!("Failed to read config file: {}", e)))?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .map_err(|e| Error::other(format!("Invalid JSON config: {}", e)))?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)
                .map_err(|e| Error::other(format!("Invalid TOML config: {}", e)))?
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
        // Validate canvas settings
        if !self.canvas.default_node_width.is_finite() || self.canvas.default_node_width <= 0.0 {
            return Err(Error::other("Default node width must be > 0".to_string()));
        }

        if !self.canvas.default_node_height.is_finite() || self.canvas.default_node_height <= 0.0 {
            return Err(Error::other("Default node height must be > 0".to_string()));
        }

        if !self.canvas.grid_size.is_finite() || self.canvas.grid_size <= 0.0 {
            return Err(Error::other("Grid size must be > 0".to_string()));
        }

        if !self.canvas.connection_control_offset.is_finite()
            || self.canvas.connection_control_offset < 0.0
        {
            return Err(Error::other(
                "Connection control offset must be >= 0".to_string(),
            ));
        }

        // Validate UI settings
        if self.ui.window_width == 0 || self.ui.window_height == 0 {
            return Err(Error::other("Window dimensions must be > 0".to_string()));
        }

        // Validate autosave settings
        if self.autosave.interval_secs == 0 {
            return Err(Error::other("Autosave interval must be > 0".to_string()));
        }

        if self.autosave.session_key.is_empty() {
            return Err(Error::other("Session key must not be empty".to_string()));
        }

        // Validate export settings
        if self.export.recent_files_count == 0 {
            return Err(Error::other("Recent files count must be > 0".to_string()));
        }

        Ok(())
    }

    /// Add file to recent files list
    pub fn add_recent_file(&mut self, path: PathBuf) {
        // Remove if already in list
        self.recent_files.retain(|f| f != &path);

        // Add to front
        self.recent_files.insert(0, path);

        // Trim to max size
        self.recent_files.truncate(self.export.recent_files_count);
    }

    /// Merge another config into this one (preserves existing values for missing sections)
    pub fn merge(&mut self, other: &Config) {
        // Only merge sections carrying non-default values
        if other.canvas.default_node_width > 0.0 {
            self.canvas = other.canvas.clone();
        }
        // Theme::System is the default, so a non-System theme marks a
        // deliberately configured UI section.
        if other.ui.theme != Theme::System {
            self.ui = other.ui.clone();
        }
        if other.autosave.interval_secs > 0 {
            self.autosave = other.autosave.clone();
        }
        if other.export.recent_files_count > 0 {
            self.export = other.export.clone();
        }
    }
}
