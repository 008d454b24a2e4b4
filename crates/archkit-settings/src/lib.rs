//! ArchKit Settings Crate
//!
//! Handles application configuration, settings persistence, and the
//! file-backed session store.

pub mod config;
pub mod error;
pub mod manager;
pub mod store;

pub use config::{AutosaveSettings, CanvasSettings, Config, ExportSettings, Theme, UiSettings};
pub use error::{SettingsError, SettingsResult};
pub use manager::SettingsManager;
pub use store::FileStore;
