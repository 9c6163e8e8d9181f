//! PrintKit Settings Crate
//!
//! Handles application configuration and settings persistence.

pub mod config;
pub mod manager;

pub use config::{Config, ExportSettings, PageSettings};
pub use manager::SettingsManager;
