//! ArcSurf Settings Crate
//!
//! Handles job configuration files: loading, saving, defaults and validation.

pub mod config;
pub mod error;

pub use config::{Config, ConfigFormat, OutputSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
