//! Job configuration for ArcSurf
//!
//! Provides configuration file handling and validation. Supports JSON and TOML
//! file formats; the default file lives in the platform configuration
//! directory.
//!
//! Configuration is organized into two sections:
//! - Surface parameters (arc geometry, layer schedule, motion)
//! - Output preferences (comments, banner title)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use arcsurf_camtools::{ArcSurfaceParameters, GcodeWriterSettings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory name under the platform config directory
const APP_DIR: &str = "arcsurf";
/// Default configuration file name
const CONFIG_FILE: &str = "config.toml";

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )
            .into()),
        }
    }
}

/// G-code output preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Emit banner, section and per-layer comments
    pub include_comments: bool,
    /// Title line of the program banner
    pub program_title: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        let writer = GcodeWriterSettings::default();
        Self {
            include_comments: writer.include_comments,
            program_title: writer.program_title,
        }
    }
}

impl OutputSettings {
    pub fn writer_settings(&self) -> GcodeWriterSettings {
        GcodeWriterSettings {
            include_comments: self.include_comments,
            program_title: self.program_title.clone(),
            generator: None,
        }
    }
}

/// Complete job configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Arc geometry, schedule and motion parameters
    pub surface: ArcSurfaceParameters,
    /// Output preferences
    pub output: OutputSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config_dir>/arcsurf/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::UnsupportedPlatform("no configuration directory".to_string())
        })?;
        Ok(dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load `path`, or the default file when it exists, or built-in defaults
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match Self::default_path() {
            Ok(default) if default.exists() => Self::load_from_file(&default),
            _ => {
                debug!("No configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e)))?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.surface.validate()?;

        if self.output.include_comments && self.output.program_title.trim().is_empty() {
            return Err(SettingsError::InvalidSetting {
                key: "output.program_title".to_string(),
                reason: "must not be empty when comments are enabled".to_string(),
            });
        }

        Ok(())
    }
}
