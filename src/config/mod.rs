// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[compression]` - Default quality, dimension limits and conversion thresholds
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. `--config-dir` CLI flag or `ICED_COMPRESSOR_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use iced_compressor::config;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.general.language = Some("id".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::media::CompressionSettings;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "id").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(
        default = "default_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: None,
            theme_mode: default_theme_mode(),
        }
    }
}

/// Compression defaults restored at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompressionConfig {
    #[serde(default = "default_quality", skip_serializing_if = "Option::is_none")]
    pub quality: Option<f32>,

    #[serde(default = "default_max_width", skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,

    #[serde(default = "default_max_height", skip_serializing_if = "Option::is_none")]
    pub max_height: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// State of the "limit maximum dimensions" switch.
    #[serde(default = "default_true")]
    pub limit_dimensions: bool,

    /// State of the "set specific dimensions" switch.
    #[serde(default)]
    pub specific_dimensions: bool,

    #[serde(
        default = "default_convert_size",
        skip_serializing_if = "Option::is_none"
    )]
    pub convert_size: Option<u64>,

    #[serde(default = "default_convert_types")]
    pub convert_types: Vec<String>,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            quality: default_quality(),
            max_width: default_max_width(),
            max_height: default_max_height(),
            width: None,
            height: None,
            limit_dimensions: true,
            specific_dimensions: false,
            convert_size: default_convert_size(),
            convert_types: default_convert_types(),
        }
    }
}

impl CompressionConfig {
    /// Builds the runtime settings, clamping quality into the slider range.
    pub fn to_settings(&self) -> CompressionSettings {
        CompressionSettings {
            quality: self
                .quality
                .unwrap_or(DEFAULT_QUALITY)
                .clamp(MIN_QUALITY, MAX_QUALITY),
            max_width: self.max_width.filter(|v| *v > 0),
            max_height: self.max_height.filter(|v| *v > 0),
            width: self.width.filter(|v| *v > 0),
            height: self.height.filter(|v| *v > 0),
            convert_size: self.convert_size,
            convert_types: self.convert_types.clone(),
        }
    }

    /// Stores the runtime settings and switch states.
    pub fn store(
        &mut self,
        settings: &CompressionSettings,
        limit_dimensions: bool,
        specific_dimensions: bool,
    ) {
        self.quality = Some(settings.quality);
        self.max_width = settings.max_width;
        self.max_height = settings.max_height;
        self.width = settings.width;
        self.height = settings.height;
        self.convert_size = settings.convert_size;
        self.convert_types = settings.convert_types.clone();
        self.limit_dimensions = limit_dimensions;
        self.specific_dimensions = specific_dimensions;
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub compression: CompressionConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_theme_mode() -> ThemeMode {
    ThemeMode::System
}

fn default_true() -> bool {
    true
}

fn default_quality() -> Option<f32> {
    Some(DEFAULT_QUALITY)
}

fn default_max_width() -> Option<u32> {
    Some(DEFAULT_MAX_WIDTH)
}

fn default_max_height() -> Option<u32> {
    Some(DEFAULT_MAX_HEIGHT)
}

fn default_convert_size() -> Option<u64> {
    Some(DEFAULT_CONVERT_SIZE)
}

fn default_convert_types() -> Vec<String> {
    DEFAULT_CONVERT_TYPES
        .iter()
        .map(|mime| (*mime).to_string())
        .collect()
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "falling back to default config");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let mut config = Config::default();
        config.general.language = Some("id".to_string());
        config.general.theme_mode = ThemeMode::Light;
        config.compression.quality = Some(0.5);
        config.compression.width = Some(800);
        config.compression.height = Some(600);
        config.compression.specific_dimensions = true;

        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let result = load_from_path(&config_path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn load_with_override_falls_back_with_warning_on_invalid_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[general\nbroken")
            .expect("failed to write invalid toml");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }

    #[test]
    fn load_with_override_missing_file_is_silent_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn partial_file_fills_missing_fields_with_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[general]\ntheme_mode = \"Dark\"\n")
            .expect("failed to write config");

        let loaded = load_from_path(&config_path).expect("partial config should load");
        assert_eq!(loaded.general.theme_mode, ThemeMode::Dark);
        assert_eq!(loaded.compression, CompressionConfig::default());
    }

    #[test]
    fn default_compression_settings_match_original_defaults() {
        let settings = CompressionConfig::default().to_settings();
        assert_eq!(settings.quality, DEFAULT_QUALITY);
        assert_eq!(settings.max_width, Some(1920));
        assert_eq!(settings.max_height, Some(1080));
        assert_eq!(settings.width, None);
        assert_eq!(settings.height, None);
        assert_eq!(settings.convert_size, Some(5_000_000));
        assert_eq!(settings.convert_types, vec!["image/png".to_string()]);
    }

    #[test]
    fn to_settings_clamps_out_of_range_quality() {
        let config = CompressionConfig {
            quality: Some(3.0),
            ..CompressionConfig::default()
        };
        assert_eq!(config.to_settings().quality, MAX_QUALITY);
    }

    #[test]
    fn store_then_to_settings_is_stable() {
        let mut settings = CompressionConfig::default().to_settings();
        settings.quality = 0.3;
        settings.width = Some(640);

        let mut config = CompressionConfig::default();
        config.store(&settings, false, true);

        assert!(!config.limit_dimensions);
        assert!(config.specific_dimensions);
        assert_eq!(config.to_settings(), settings);
    }
}
