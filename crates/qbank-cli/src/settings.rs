//! Settings file: where the questions live, sync and export defaults.
//!
//! Settings are read from `settings.toml` in the platform config directory
//! (for example `~/.config/qbank/` on Linux) unless `--config` names a file.
//! A missing or unreadable file means defaults; the shell never refuses to
//! start over its settings.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use qbank_export::{DEFAULT_IMAGE_WIDTH_INCHES, DEFAULT_TITLE};
use qbank_persistence::DEFAULT_DATA_FILE;
use serde::{Deserialize, Serialize};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "qbank";
const APP_NAME: &str = "qbank";
const CONFIG_FILENAME: &str = "settings.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Question file; relative paths are taken from the working directory.
    pub data_file: PathBuf,
    pub sync: SyncSettings,
    pub export: ExportSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            sync: SyncSettings::default(),
            export: ExportSettings::default(),
        }
    }
}

/// Git push after every change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub title: String,
    pub image_width_inches: f64,
    pub output_dir: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            image_width_inches: DEFAULT_IMAGE_WIDTH_INCHES,
            output_dir: PathBuf::from("."),
        }
    }
}

/// Default settings file location, if the platform has one.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load settings from `explicit`, or from the default location.
///
/// Returns defaults if the file is missing, cannot be read or cannot be
/// parsed, or if no location can be determined.
pub fn load_settings(explicit: Option<&Path>) -> Settings {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match settings_path() {
            Some(path) => path,
            None => {
                tracing::warn!("Could not determine settings path, using defaults");
                return Settings::default();
            }
        },
    };
    load_settings_from(&path)
}

fn load_settings_from(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                tracing::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                tracing::warn!("Failed to parse settings file: {}, using defaults", e);
                Settings::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            Settings::default()
        }
        Err(e) => {
            tracing::warn!("Failed to read settings file: {}, using defaults", e);
            Settings::default()
        }
    }
}
