use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;

use crate::models::settings::TimelineSettings;

const SETTINGS_FILE: &str = "timeline.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
    #[error("unable to resolve a configuration directory")]
    NoConfigDir,
}

/// Reads and writes [`TimelineSettings`] as TOML.
pub struct SettingsService;

impl SettingsService {
    /// `timeline.toml` inside the platform configuration directory.
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        ProjectDirs::from("com", "ShiftTimeline", "ShiftTimeline")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
            .ok_or(SettingsError::NoConfigDir)
    }

    /// Load and validate the settings
    pub fn load(path: &Path) -> Result<TimelineSettings, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: TimelineSettings =
            toml::from_str(&text).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate().map_err(SettingsError::Invalid)?;
        Ok(settings)
    }

    /// Load the settings, falling back to defaults when the file is missing or invalid.
    pub fn load_or_default(path: &Path) -> TimelineSettings {
        if !path.exists() {
            log::info!("No settings at {}; using defaults", path.display());
            return TimelineSettings::default();
        }
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{}; using defaults", e);
                TimelineSettings::default()
            }
        }
    }

    /// Validate and write the settings, creating parent directories as needed.
    pub fn save(path: &Path, settings: &TimelineSettings) -> Result<(), SettingsError> {
        settings.validate().map_err(SettingsError::Invalid)?;
        let text = toml::to_string_pretty(settings)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| SettingsError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, text).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
