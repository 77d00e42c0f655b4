//! Tool settings
//!
//! Loaded from `<config_dir>/curfree/settings.json` when present, with an
//! environment override for the store location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::BACKUP_SUFFIX;

/// Environment variable that overrides the resolved store path
pub const STORAGE_PATH_ENV: &str = "CURFREE_STORAGE_PATH";

/// Directory names an editor uses under the user's home
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorProfile {
    /// Application directory on macOS and Windows (`Cursor`)
    pub app_dir: String,
    /// Hidden directory on other Unix-like systems (`.cursor`)
    pub dot_dir: String,
}

impl Default for EditorProfile {
    fn default() -> Self {
        Self {
            app_dir: "Cursor".to_string(),
            dot_dir: ".cursor".to_string(),
        }
    }
}

/// Settings for locating and backing up the identity store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Editor whose store is managed
    pub editor: EditorProfile,
    /// Explicit store path, bypassing platform resolution
    pub storage_path: Option<PathBuf>,
    /// Suffix appended to the store path to name the backup
    pub backup_suffix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            editor: EditorProfile::default(),
            storage_path: None,
            backup_suffix: BACKUP_SUFFIX.to_string(),
        }
    }
}

impl Settings {
    /// Settings file name under the config directory
    const FILE_NAME: &'static str = "settings.json";

    /// Location of the settings file, if the platform has a config directory
    pub fn file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(env!("CARGO_PKG_NAME")).join(Self::FILE_NAME))
    }

    /// Parse settings from JSON text. An empty backup suffix would name the
    /// store itself, so it falls back to the default.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        if settings.backup_suffix.is_empty() {
            log::warn!("Empty backup_suffix in settings, using {}", BACKUP_SUFFIX);
            settings.backup_suffix = BACKUP_SUFFIX.to_string();
        }
        Ok(settings)
    }

    /// Apply an override path if one is given and non-empty
    pub fn with_storage_override(mut self, path: Option<&str>) -> Self {
        if let Some(path) = path.filter(|p| !p.is_empty()) {
            self.storage_path = Some(PathBuf::from(path));
        }
        self
    }

    /// Load settings from disk, falling back to defaults, then apply the
    /// environment override
    pub fn load() -> Self {
        let settings = Self::file_path()
            .and_then(|path| {
                let json = std::fs::read_to_string(&path).ok()?;
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from {}", path.display());
                        Some(settings)
                    }
                    Err(e) => {
                        log::warn!("Ignoring invalid settings file {}: {}", path.display(), e);
                        None
                    }
                }
            })
            .unwrap_or_else(|| {
                log::debug!("Using default settings");
                Self::default()
            });

        let env_path = std::env::var(STORAGE_PATH_ENV).ok();
        settings.with_storage_override(env_path.as_deref())
    }
}
