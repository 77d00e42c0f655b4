//! Store location per platform family

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::settings::{EditorProfile, Settings};

/// Operating-system family, as far as store layout and permissions go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Windows,
    /// Linux and every other Unix-like default
    Unix,
}

impl Platform {
    /// Family of the running platform
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }
}

/// Store path under `home` for the given platform and editor
pub fn storage_path(platform: Platform, home: &Path, editor: &EditorProfile) -> PathBuf {
    match platform {
        Platform::MacOs => home
            .join("Library")
            .join("Application Support")
            .join(&editor.app_dir)
            .join("User")
            .join("globalStorage")
            .join("storage.json"),
        Platform::Windows => home
            .join("AppData")
            .join("Roaming")
            .join(&editor.app_dir)
            .join("User")
            .join("globalStorage")
            .join("storage.json"),
        Platform::Unix => home.join(&editor.dot_dir).join("storage.json"),
    }
}

/// Resolve the store path for the current user.
///
/// An explicit `storage_path` in settings wins; otherwise the path is built
/// from the home directory, which must be known.
pub fn default_storage_path(settings: &Settings) -> Result<PathBuf, StoreError> {
    if let Some(path) = &settings.storage_path {
        return Ok(path.clone());
    }
    let home = dirs::home_dir().ok_or(StoreError::HomeUnavailable)?;
    let path = storage_path(Platform::current(), &home, &settings.editor);
    log::debug!("Resolved store path: {}", path.display());
    Ok(path)
}

/// Backup sibling: the store path with `suffix` appended to the file name
pub fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
