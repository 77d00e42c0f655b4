//! Identity store manager
//!
//! Every operation reads the file fresh; nothing is cached between calls.
//! No locking is done, so concurrent callers must serialize themselves.

use std::path::{Path, PathBuf};

use crate::consts::BACKUP_SUFFIX;
use crate::error::StoreError;
use crate::fs::{self, FileSystem, OsFileSystem};
use crate::paths::{self, Platform};
use crate::record::StorageRecord;

/// Reads, resets, backs up and restores the store document
#[derive(Debug, Clone)]
pub struct IdentityStore<F = OsFileSystem> {
    fs: F,
    platform: Platform,
    backup_suffix: String,
}

impl IdentityStore {
    /// Store backed by the real filesystem
    pub fn system() -> Self {
        Self::new(OsFileSystem)
    }
}

impl Default for IdentityStore {
    fn default() -> Self {
        Self::system()
    }
}

impl<F: FileSystem> IdentityStore<F> {
    /// Store for the running platform with the default backup suffix
    pub fn new(fs: F) -> Self {
        Self {
            fs,
            platform: Platform::current(),
            backup_suffix: BACKUP_SUFFIX.to_string(),
        }
    }

    /// Use a different platform's read-only rule
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Name backups with `suffix`; an empty suffix keeps the default
    pub fn with_backup_suffix(mut self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        if suffix.is_empty() {
            log::warn!("Empty backup suffix, using {}", BACKUP_SUFFIX);
        } else {
            self.backup_suffix = suffix;
        }
        self
    }

    /// Where the backup of `path` lives
    pub fn backup_path(&self, path: &Path) -> PathBuf {
        paths::backup_path(path, &self.backup_suffix)
    }

    /// Read and parse the store, filling in `config_path` and `is_read_only`
    pub fn try_read(&self, path: &Path) -> Result<StorageRecord, StoreError> {
        self.load(path).map(|(_, record)| record)
    }

    /// Reader boundary: any failure yields the zero record
    pub fn read(&self, path: &Path) -> StorageRecord {
        self.try_read(path).unwrap_or_else(|e| {
            log::warn!("Store unavailable: {}", e);
            StorageRecord::default()
        })
    }

    /// Whether the file's mode marks it read-only; false if it cannot be inspected
    pub fn is_read_only(&self, path: &Path) -> bool {
        self.fs
            .mode(path)
            .map(|mode| fs::is_read_only_mode(self.platform, mode))
            .unwrap_or(false)
    }

    /// Overwrite the file mode with the fixed read-only or read-write pattern
    pub fn try_set_read_only(&self, path: &Path, read_only: bool) -> Result<(), StoreError> {
        ensure_path(path)?;
        let mode = if read_only {
            fs::READ_ONLY_MODE
        } else {
            fs::READ_WRITE_MODE
        };
        self.fs
            .set_mode(path, mode)
            .map_err(|e| StoreError::write(path, e))?;
        log::info!("Set {} read-only={}", path.display(), read_only);
        Ok(())
    }

    /// Copy the current bytes verbatim to the backup file.
    ///
    /// Returns the bytes that were backed up. The store must parse first.
    pub fn try_backup(&self, path: &Path) -> Result<Vec<u8>, StoreError> {
        ensure_path(path)?;
        let (current, _) = self.load(path)?;
        self.write_backup(path, &current)?;
        Ok(current)
    }

    /// Back up, then write a record with four fresh identifiers.
    ///
    /// The file keeps its mode. If the final write fails the original bytes
    /// are written back (best effort) and the write error is returned.
    pub fn try_reset(&self, path: &Path) -> Result<StorageRecord, StoreError> {
        ensure_path(path)?;
        let (current, current_record) = self.load(path)?;
        self.write_backup(path, &current)?;

        let mut fresh = current_record.regenerated();
        fresh.config_path = path.to_string_lossy().into_owned();
        let data = fresh.to_pretty_json().map_err(StoreError::Serialize)?;

        let mode = self.fs.mode(path).map_err(|e| StoreError::read(path, e))?;
        if let Err(e) = self.fs.write_with_mode(path, &data, mode) {
            log::warn!("Reset write to {} failed, rolling back: {}", path.display(), e);
            if let Err(rollback) = self.fs.write_with_mode(path, &current, mode) {
                log::error!("Rollback of {} failed: {}", path.display(), rollback);
            }
            return Err(StoreError::write(path, e));
        }

        log::info!("Reset identifiers in {}", path.display());
        Ok(fresh)
    }

    /// Overwrite the store with the backup bytes.
    ///
    /// Refused when the store is read-only. The backup must parse before the
    /// live file is touched, and is left in place afterwards.
    pub fn try_restore(&self, path: &Path) -> Result<(), StoreError> {
        ensure_path(path)?;
        if self.is_read_only(path) {
            return Err(StoreError::GuardRefused {
                path: path.to_path_buf(),
            });
        }

        let backup = self.backup_path(path);
        let data = self.read_raw(&backup)?;
        StorageRecord::from_slice(&data).map_err(|source| StoreError::Malformed {
            path: backup.clone(),
            source,
        })?;

        let mode = self.fs.mode(path).map_err(|e| StoreError::read(path, e))?;
        self.fs
            .write_with_mode(path, &data, mode)
            .map_err(|e| StoreError::write(path, e))?;
        log::info!("Restored {} bytes from {}", data.len(), backup.display());
        Ok(())
    }

    /// One read of the store: raw bytes plus the parsed record
    fn load(&self, path: &Path) -> Result<(Vec<u8>, StorageRecord), StoreError> {
        let bytes = self.read_raw(path)?;
        let mut record = StorageRecord::from_slice(&bytes).map_err(|source| {
            StoreError::Malformed {
                path: path.to_path_buf(),
                source,
            }
        })?;
        record.config_path = path.to_string_lossy().into_owned();
        record.is_read_only = self.is_read_only(path);
        Ok((bytes, record))
    }

    fn write_backup(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        let backup = self.backup_path(path);
        self.fs
            .write_with_mode(&backup, bytes, fs::BACKUP_MODE)
            .map_err(|e| StoreError::write(&backup, e))?;
        log::info!("Backed up {} bytes to {}", bytes.len(), backup.display());
        Ok(())
    }

    fn read_raw(&self, path: &Path) -> Result<Vec<u8>, StoreError> {
        self.fs.read(path).map_err(|e| StoreError::read(path, e))
    }
}

fn ensure_path(path: &Path) -> Result<(), StoreError> {
    if path.as_os_str().is_empty() {
        Err(StoreError::EmptyPath)
    } else {
        Ok(())
    }
}
