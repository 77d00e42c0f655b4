//! Boundary exposed to the UI layer
//!
//! Every call reports success as a `bool` (or a zero record for reads).
//! Failure causes are logged, not returned.

use std::path::Path;

use crate::error::StoreError;
use crate::fs::{FileSystem, OsFileSystem};
use crate::paths;
use crate::record::StorageRecord;
use crate::settings::Settings;
use crate::store::IdentityStore;

/// Storage operations keyed by the path string a caller got from `get_storage`
#[derive(Debug, Clone)]
pub struct StorageService<F = OsFileSystem> {
    settings: Settings,
    store: IdentityStore<F>,
}

impl StorageService {
    /// Service over the real filesystem
    pub fn new(settings: Settings) -> Self {
        Self::with_fs(settings, OsFileSystem)
    }
}

impl<F: FileSystem> StorageService<F> {
    pub fn with_fs(settings: Settings, fs: F) -> Self {
        let store = IdentityStore::new(fs).with_backup_suffix(settings.backup_suffix.clone());
        Self { settings, store }
    }

    /// Read the store at the resolved location; zero record if unavailable
    pub fn get_storage(&self) -> StorageRecord {
        match paths::default_storage_path(&self.settings) {
            Ok(path) => self.store.read(&path),
            Err(e) => {
                log::warn!("Cannot locate store: {}", e);
                StorageRecord::default()
            }
        }
    }

    pub fn set_read_only(&self, path: &str, read_only: bool) -> bool {
        report("set_read_only", self.store.try_set_read_only(Path::new(path), read_only))
    }

    pub fn reset(&self, path: &str) -> bool {
        report("reset", self.store.try_reset(Path::new(path)))
    }

    pub fn backup(&self, path: &str) -> bool {
        report("backup", self.store.try_backup(Path::new(path)))
    }

    pub fn restore(&self, path: &str) -> bool {
        report("restore", self.store.try_restore(Path::new(path)))
    }
}

fn report<T>(op: &str, result: Result<T, StoreError>) -> bool {
    match result {
        Ok(_) => true,
        Err(e) => {
            log::warn!("{} failed ({:?}): {}", op, e.kind(), e);
            false
        }
    }
}
