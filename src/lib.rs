//! curfree - reset the telemetry identifiers of a locally installed editor
//!
//! Core modules:
//! - `ids`: Identifier generation (UUID v4, machine ID, SQM ID)
//! - `paths`: Platform-specific store location
//! - `record`: The `storage.json` document
//! - `fs`: Filesystem seam and read-only guard
//! - `store`: Read, reset, backup and restore
//! - `service`: Boolean-result boundary for the UI layer
//! - `settings`: Tool configuration

pub mod error;
pub mod fs;
pub mod ids;
pub mod paths;
pub mod record;
pub mod service;
pub mod settings;
pub mod store;

pub use error::{ErrorKind, StoreError};
pub use record::StorageRecord;
pub use service::StorageService;
pub use settings::{EditorProfile, Settings};
pub use store::IdentityStore;

/// Store-wide constants
pub mod consts {
    /// Appended to the store file name to name its backup
    pub const BACKUP_SUFFIX: &str = ".back";
}
