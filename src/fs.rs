//! Filesystem access and the read-only guard
//!
//! Store operations go through the `FileSystem` trait so tests can inject
//! write failures. Permissions are expressed as POSIX mode bits on every
//! platform; on Windows the read-only attribute is mapped onto the write mask.

use std::fs;
use std::io;
use std::path::Path;

use crate::paths::Platform;

/// Mode applied by `set_read_only(true)`: r--r--r--
pub const READ_ONLY_MODE: u32 = 0o444;

/// Mode applied by `set_read_only(false)`: rw-r--r--
pub const READ_WRITE_MODE: u32 = 0o644;

/// Mode for a newly created backup file
pub const BACKUP_MODE: u32 = 0o644;

const OWNER_WRITE: u32 = 0o200;
const ANY_WRITE: u32 = 0o222;

/// Filesystem operations the store needs
pub trait FileSystem {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Truncate and write `data`. `mode` applies only if the file is created.
    fn write_with_mode(&self, path: &Path, data: &[u8], mode: u32) -> io::Result<()>;

    /// Permission bits of `path`
    fn mode(&self, path: &Path) -> io::Result<u32>;

    /// Replace the permission bits of `path`
    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()>;
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    #[cfg(unix)]
    fn write_with_mode(&self, path: &Path, data: &[u8], mode: u32) -> io::Result<()> {
        use std::io::Write;
        use std::os::unix::fs::OpenOptionsExt;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(mode)
            .open(path)?;
        file.write_all(data)?;
        file.sync_all()
    }

    #[cfg(not(unix))]
    fn write_with_mode(&self, path: &Path, data: &[u8], mode: u32) -> io::Result<()> {
        let existed = path.exists();
        fs::write(path, data)?;
        if !existed && mode & ANY_WRITE == 0 {
            self.set_mode(path, mode)?;
        }
        Ok(())
    }

    #[cfg(unix)]
    fn mode(&self, path: &Path) -> io::Result<u32> {
        use std::os::unix::fs::PermissionsExt;
        Ok(fs::metadata(path)?.permissions().mode() & 0o777)
    }

    #[cfg(not(unix))]
    fn mode(&self, path: &Path) -> io::Result<u32> {
        if fs::metadata(path)?.permissions().readonly() {
            Ok(READ_ONLY_MODE)
        } else {
            Ok(0o666)
        }
    }

    #[cfg(unix)]
    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode))
    }

    #[cfg(not(unix))]
    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_readonly(mode & ANY_WRITE == 0);
        fs::set_permissions(path, perms)
    }
}

/// Whether `mode` counts as read-only on `platform`.
///
/// Windows: no write bit for anyone. Elsewhere: owner-write cleared.
pub fn is_read_only_mode(platform: Platform, mode: u32) -> bool {
    match platform {
        Platform::Windows => mode & ANY_WRITE == 0,
        Platform::MacOs | Platform::Unix => mode & OWNER_WRITE == 0,
    }
}
