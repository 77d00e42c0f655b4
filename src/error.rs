//! Store error taxonomy

use std::io;
use std::path::PathBuf;

/// Coarse classification of a store failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// File missing, unreadable, or no path to act on
    Unavailable,
    /// Bytes present but not a store document
    Malformed,
    /// The filesystem refused a write or chmod
    PermissionDenied,
    /// Restore attempted against a read-only store
    GuardRefused,
    /// Any other I/O failure while writing
    Io,
}

/// Errors returned by store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("empty store path")]
    EmptyPath,

    #[error("home directory unavailable")]
    HomeUnavailable,

    #[error("cannot read {}: {source}", path.display())]
    Unavailable { path: PathBuf, source: io::Error },

    #[error("malformed store document {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("permission denied on {}: {source}", path.display())]
    PermissionDenied { path: PathBuf, source: io::Error },

    #[error("{} is read-only, refusing to restore", path.display())]
    GuardRefused { path: PathBuf },

    #[error("write to {} failed: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("cannot serialize store document: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl StoreError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyPath | Self::HomeUnavailable | Self::Unavailable { .. } => {
                ErrorKind::Unavailable
            }
            Self::Malformed { .. } => ErrorKind::Malformed,
            Self::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Self::GuardRefused { .. } => ErrorKind::GuardRefused,
            Self::Io { .. } | Self::Serialize(_) => ErrorKind::Io,
        }
    }

    /// Wrap an error from a write or chmod, separating permission refusals
    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::PermissionDenied {
            Self::PermissionDenied { path, source }
        } else {
            Self::Io { path, source }
        }
    }

    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Unavailable {
            path: path.into(),
            source,
        }
    }
}
