//! Error types for `rtckt-lib`.
//!
//! Every variant that touches the filesystem carries the path it was
//! operating on, so the presentation layer can report what failed and where.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Primary error type for ticket and project operations.
#[derive(Error, Debug)]
pub enum TicketError {
    // === Ticket Errors ===
    /// Ticket file does not exist.
    #[error("Ticket not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Ticket file exists but is not a well-formed record.
    #[error("Malformed ticket {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Ticket name cannot double as a filename.
    #[error("Invalid ticket name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    // === Configuration Errors ===
    /// The user's home directory could not be determined.
    #[error("Could not determine the home directory")]
    HomeDirNotFound,

    // === I/O Errors ===
    /// Permission, disk, or other OS failure.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Coarse classification of a [`TicketError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Decode,
    Io,
    Validation,
    Config,
}

impl TicketError {
    /// Wrap an I/O error with the path it occurred on.
    ///
    /// A `NotFound` I/O error becomes [`TicketError::NotFound`].
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    #[must_use]
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Io { .. } => ErrorKind::Io,
            Self::InvalidName { .. } => ErrorKind::Validation,
            Self::HomeDirNotFound => ErrorKind::Config,
        }
    }

    /// Path the failure refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotFound { path } | Self::Decode { path, .. } | Self::Io { path, .. } => {
                Some(path)
            }
            Self::InvalidName { .. } | Self::HomeDirNotFound => None,
        }
    }
}

/// Result type using `TicketError`.
pub type Result<T> = std::result::Result<T, TicketError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_not_found_maps_to_not_found() {
        let err = TicketError::io(
            "/tmp/missing.json",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.path(), Some(Path::new("/tmp/missing.json")));
    }

    #[test]
    fn io_other_keeps_source() {
        let err = TicketError::io(
            "/tmp/locked.json",
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("/tmp/locked.json"));
    }
}
