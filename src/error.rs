//! Error types for the `rt` command line.

use std::path::PathBuf;
use thiserror::Error;

pub use rtckt_lib::TicketError;

/// Errors surfaced by CLI commands.
#[derive(Error, Debug)]
pub enum RtError {
    /// Failure inside the ticket engine.
    #[error(transparent)]
    Ticket(#[from] TicketError),

    // === Configuration Errors ===
    /// The config file exists but cannot be parsed.
    #[error("Invalid config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    // === Usage Errors ===
    /// A project path tried to leave the root directory.
    #[error("Project path escapes the root: {path}")]
    OutsideRoot { path: String },

    /// The named project does not exist.
    #[error("Project not found: {}", path.display())]
    ProjectNotFound { path: PathBuf },

    /// Refusing a destructive operation without confirmation.
    #[error("Refusing to {action} without --force")]
    NeedsForce { action: String },

    /// Field validation failed.
    #[error("Validation failed: {field}: {reason}")]
    Validation { field: String, reason: String },

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RtError {
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type using `RtError`.
pub type Result<T> = std::result::Result<T, RtError>;
