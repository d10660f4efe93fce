//! File-backed ticket storage.
//!
//! Each ticket lives in `<project-dir>/<name>.json` as pretty-printed JSON.
//! There is no index and no cache: every call goes to the filesystem, and
//! the filesystem is the single source of truth.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, TicketError};
use crate::model::{TICKET_EXTENSION, Ticket, validate_name};

/// Path of the ticket named `name` inside `dir`.
#[must_use]
pub fn ticket_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.{TICKET_EXTENSION}"))
}

/// Ticket name implied by a ticket file path (the filename stem).
#[must_use]
pub fn ticket_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
}

fn is_ticket_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == TICKET_EXTENSION)
}

/// Load one ticket.
///
/// # Errors
///
/// Returns `NotFound` if the file does not exist, `Decode` if it is not a
/// well-formed ticket, or `Io` on any other read failure.
pub fn get(path: impl AsRef<Path>) -> Result<Ticket> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| TicketError::io(path, e))?;
    serde_json::from_str(&contents).map_err(|source| TicketError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `ticket` to `dir/<name>.json`, creating or overwriting it.
///
/// The record is written to a hidden temp file next to the target and
/// renamed over it, so readers never observe a half-written ticket.
/// Nothing is guaranteed across multiple files.
///
/// # Errors
///
/// Returns `InvalidName` if the ticket name cannot be a filename, or `Io`
/// if the file cannot be written.
pub fn save(dir: impl AsRef<Path>, ticket: &Ticket) -> Result<PathBuf> {
    let dir = dir.as_ref();
    validate_name(&ticket.name)?;

    let path = dir.join(ticket.file_name());
    let tmp_path = dir.join(format!(".{}.tmp", ticket.file_name()));

    let mut json = serde_json::to_string_pretty(ticket)
        .map_err(|e| TicketError::io(&path, std::io::Error::other(e)))?;
    json.push('\n');

    let write_tmp = || -> std::io::Result<()> {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.flush()
    };
    write_tmp().map_err(|e| TicketError::io(&tmp_path, e))?;

    if let Err(e) = fs::rename(&tmp_path, &path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(TicketError::io(&path, e));
    }

    tracing::debug!(path = %path.display(), status = %ticket.status, "Saved ticket");
    Ok(path)
}

/// Remove a ticket file.
///
/// Returns `false` if the file was already absent.
///
/// # Errors
///
/// Returns `Io` if the file exists but cannot be removed.
pub fn delete(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Deleted ticket");
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(TicketError::io(path, e)),
    }
}

/// Every ticket file under `dir`, including nested sub-projects.
///
/// Order is unspecified.
///
/// # Errors
///
/// Returns `NotFound` if `dir` does not exist, or `Io` if any directory
/// in the tree cannot be read.
pub fn list(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut paths = Vec::new();

    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.map_err(|e| {
            let at = e.path().unwrap_or(dir).to_path_buf();
            TicketError::io(at, std::io::Error::from(e))
        })?;
        if entry.file_type().is_file() && is_ticket_file(entry.path()) {
            paths.push(entry.into_path());
        }
    }

    Ok(paths)
}

/// Ticket files directly inside `dir`, ignoring sub-projects.
///
/// This is the scope of a close cascade.
///
/// # Errors
///
/// Returns `NotFound` if `dir` does not exist, or `Io` if it cannot be read.
pub fn list_siblings(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|e| TicketError::io(dir, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| TicketError::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| TicketError::io(entry.path(), e))?;
        let path = entry.path();
        if file_type.is_file() && is_ticket_file(&path) {
            paths.push(path);
        }
    }

    Ok(paths)
}

/// Whether the ticket at `path` is closed.
///
/// Any read failure counts as "not closed". The failure is logged at debug
/// level and otherwise dropped; callers that need to distinguish should use
/// [`get`].
#[must_use]
pub fn is_closed(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    match get(path) {
        Ok(ticket) => ticket.is_closed(),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Treating unreadable ticket as not closed");
            false
        }
    }
}

/// Create and save a new ticket in `dir`.
///
/// Requested dependencies naming a sibling that is already closed are
/// dropped before the initial status is derived, so a ticket is never
/// born blocked on finished work.
///
/// # Errors
///
/// Returns `InvalidName` or `Io` from [`save`].
pub fn create(
    dir: impl AsRef<Path>,
    name: &str,
    detail: &str,
    requested_dependencies: &[String],
) -> Result<Ticket> {
    let dir = dir.as_ref();
    validate_name(name)?;

    let dependencies = requested_dependencies
        .iter()
        .filter(|dep| !is_closed(ticket_path(dir, dep)));
    let ticket = Ticket::new(name, detail, dependencies.cloned());

    save(dir, &ticket)?;
    tracing::info!(name = %ticket.name, status = %ticket.status, "Created ticket");
    Ok(ticket)
}
