//! Project directories.
//!
//! A project is any directory under the root; sub-projects nest to
//! arbitrary depth. Deleting a project removes everything beneath it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Result, TicketError};
use crate::model::TICKET_EXTENSION;

/// Name of the root project directory inside the home directory.
pub const ROOT_DIR_NAME: &str = "rtckt";

/// Default root: `$HOME/rtckt`.
///
/// # Errors
///
/// Returns `HomeDirNotFound` if the home directory cannot be determined.
pub fn default_root() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(ROOT_DIR_NAME))
        .ok_or(TicketError::HomeDirNotFound)
}

/// Ensure the root project directory exists and return it.
///
/// # Errors
///
/// Returns `Io` if the directory cannot be created.
pub fn setup(root: impl AsRef<Path>) -> Result<PathBuf> {
    let root = root.as_ref();
    fs::create_dir_all(root).map_err(|e| TicketError::io(root, e))?;
    tracing::debug!(root = %root.display(), "Root project directory ready");
    Ok(root.to_path_buf())
}

/// Create a project directory. Existing directories are left alone.
///
/// # Errors
///
/// Returns `Io` if the directory cannot be created, including when a
/// regular file already occupies the path.
pub fn new_project(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::create_dir_all(path).map_err(|e| TicketError::io(path, e))?;
    tracing::info!(path = %path.display(), "Created project");
    Ok(())
}

/// Recursively delete a project with all its tickets and sub-projects.
///
/// Returns `false` if the directory was already absent.
///
/// # Errors
///
/// Returns `Io` if anything under the directory cannot be removed.
pub fn delete_project(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    match fs::remove_dir_all(path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "Deleted project");
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(TicketError::io(path, e)),
    }
}

/// One directory in the project tree.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProjectNode {
    pub name: String,
    pub path: PathBuf,
    /// Ticket names directly in this project, sorted.
    pub tickets: Vec<String>,
    /// Sub-projects, sorted by name.
    pub children: Vec<ProjectNode>,
}

impl ProjectNode {
    /// Total tickets in this project and every sub-project.
    #[must_use]
    pub fn ticket_count(&self) -> usize {
        self.tickets.len()
            + self
                .children
                .iter()
                .map(Self::ticket_count)
                .sum::<usize>()
    }
}

/// Build the project tree rooted at `dir`.
///
/// # Errors
///
/// Returns `NotFound` or `Io` if any directory cannot be read.
pub fn tree(dir: impl AsRef<Path>) -> Result<ProjectNode> {
    let dir = dir.as_ref();
    let name = dir
        .file_name()
        .map_or_else(|| dir.display().to_string(), |n| n.to_string_lossy().into_owned());

    let mut node = ProjectNode {
        name,
        path: dir.to_path_buf(),
        tickets: Vec::new(),
        children: Vec::new(),
    };

    let entries = fs::read_dir(dir).map_err(|e| TicketError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| TicketError::io(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| TicketError::io(&path, e))?;

        if file_type.is_dir() {
            node.children.push(tree(&path)?);
        } else if file_type.is_file()
            && path.extension().is_some_and(|ext| ext == TICKET_EXTENSION)
        {
            if let Some(stem) = path.file_stem() {
                node.tickets.push(stem.to_string_lossy().into_owned());
            }
        }
    }

    node.tickets.sort();
    node.children.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(node)
}
