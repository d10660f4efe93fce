//! Per-invocation state shared by every command.
//!
//! Holds the root directory and the selected project so handlers never
//! reach for globals.

use std::path::{Component, Path, PathBuf};

use rtckt_lib::{model, store};

use crate::config::Config;
use crate::error::{RtError, Result};

#[derive(Debug, Clone)]
pub struct Session {
    root: PathBuf,
    project: Option<PathBuf>,
}

impl Session {
    /// Build a session from resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns `OutsideRoot` if the configured project is not a relative
    /// path below the root.
    pub fn new(config: &Config) -> Result<Self> {
        let project = config
            .project
            .as_deref()
            .map(relative_project)
            .transpose()?;
        Ok(Self {
            root: config.root.clone(),
            project,
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Replace the root with its canonical form once it exists on disk.
    pub fn canonicalize_root(&mut self) {
        if let Ok(root) = dunce::canonicalize(&self.root) {
            self.root = root;
        }
    }

    /// Directory of the selected project (the root if none is selected).
    #[must_use]
    pub fn project_dir(&self) -> PathBuf {
        self.project
            .as_ref()
            .map_or_else(|| self.root.clone(), |p| self.root.join(p))
    }

    /// Resolve a project path given relative to the root.
    ///
    /// # Errors
    ///
    /// Returns `OutsideRoot` for absolute paths or paths using `..`.
    pub fn resolve_project(&self, path: &str) -> Result<PathBuf> {
        Ok(self.root.join(relative_project(path)?))
    }

    /// Path of the named ticket in the selected project.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` if the name is empty or contains a path
    /// separator, so it can never point outside the project directory.
    pub fn ticket_path(&self, name: &str) -> Result<PathBuf> {
        model::validate_name(name)?;
        Ok(store::ticket_path(&self.project_dir(), name))
    }

    /// Path relative to the root, for display.
    #[must_use]
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root).map_or_else(
            |_| path.display().to_string(),
            |rel| {
                if rel.as_os_str().is_empty() {
                    ".".to_string()
                } else {
                    rel.display().to_string()
                }
            },
        )
    }

    /// Fail unless the selected project directory exists.
    ///
    /// # Errors
    ///
    /// Returns `ProjectNotFound` if it is missing.
    pub fn require_project(&self) -> Result<PathBuf> {
        let dir = self.project_dir();
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(RtError::ProjectNotFound { path: dir })
        }
    }
}

fn relative_project(path: &str) -> Result<PathBuf> {
    let candidate = Path::new(path);
    let escapes = candidate.components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes {
        return Err(RtError::OutsideRoot {
            path: path.to_string(),
        });
    }
    Ok(candidate.to_path_buf())
}
