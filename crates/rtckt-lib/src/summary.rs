//! Per-project status counts.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::model::Status;
use crate::store;

/// Status counts over a project and its sub-projects.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ProjectSummary {
    pub open: usize,
    pub blocked: usize,
    pub closed: usize,
    /// Open tickets, i.e. those ready to be worked on, sorted by name.
    pub ready: Vec<String>,
    /// Ticket files that could not be read.
    pub unreadable: Vec<PathBuf>,
}

impl ProjectSummary {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.open + self.blocked + self.closed
    }

    /// Share of closed tickets as a whole percentage.
    ///
    /// An empty project counts as complete.
    #[must_use]
    pub fn completion(&self) -> u8 {
        let total = self.total();
        if total == 0 {
            return 100;
        }
        u8::try_from(self.closed * 100 / total).unwrap_or(100)
    }
}

/// Summarize every ticket under `dir`.
///
/// # Errors
///
/// Returns an error if the directory tree cannot be listed. Individual
/// unreadable tickets are reported in [`ProjectSummary::unreadable`].
pub fn summarize(dir: impl AsRef<Path>) -> Result<ProjectSummary> {
    let mut summary = ProjectSummary::default();

    for path in store::list(dir)? {
        match store::get(&path) {
            Ok(ticket) => match ticket.status {
                Status::Open => {
                    summary.open += 1;
                    summary.ready.push(ticket.name);
                }
                Status::Blocked => summary.blocked += 1,
                Status::Closed => summary.closed += 1,
            },
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "Skipping unreadable ticket in summary");
                summary.unreadable.push(path);
            }
        }
    }

    summary.ready.sort();
    summary.unreadable.sort();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Ticket;
    use crate::resolver;

    #[test]
    fn empty_project_is_complete() {
        let dir = tempfile::tempdir().unwrap();
        let summary = summarize(dir.path()).unwrap();
        assert_eq!(summary.total(), 0);
        assert_eq!(summary.completion(), 100);
    }

    #[test]
    fn counts_include_subprojects() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        let a = store::save(dir.path(), &Ticket::new("A", "", Vec::<String>::new())).unwrap();
        store::save(dir.path(), &Ticket::new("B", "", ["A"])).unwrap();
        store::save(dir.path(), &Ticket::new("C", "", ["A", "X"])).unwrap();
        store::save(&sub, &Ticket::new("D", "", Vec::<String>::new())).unwrap();
        resolver::close(a).unwrap();

        let summary = summarize(dir.path()).unwrap();
        assert_eq!(summary.closed, 1);
        assert_eq!(summary.blocked, 1);
        assert_eq!(summary.open, 2);
        assert_eq!(summary.ready, vec!["B", "D"]);
        assert_eq!(summary.completion(), 25);
    }

    #[test]
    fn unreadable_tickets_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        store::save(dir.path(), &Ticket::new("A", "", Vec::<String>::new())).unwrap();
        std::fs::write(dir.path().join("bad.json"), "nope").unwrap();

        let summary = summarize(dir.path()).unwrap();
        assert_eq!(summary.open, 1);
        assert_eq!(summary.unreadable, vec![dir.path().join("bad.json")]);
    }
}
