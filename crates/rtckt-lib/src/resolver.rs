//! Closing tickets and cascading the closure to siblings.
//!
//! Dependencies are names of tickets in the same directory, so a close
//! only ever touches the target's immediate siblings. The cascade is not
//! transactional; re-running it for the same name converges to the same
//! end state because removing an absent dependency is a no-op.

use std::path::{Path, PathBuf};

use crate::error::{Result, TicketError};
use crate::model::{Status, Ticket};
use crate::store;

/// Result of [`close`].
#[derive(Debug)]
pub enum CloseOutcome {
    /// The target is blocked and was left untouched.
    Refused {
        name: String,
        /// Dependencies still outstanding on the target.
        pending: Vec<String>,
    },
    /// The target was closed and the cascade ran.
    Closed(CascadeReport),
}

impl CloseOutcome {
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed(_))
    }
}

/// What the cascade did to the target's siblings.
#[derive(Debug, Default)]
pub struct CascadeReport {
    /// Name of the closed ticket.
    pub name: String,
    /// The target was already closed before this call.
    pub already_closed: bool,
    /// Siblings that had the closed name removed from their dependencies.
    pub updated: Vec<String>,
    /// Siblings flipped from `Blocked` to `Open`.
    pub reopened: Vec<String>,
    /// Siblings that could not be read or written.
    pub failures: Vec<SiblingFailure>,
}

/// A sibling the cascade had to skip.
#[derive(Debug)]
pub struct SiblingFailure {
    pub path: PathBuf,
    pub error: TicketError,
}

/// Close the ticket at `path` and propagate the closure to its siblings.
///
/// A `Blocked` target is refused without writing anything. Otherwise the
/// target is saved as `Closed`, then every other ticket in the same
/// directory has the target's name removed from its dependencies, is
/// reopened if that left a blocked ticket with none, and is saved.
/// Closing an already-closed ticket re-runs the cascade.
///
/// Errors on individual siblings are logged and collected in the report;
/// they never abort the cascade.
///
/// # Errors
///
/// Returns the load error if the target cannot be read, or the save error
/// if the target itself cannot be written.
pub fn close(path: impl AsRef<Path>) -> Result<CloseOutcome> {
    let path = path.as_ref();
    let mut target = store::get(path)?;

    if target.status == Status::Blocked {
        tracing::info!(
            name = %target.name,
            pending = ?target.dependencies,
            "Refusing to close blocked ticket"
        );
        return Ok(CloseOutcome::Refused {
            name: target.name,
            pending: target.dependencies,
        });
    }

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let already_closed = target.is_closed();
    target.status = Status::Closed;
    store::save(dir, &target)?;
    tracing::info!(name = %target.name, already_closed, "Closed ticket");

    let mut report = CascadeReport {
        name: target.name.clone(),
        already_closed,
        ..CascadeReport::default()
    };
    cascade(dir, &target.name, &mut report);

    Ok(CloseOutcome::Closed(report))
}

fn cascade(dir: &Path, closed_name: &str, report: &mut CascadeReport) {
    let siblings = match store::list_siblings(dir) {
        Ok(siblings) => siblings,
        Err(error) => {
            tracing::warn!(dir = %dir.display(), %error, "Could not enumerate siblings for cascade");
            report.failures.push(SiblingFailure {
                path: dir.to_path_buf(),
                error,
            });
            return;
        }
    };

    for sibling_path in siblings {
        let mut sibling = match store::get(&sibling_path) {
            Ok(ticket) => ticket,
            Err(error) => {
                tracing::warn!(path = %sibling_path.display(), %error, "Skipping unreadable sibling");
                report.failures.push(SiblingFailure {
                    path: sibling_path,
                    error,
                });
                continue;
            }
        };

        if sibling.name == closed_name {
            continue;
        }

        let removed = sibling.remove_dependency(closed_name);
        let reopened = release(&mut sibling);

        if let Err(error) = store::save(dir, &sibling) {
            tracing::warn!(path = %sibling_path.display(), %error, "Failed to save sibling");
            report.failures.push(SiblingFailure {
                path: sibling_path,
                error,
            });
            continue;
        }

        if removed > 0 {
            tracing::debug!(sibling = %sibling.name, closed = closed_name, "Removed dependency");
            report.updated.push(sibling.name.clone());
        }
        if reopened {
            tracing::info!(sibling = %sibling.name, "Ticket unblocked");
            report.reopened.push(sibling.name);
        }
    }
}

/// Open a blocked ticket whose dependencies are all gone.
fn release(ticket: &mut Ticket) -> bool {
    if ticket.dependencies.is_empty() && ticket.status == Status::Blocked {
        ticket.status = Status::Open;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use proptest::prelude::*;
    use std::collections::BTreeSet;
    use std::fs;

    fn put(dir: &Path, name: &str, deps: &[&str]) -> PathBuf {
        store::save(dir, &Ticket::new(name, "", deps.iter().copied())).unwrap()
    }

    fn load(dir: &Path, name: &str) -> Ticket {
        store::get(store::ticket_path(dir, name)).unwrap()
    }

    fn dep_set(ticket: &Ticket) -> BTreeSet<String> {
        ticket.dependencies.iter().cloned().collect()
    }

    #[test]
    fn closing_last_dependency_reopens_sibling() {
        let dir = tempfile::tempdir().unwrap();
        let a = put(dir.path(), "A", &[]);
        put(dir.path(), "B", &["A"]);

        let outcome = close(&a).unwrap();

        let CloseOutcome::Closed(report) = outcome else {
            panic!("expected close to succeed");
        };
        assert_eq!(report.reopened, vec!["B"]);
        assert_eq!(report.updated, vec!["B"]);
        assert!(report.failures.is_empty());
        assert!(!report.already_closed);

        assert_eq!(load(dir.path(), "A").status, Status::Closed);
        let b = load(dir.path(), "B");
        assert!(b.dependencies.is_empty());
        assert_eq!(b.status, Status::Open);
    }

    #[test]
    fn sibling_with_remaining_dependencies_stays_blocked() {
        let dir = tempfile::tempdir().unwrap();
        let a = put(dir.path(), "A", &[]);
        put(dir.path(), "D", &[]);
        put(dir.path(), "C", &["A", "D"]);

        close(&a).unwrap();

        let c = load(dir.path(), "C");
        assert_eq!(dep_set(&c), BTreeSet::from(["D".to_string()]));
        assert_eq!(c.status, Status::Blocked);
    }

    #[test]
    fn blocked_target_is_refused_without_writes() {
        let dir = tempfile::tempdir().unwrap();
        put(dir.path(), "A", &[]);
        let b = put(dir.path(), "B", &["A"]);
        let c_path = put(dir.path(), "C", &["B"]);
        let before_b = fs::read_to_string(&b).unwrap();
        let before_c = fs::read_to_string(&c_path).unwrap();

        let outcome = close(&b).unwrap();

        match outcome {
            CloseOutcome::Refused { name, pending } => {
                assert_eq!(name, "B");
                assert_eq!(pending, vec!["A"]);
            }
            CloseOutcome::Closed(_) => panic!("blocked ticket must not close"),
        }
        assert_eq!(fs::read_to_string(&b).unwrap(), before_b);
        assert_eq!(fs::read_to_string(&c_path).unwrap(), before_c);
    }

    #[test]
    fn self_named_sibling_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        // A ticket that lists itself keeps that entry: the cascade never
        // rewrites the closed ticket's own record.
        let mut a = Ticket::new("A", "", Vec::<String>::new());
        a.dependencies = vec!["A".into()];
        let a_path = store::save(dir.path(), &a).unwrap();

        let CloseOutcome::Closed(report) = close(&a_path).unwrap() else {
            panic!("open ticket should close");
        };
        assert!(report.updated.is_empty());
        let reloaded = load(dir.path(), "A");
        assert_eq!(reloaded.status, Status::Closed);
        assert_eq!(reloaded.dependencies, vec!["A"]);
    }

    #[test]
    fn cascade_does_not_reach_subprojects() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        let a = put(dir.path(), "A", &[]);
        put(&sub, "B", &["A"]);

        close(&a).unwrap();

        let b = load(&sub, "B");
        assert_eq!(b.dependencies, vec!["A"]);
        assert_eq!(b.status, Status::Blocked);
    }

    #[test]
    fn bad_sibling_does_not_stop_cascade() {
        let dir = tempfile::tempdir().unwrap();
        let a = put(dir.path(), "A", &[]);
        put(dir.path(), "B", &["A"]);
        put(dir.path(), "C", &["A"]);
        let junk = dir.path().join("junk.json");
        fs::write(&junk, "not a ticket").unwrap();

        let CloseOutcome::Closed(report) = close(&a).unwrap() else {
            panic!("expected close to succeed");
        };

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, junk);
        assert_eq!(report.failures[0].error.kind(), ErrorKind::Decode);
        assert_eq!(load(dir.path(), "B").status, Status::Open);
        assert_eq!(load(dir.path(), "C").status, Status::Open);
    }

    #[test]
    fn unsavable_sibling_does_not_stop_cascade() {
        let dir = tempfile::tempdir().unwrap();
        let a = put(dir.path(), "A", &[]);
        put(dir.path(), "B", &["A"]);
        put(dir.path(), "C", &["A"]);
        // Readable, but its recorded name is not a valid filename so the
        // write-back fails.
        let odd = dir.path().join("odd.json");
        let odd_contents = r#"{"name":"x/y","dependencies":["A"],"status":1}"#;
        fs::write(&odd, odd_contents).unwrap();

        let CloseOutcome::Closed(report) = close(&a).unwrap() else {
            panic!("expected close to succeed");
        };

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, odd);
        assert_eq!(report.failures[0].error.kind(), ErrorKind::Validation);
        assert_eq!(fs::read_to_string(&odd).unwrap(), odd_contents);

        let mut reopened = report.reopened.clone();
        reopened.sort();
        assert_eq!(reopened, vec!["B", "C"]);
        assert_eq!(load(dir.path(), "B").status, Status::Open);
        assert_eq!(load(dir.path(), "C").status, Status::Open);
    }

    #[test]
    fn unrelated_sibling_is_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let a = put(dir.path(), "A", &[]);
        let u = dir.path().join("U.json");
        fs::write(&u, r#"{"name":"U","dependencies":["Z"],"status":1}"#).unwrap();

        let CloseOutcome::Closed(report) = close(&a).unwrap() else {
            panic!("expected close to succeed");
        };
        assert!(report.updated.is_empty());
        assert!(report.failures.is_empty());

        let rewritten = load(dir.path(), "U");
        assert_eq!(rewritten.dependencies, vec!["Z"]);
        assert_eq!(rewritten.status, Status::Blocked);
        let expected = format!("{}\n", serde_json::to_string_pretty(&rewritten).unwrap());
        assert_eq!(fs::read_to_string(&u).unwrap(), expected);
    }

    #[test]
    fn missing_target_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = close(dir.path().join("ghost.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn malformed_target_is_an_error_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "[1, 2").unwrap();
        put(dir.path(), "B", &["broken"]);

        let err = close(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(load(dir.path(), "B").status, Status::Blocked);
    }

    #[test]
    fn repeat_close_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let a = put(dir.path(), "A", &[]);
        put(dir.path(), "B", &["A"]);
        put(dir.path(), "C", &["A", "D"]);

        close(&a).unwrap();
        let b_once = load(dir.path(), "B");
        let c_once = load(dir.path(), "C");

        let CloseOutcome::Closed(report) = close(&a).unwrap() else {
            panic!("closed ticket should close again");
        };
        assert!(report.already_closed);
        assert!(report.updated.is_empty());
        assert!(report.reopened.is_empty());
        assert_eq!(load(dir.path(), "B"), b_once);
        assert_eq!(load(dir.path(), "C"), c_once);
    }

    #[test]
    fn closed_sibling_is_never_reopened() {
        let dir = tempfile::tempdir().unwrap();
        let a = put(dir.path(), "A", &[]);
        let mut done = Ticket::new("Done", "", Vec::<String>::new());
        done.status = Status::Closed;
        store::save(dir.path(), &done).unwrap();

        close(&a).unwrap();
        assert_eq!(load(dir.path(), "Done").status, Status::Closed);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Interrupting a cascade and re-running it lands on the same end
        /// state as an uninterrupted run.
        #[test]
        fn interrupted_cascade_converges(
            dep_lists in prop::collection::vec(
                prop::collection::vec(prop::sample::select(vec!["A", "X", "Y"]), 0..4),
                1..6,
            ),
            pre_applied in prop::collection::vec(any::<bool>(), 6),
        ) {
            let clean = tempfile::tempdir().unwrap();
            let partial = tempfile::tempdir().unwrap();

            for dir in [clean.path(), partial.path()] {
                put(dir, "A", &[]);
            }
            for (i, deps) in dep_lists.iter().enumerate() {
                let name = format!("T{i}");
                put(clean.path(), &name, deps);

                // Simulate a crash part-way through an earlier cascade: some
                // siblings already had "A" removed.
                let mut ticket = Ticket::new(name.as_str(), "", deps.iter().copied());
                if pre_applied[i] {
                    ticket.remove_dependency("A");
                    release(&mut ticket);
                }
                store::save(partial.path(), &ticket).unwrap();
            }

            close(clean.path().join("A.json")).unwrap();
            close(partial.path().join("A.json")).unwrap();

            for i in 0..dep_lists.len() {
                let name = format!("T{i}");
                let a = load(clean.path(), &name);
                let b = load(partial.path(), &name);
                prop_assert_eq!(dep_set(&a), dep_set(&b));
                prop_assert_eq!(a.status, b.status);
                prop_assert!(!a.depends_on("A"));
            }
        }
    }
}
