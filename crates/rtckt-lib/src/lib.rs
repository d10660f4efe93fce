//! `rtckt-lib` — ticket store and dependency cascade engine.
//!
//! Tickets are JSON files named after the ticket, grouped in nested
//! project directories. A ticket may list sibling tickets it depends on;
//! closing a ticket removes it from every sibling's dependency list and
//! unblocks siblings left with nothing to wait for.
//!
//! All operations are synchronous and go straight to the filesystem.
//! A single process is assumed to be the only writer under a root.
//!
//! # Quick Start
//!
//! ```no_run
//! use rtckt_lib::{CloseOutcome, project, resolver, store};
//!
//! let root = project::setup(project::default_root().unwrap()).unwrap();
//! let work = root.join("work");
//! project::new_project(&work).unwrap();
//!
//! store::create(&work, "design", "sketch the schema", &[]).unwrap();
//! store::create(&work, "build", "", &["design".to_string()]).unwrap();
//!
//! if let CloseOutcome::Closed(report) = resolver::close(store::ticket_path(&work, "design")).unwrap() {
//!     assert_eq!(report.reopened, vec!["build"]);
//! }
//! ```

pub mod error;
pub mod model;
pub mod project;
pub mod resolver;
pub mod store;
pub mod summary;

pub use error::{ErrorKind, Result, TicketError};
pub use model::{Status, Ticket};
pub use project::ProjectNode;
pub use resolver::{CascadeReport, CloseOutcome, SiblingFailure};
pub use summary::ProjectSummary;
