use rtckt_lib::{CascadeReport, ProjectSummary, Status, Ticket};
use serde::Serialize;

/// Ticket with its location, for show/new views.
#[derive(Debug, Clone, Serialize)]
pub struct TicketDetails {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub status_name: &'static str,
    pub project: String,
    pub path: String,
}

impl TicketDetails {
    #[must_use]
    pub fn new(ticket: Ticket, project: String, path: String) -> Self {
        Self {
            status_name: ticket.status.as_str(),
            ticket,
            project,
            path,
        }
    }
}

/// One row of a ticket listing.
#[derive(Debug, Clone, Serialize)]
pub struct TicketEntry {
    pub name: String,
    pub status: Status,
    pub status_name: &'static str,
    pub dependencies: Vec<String>,
    pub project: String,
}

/// A file the listing could not read.
#[derive(Debug, Clone, Serialize)]
pub struct Unreadable {
    pub path: String,
    pub error: String,
}

/// Result of a close for `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct CloseReport {
    pub name: String,
    pub closed: bool,
    pub already_closed: bool,
    /// Outstanding dependencies when the close was refused.
    pub pending: Vec<String>,
    pub updated: Vec<String>,
    pub reopened: Vec<String>,
    pub failures: Vec<Unreadable>,
}

impl CloseReport {
    #[must_use]
    pub fn refused(name: String, pending: Vec<String>) -> Self {
        Self {
            name,
            closed: false,
            already_closed: false,
            pending,
            updated: Vec::new(),
            reopened: Vec::new(),
            failures: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_cascade(report: CascadeReport) -> Self {
        Self {
            name: report.name,
            closed: true,
            already_closed: report.already_closed,
            pending: Vec::new(),
            updated: report.updated,
            reopened: report.reopened,
            failures: report
                .failures
                .into_iter()
                .map(|f| Unreadable {
                    path: f.path.display().to_string(),
                    error: f.error.to_string(),
                })
                .collect(),
        }
    }
}

/// Project overview for `summary`.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryOutput {
    pub project: String,
    pub open: usize,
    pub blocked: usize,
    pub closed: usize,
    pub total: usize,
    pub completion: u8,
    pub ready: Vec<String>,
    pub unreadable: Vec<String>,
}

impl SummaryOutput {
    #[must_use]
    pub fn new(project: String, summary: ProjectSummary) -> Self {
        Self {
            project,
            open: summary.open,
            blocked: summary.blocked,
            closed: summary.closed,
            total: summary.total(),
            completion: summary.completion(),
            ready: summary.ready,
            unreadable: summary
                .unreadable
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
        }
    }
}
