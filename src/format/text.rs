//! Text formatting functions for `rt`.
//!
//! Provides plain text (non-ANSI) formatting for terminal output:
//! - Status icons (○ ● ✓)
//! - Ticket line formatting
//! - Project tree rendering

use rtckt_lib::{ProjectNode, Status, Ticket};
use unicode_width::UnicodeWidthStr;

/// Status icon characters.
pub mod icons {
    /// Open ticket - ready to work on (hollow circle).
    pub const OPEN: &str = "○";
    /// Blocked - waiting on dependencies (filled circle).
    pub const BLOCKED: &str = "●";
    /// Closed - completed (checkmark).
    pub const CLOSED: &str = "✓";
    /// Project directory.
    pub const PROJECT: &str = "▸";
}

/// Return the icon character for a status.
#[must_use]
pub const fn format_status_icon(status: Status) -> &'static str {
    match status {
        Status::Open => icons::OPEN,
        Status::Blocked => icons::BLOCKED,
        Status::Closed => icons::CLOSED,
    }
}

/// Format a single-line ticket summary.
///
/// Format: `{icon} {name} [{status}]` with ` <- dep, dep` appended while
/// dependencies remain.
#[must_use]
pub fn format_ticket_line(ticket: &Ticket) -> String {
    let mut line = format!(
        "{} {} [{}]",
        format_status_icon(ticket.status),
        ticket.name,
        ticket.status
    );
    if !ticket.dependencies.is_empty() {
        let mut deps = ticket.dependencies.clone();
        deps.sort();
        line.push_str(&format!(" <- {}", deps.join(", ")));
    }
    line
}

/// Render `label: value` rows with the values aligned.
#[must_use]
pub fn format_fields(rows: &[(&str, String)]) -> Vec<String> {
    let width = rows
        .iter()
        .map(|(label, _)| label.width())
        .max()
        .unwrap_or(0);
    rows.iter()
        .map(|(label, value)| {
            let pad = width - label.width();
            format!("{label}:{} {value}", " ".repeat(pad))
        })
        .collect()
}

/// Render a project tree, one line per project or ticket.
///
/// Ticket names are given their status icon by `status_of`; `None` marks a
/// ticket that could not be read.
#[must_use]
pub fn format_tree<F>(root: &ProjectNode, status_of: &F) -> Vec<String>
where
    F: Fn(&ProjectNode, &str) -> Option<Status>,
{
    let mut lines = vec![format!("{} {}", icons::PROJECT, root.name)];
    push_children(root, "", status_of, &mut lines);
    lines
}

fn push_children<F>(node: &ProjectNode, prefix: &str, status_of: &F, lines: &mut Vec<String>)
where
    F: Fn(&ProjectNode, &str) -> Option<Status>,
{
    let total = node.children.len() + node.tickets.len();
    let mut index = 0;

    for child in &node.children {
        index += 1;
        let (branch, next) = connectors(index == total);
        lines.push(format!("{prefix}{branch}{} {}", icons::PROJECT, child.name));
        push_children(child, &format!("{prefix}{next}"), status_of, lines);
    }

    for ticket in &node.tickets {
        index += 1;
        let (branch, _) = connectors(index == total);
        let icon = status_of(node, ticket).map_or("?", format_status_icon);
        lines.push(format!("{prefix}{branch}{icon} {ticket}"));
    }
}

const fn connectors(last: bool) -> (&'static str, &'static str) {
    if last {
        ("└── ", "    ")
    } else {
        ("├── ", "│   ")
    }
}
