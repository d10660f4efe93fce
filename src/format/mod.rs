//! Output formatting for `rt`.
//!
//! Supports both human-readable text output and machine-parseable JSON.
//!
//! # JSON Output Types
//!
//! - [`TicketDetails`] - Ticket with its location (show/new)
//! - [`TicketEntry`] - One ticket in a listing (list)
//! - [`CloseReport`] - Outcome of a close and its cascade (close)
//! - [`SummaryOutput`] - Status counts for a project (summary)

mod output;
mod text;

pub use output::{CloseReport, SummaryOutput, TicketDetails, TicketEntry, Unreadable};
pub use text::{format_fields, format_status_icon, format_ticket_line, format_tree, icons};
