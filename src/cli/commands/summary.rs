//! Summary command: status counts and ready tickets for a project.

use crate::error::Result;
use crate::format::{SummaryOutput, format_fields, icons};
use crate::output::OutputContext;
use crate::session::Session;
use rtckt_lib::summary;

/// Execute the summary command.
///
/// # Errors
///
/// Returns an error if the project cannot be listed.
pub fn execute(session: &Session, ctx: &OutputContext) -> Result<()> {
    let dir = session.require_project()?;
    let output = SummaryOutput::new(session.display_path(&dir), summary::summarize(&dir)?);

    if ctx.is_json() {
        return ctx.json(&output);
    }

    let rows = [
        ("Project", output.project.clone()),
        ("Open", output.open.to_string()),
        ("Blocked", output.blocked.to_string()),
        ("Closed", output.closed.to_string()),
        ("Completion", format!("{}%", output.completion)),
    ];
    for line in format_fields(&rows) {
        ctx.line(line);
    }

    if !output.ready.is_empty() {
        ctx.line("\nReady to work on:");
        for name in &output.ready {
            ctx.line(format!("  {} {name}", icons::OPEN));
        }
    }
    if !output.unreadable.is_empty() {
        ctx.line(format!("\n{} unreadable ticket file(s):", output.unreadable.len()));
        for path in &output.unreadable {
            ctx.line(format!("  {path}"));
        }
    }
    Ok(())
}
