use crate::error::Result;
use crate::format::format_tree;
use crate::output::OutputContext;
use crate::session::Session;
use rtckt_lib::{ProjectNode, store};

/// Execute the tree command.
///
/// # Errors
///
/// Returns an error if any directory under the project cannot be read.
pub fn execute(session: &Session, ctx: &OutputContext) -> Result<()> {
    let dir = session.require_project()?;
    let root = rtckt_lib::project::tree(&dir)?;

    if ctx.is_json() {
        return ctx.json(&root);
    }

    let status_of = |node: &ProjectNode, name: &str| {
        store::get(store::ticket_path(&node.path, name))
            .map(|t| t.status)
            .map_err(|e| tracing::debug!(ticket = name, error = %e, "Unreadable ticket in tree"))
            .ok()
    };
    for line in format_tree(&root, &status_of) {
        ctx.line(line);
    }
    Ok(())
}
