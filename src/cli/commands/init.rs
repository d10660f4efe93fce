use crate::error::Result;
use crate::output::OutputContext;
use crate::session::Session;
use rtckt_lib::project;
use serde::Serialize;

#[derive(Serialize)]
struct InitOutput {
    root: String,
}

/// Execute the init command.
///
/// # Errors
///
/// Returns an error if the root directory cannot be created.
pub fn execute(session: &mut Session, ctx: &OutputContext) -> Result<()> {
    project::setup(session.root())?;
    session.canonicalize_root();

    let root = session.root().display().to_string();
    if ctx.is_json() {
        return ctx.json(&InitOutput { root });
    }
    ctx.line(format!("Ticket root ready at {root}"));
    Ok(())
}
