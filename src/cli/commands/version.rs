//! Version command implementation.

use crate::error::Result;
use crate::output::OutputContext;
use serde::Serialize;

#[derive(Serialize)]
struct VersionOutput<'a> {
    version: &'a str,
    build: &'a str,
    engine: &'a str,
}

/// Execute the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(ctx: &OutputContext) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    let build = if cfg!(debug_assertions) {
        "dev"
    } else {
        "release"
    };

    if ctx.is_json() {
        return ctx.json(&VersionOutput {
            version,
            build,
            engine: "rtckt-lib",
        });
    }
    ctx.line(format!("rt {version} ({build})"));
    Ok(())
}
