//! Output routing for command results.
//!
//! Text goes to stdout unless `--quiet`; JSON mode prints exactly one JSON
//! document per command so stdout stays machine-parseable.

use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Text,
    Json,
    Quiet,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OutputContext {
    mode: OutputMode,
}

impl OutputContext {
    /// JSON wins over quiet: a caller asking for JSON still gets the document.
    #[must_use]
    pub const fn from_flags(json: bool, quiet: bool) -> Self {
        let mode = if json {
            OutputMode::Json
        } else if quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Text
        };
        Self { mode }
    }

    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Print a human-readable line.
    pub fn line(&self, text: impl AsRef<str>) {
        if self.mode == OutputMode::Text {
            println!("{}", text.as_ref());
        }
    }

    /// Print a value as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns `Json` if serialization fails.
    pub fn json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}
