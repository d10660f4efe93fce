//! `rtckt` - personal ticket tracker
//!
//! This crate provides the `rt` command line, a thin presentation layer
//! over the `rtckt-lib` ticket engine.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Configuration management (YAML file + env + flags)
//! - [`session`] - Root and selected project for one invocation
//! - [`error`] - Error types and handling
//! - [`format`] - Output formatting (text, JSON)
//! - [`output`] - Routing of text/JSON output
//! - [`logging`] - tracing subscriber setup

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod output;
pub mod session;

pub use error::{Result, RtError};

/// Run the CLI application.
///
/// This is the main entry point called from `main()`.
///
/// # Errors
///
/// Returns an error if command execution fails.
pub fn run() -> anyhow::Result<()> {
    cli::run()
}
