//! Command implementations.
//!
//! Each command takes its parsed arguments, the [`Session`](crate::session::Session)
//! and the [`OutputContext`](crate::output::OutputContext).

pub mod close;
pub mod create;
pub mod delete;
pub mod init;
pub mod list;
pub mod project;
pub mod show;
pub mod summary;
pub mod tree;
pub mod version;
