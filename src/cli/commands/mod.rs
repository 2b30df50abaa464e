//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. `installed` and `check` share
//! store selection through [`host::HostAccess`].

pub mod catalog;
pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod host;
pub mod installed;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, EXIT_UNAVAILABLE};
