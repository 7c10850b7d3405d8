//! Command-line interface for tiercache.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, InvalidateArgs, ListArgs, LoadArgs, PackArgs, ShowArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
