//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! routed by [`CommandDispatcher`].

pub mod clear;
pub mod dispatcher;
pub mod invalidate;
pub mod list;
pub mod load;
pub mod pack;
pub mod show;
pub mod source;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use source::JsonFileSource;
