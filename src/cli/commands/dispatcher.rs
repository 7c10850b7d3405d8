//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::io::Write;

use crate::cli::args::{Cli, Commands};
use crate::config::CacheConfig;
use crate::error::Result;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command, writing user-facing output to `out`.
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Process exit status. Codes outside `0..=255` map to 1.
    pub fn exit_status(&self) -> u8 {
        u8::try_from(self.exit_code).unwrap_or(1)
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    config: CacheConfig,
}

impl CommandDispatcher {
    /// Create a new dispatcher with resolved configuration.
    pub fn new(config: CacheConfig) -> Self {
        Self { config }
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, out: &mut dyn Write) -> Result<CommandResult> {
        match &cli.command {
            Commands::Load(args) => {
                let cmd = super::load::LoadCommand::new(&self.config, args.clone());
                cmd.execute(out)
            }
            Commands::Invalidate(args) => {
                let cmd = super::invalidate::InvalidateCommand::new(&self.config, args.clone());
                cmd.execute(out)
            }
            Commands::List(args) => {
                let cmd = super::list::ListCommand::new(&self.config, args.clone());
                cmd.execute(out)
            }
            Commands::Clear => {
                let cmd = super::clear::ClearCommand::new(&self.config);
                cmd.execute(out)
            }
            Commands::Show(args) => {
                let cmd = super::show::ShowCommand::new(&self.config, args.clone());
                cmd.execute(out)
            }
            Commands::Pack(args) => {
                let cmd = super::pack::PackCommand::new(&self.config, args.clone());
                cmd.execute(out)
            }
        }
    }
}
