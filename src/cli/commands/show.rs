//! `tiercache show` command.

use std::io::Write;

use crate::cache::CacheStore;
use crate::cli::args::ShowArgs;
use crate::config::CacheConfig;
use crate::error::Result;

use super::dispatcher::{Command, CommandResult};

/// The show command implementation.
pub struct ShowCommand {
    config: CacheConfig,
    args: ShowArgs,
}

impl ShowCommand {
    pub fn new(config: &CacheConfig, args: ShowArgs) -> Self {
        Self {
            config: config.clone(),
            args,
        }
    }
}

/// Read a persisted cache file as text in the configured encoding.
pub(crate) fn read_cached_text(config: &CacheConfig, name: &str) -> Result<Option<String>> {
    let store = CacheStore::new(&config.root);
    match store.read_raw(name)? {
        Some(bytes) => Ok(Some(config.encoding.decode(&bytes)?)),
        None => Ok(None),
    }
}

impl Command for ShowCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        match read_cached_text(&self.config, &self.args.name)? {
            Some(text) => {
                write!(out, "{}", text)?;
                Ok(CommandResult::success())
            }
            None => {
                writeln!(out, "No cached file for '{}'", self.args.name)?;
                Ok(CommandResult::failure(1))
            }
        }
    }
}
