//! `tiercache clear` command.

use std::io::Write;

use crate::cache::CacheStore;
use crate::config::CacheConfig;
use crate::error::Result;

use super::dispatcher::{Command, CommandResult};

/// The clear command implementation.
pub struct ClearCommand {
    store: CacheStore,
}

impl ClearCommand {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            store: CacheStore::new(&config.root),
        }
    }
}

impl Command for ClearCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let removed = self.store.clear()?;

        if removed == 0 {
            writeln!(out, "Cache is already empty")?;
        } else {
            tracing::info!("Cleared {} cache files from {:?}", removed, self.store.root());
            writeln!(out, "Cleared {} cached files", removed)?;
        }

        Ok(CommandResult::success())
    }
}
