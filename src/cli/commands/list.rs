//! `tiercache list` command.

use std::io::Write;

use crate::cache::CacheStore;
use crate::cli::args::ListArgs;
use crate::config::CacheConfig;
use crate::error::Result;

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    store: CacheStore,
    args: ListArgs,
}

impl ListCommand {
    pub fn new(config: &CacheConfig, args: ListArgs) -> Self {
        Self {
            store: CacheStore::new(&config.root),
            args,
        }
    }
}

impl Command for ListCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let files = self.store.list()?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&files).map_err(anyhow::Error::from)?;
            writeln!(out, "{}", json)?;
            return Ok(CommandResult::success());
        }

        if files.is_empty() {
            writeln!(out, "No cached files in {}", self.store.root().display())?;
            return Ok(CommandResult::success());
        }

        writeln!(out, "{} cached files:\n", files.len())?;
        for file in &files {
            writeln!(
                out,
                "  {:<24} {:>10} bytes  {}",
                file.name,
                file.size_bytes,
                file.modified.format("%Y-%m-%d %H:%M:%S")
            )?;
        }
        writeln!(out, "\n  Total size: {} bytes", self.store.total_size()?)?;

        Ok(CommandResult::success())
    }
}
