//! `tiercache invalidate` command.

use std::io::Write;
use std::sync::Arc;

use crate::cache::{FileBasedCache, NoopCache};
use crate::cli::args::InvalidateArgs;
use crate::config::CacheConfig;
use crate::error::Result;

use super::dispatcher::{Command, CommandResult};
use super::source::JsonFileSource;

/// The invalidate command implementation.
pub struct InvalidateCommand {
    config: CacheConfig,
    args: InvalidateArgs,
}

impl InvalidateCommand {
    pub fn new(config: &CacheConfig, args: InvalidateArgs) -> Self {
        Self {
            config: config.clone(),
            args,
        }
    }
}

impl Command for InvalidateCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let mut cache = FileBasedCache::new(
            Arc::new(NoopCache),
            self.args.name.as_str(),
            &self.config.root,
            JsonFileSource::default(),
        )?;

        let existed = cache.path().exists();
        cache.invalidate_cache()?;

        if existed {
            writeln!(out, "Invalidated '{}'", cache.key())?;
        } else {
            writeln!(out, "Nothing cached for '{}'", cache.key())?;
        }

        Ok(CommandResult::success())
    }
}
