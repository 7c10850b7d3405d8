//! `tiercache pack` command.

use std::fs;
use std::io::Write;

use crate::cli::args::PackArgs;
use crate::config::CacheConfig;
use crate::error::Result;
use crate::streams::compressed_stream_from_string;

use super::dispatcher::{Command, CommandResult};
use super::show::read_cached_text;

/// The pack command implementation.
pub struct PackCommand {
    config: CacheConfig,
    args: PackArgs,
}

impl PackCommand {
    pub fn new(config: &CacheConfig, args: PackArgs) -> Self {
        Self {
            config: config.clone(),
            args,
        }
    }
}

impl Command for PackCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let Some(text) = read_cached_text(&self.config, &self.args.name)? else {
            writeln!(out, "No cached file for '{}'", self.args.name)?;
            return Ok(CommandResult::failure(1));
        };

        let entry = self.args.entry.as_deref().unwrap_or(&self.args.name);
        let stream = compressed_stream_from_string(entry, &text)?;
        fs::write(&self.args.output, stream.into_inner())?;

        writeln!(
            out,
            "Packed '{}' into {}",
            self.args.name,
            self.args.output.display()
        )?;
        Ok(CommandResult::success())
    }
}
