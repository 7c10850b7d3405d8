//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tiercache - Two-tier cache for slowly-changing source data.
#[derive(Debug, Parser)]
#[command(name = "tiercache")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides the default <config dir>/tiercache/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage root for cache files (overrides config and TIERCACHE_ROOT)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load a named cache, pulling from a JSON source file on a cold cache
    Load(LoadArgs),

    /// Delete a named cache's persisted file
    Invalidate(InvalidateArgs),

    /// List persisted cache files
    List(ListArgs),

    /// Delete every persisted cache file under the root
    Clear,

    /// Print a persisted cache file
    Show(ShowArgs),

    /// Write a persisted cache file into a single-entry zip archive
    Pack(PackArgs),
}

/// Arguments for the `load` command.
#[derive(Debug, Clone, clap::Args)]
pub struct LoadArgs {
    /// Cache name (file name under the storage root)
    pub name: String,

    /// JSON file holding an array of items, read when the cache is cold
    #[arg(long)]
    pub from: Option<PathBuf>,

    /// Fail on a corrupted cache file instead of reloading from source
    #[arg(long)]
    pub strict: bool,

    /// Print the loaded items as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `invalidate` command.
#[derive(Debug, Clone, clap::Args)]
pub struct InvalidateArgs {
    /// Cache name
    pub name: String,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ShowArgs {
    /// Cache name
    pub name: String,
}

/// Arguments for the `pack` command.
#[derive(Debug, Clone, clap::Args)]
pub struct PackArgs {
    /// Cache name
    pub name: String,

    /// Where to write the zip archive
    #[arg(short, long)]
    pub output: PathBuf,

    /// Entry name inside the archive (defaults to the cache name)
    #[arg(long)]
    pub entry: Option<String>,
}
