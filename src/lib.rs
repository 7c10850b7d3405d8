//! tiercache - Two-tier cache for slowly-changing source data.
//!
//! A [`FileBasedCache`](cache::FileBasedCache) keeps an expensive data set
//! in a pluggable memory cache and a persisted file, and only goes back to
//! the source when both are empty. Small helpers for update-if-changed
//! records, text encodings, and zip streams round it out.
//!
//! # Modules
//!
//! - [`cache`] - Two-tier cache, memory-cache capability, file codec, storage layout
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and environment overrides
//! - [`encoding`] - Text encodings for files and streams
//! - [`error`] - Error types and result aliases
//! - [`streams`] - String streams and single-entry zip archives
//! - [`updaters`] - Update-if-changed helpers and typed text parsing
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tiercache::cache::{CacheSource, FileBasedCache, InMemoryCache, LoadOrigin};
//!
//! struct Countries;
//!
//! impl CacheSource for Countries {
//!     type Item = (String, String);
//!
//!     fn load_from_source(&mut self) -> anyhow::Result<Vec<(String, String)>> {
//!         Ok(vec![("FR".into(), "France".into()), ("JP".into(), "Japan".into())])
//!     }
//! }
//!
//! let root = tempfile::tempdir().unwrap();
//! let memory = Arc::new(InMemoryCache::new());
//!
//! let mut cache = FileBasedCache::new(memory, "countries", root.path(), Countries).unwrap();
//! assert_eq!(cache.load().unwrap(), LoadOrigin::Source);
//! assert_eq!(cache.load().unwrap(), LoadOrigin::Memory);
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod encoding;
pub mod error;
pub mod streams;
pub mod updaters;

pub use error::{CacheError, Result};
