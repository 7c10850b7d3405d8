//! Two-tier caching system.
//!
//! This module provides [`FileBasedCache`], which keeps source data in a
//! pluggable memory cache and a persisted file, plus the pieces it is
//! built from:
//!
//! - [`codec`] - text (de)serialization of persisted files
//! - [`file_based`] - the two-tier cache and the [`CacheSource`] trait
//! - [`memory`] - the [`MemoryCache`] capability and its implementations
//! - [`store`] - `<root>/<name>` storage layout

pub mod codec;
pub mod file_based;
pub mod memory;
pub mod store;

pub use codec::{FileCodec, Format};
pub use file_based::{CacheSource, FileBasedCache, LoadOrigin};
pub use memory::{CachedValue, InMemoryCache, MemoryCache, MemoryCacheExt, NoopCache};
pub use store::{CacheStore, StoredFile};

/// Get the default storage root.
pub fn default_cache_dir() -> std::path::PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("tiercache"))
        .unwrap_or_else(|| std::path::PathBuf::from(".tiercache"))
}
