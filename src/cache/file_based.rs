//! Two-tier source cache.
//!
//! A [`FileBasedCache`] keeps a snapshot of slowly-changing source data in
//! two places: a pluggable [`MemoryCache`] and a persisted file at
//! `<root>/<name>`. [`FileBasedCache::load`] consults them in that order
//! and only falls back to the [`CacheSource`] when both miss. Deleting the
//! file (or calling [`FileBasedCache::invalidate_cache`]) forces a reload.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::codec::FileCodec;
use super::memory::{MemoryCache, MemoryCacheExt};
use super::store::{remove_if_exists, CacheStore};
use crate::error::{CacheError, Result};

/// The upstream data behind a [`FileBasedCache`].
///
/// Implement this for each data set you want cached.
pub trait CacheSource {
    /// Element type of the cached collection.
    type Item: Serialize + DeserializeOwned + Clone + Send + Sync + 'static;

    /// Pull the full collection from the source.
    ///
    /// Must return every item or fail; there is no partial result.
    fn load_from_source(&mut self) -> anyhow::Result<Vec<Self::Item>>;

    /// Build derived structures (indexes, lookups) from freshly loaded items.
    ///
    /// Called exactly once after every successful load, whichever tier
    /// supplied the items.
    fn initialize(&mut self, _items: &[Self::Item]) {}
}

/// Which tier satisfied a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    Memory,
    File,
    Source,
}

impl fmt::Display for LoadOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LoadOrigin::Memory => "memory",
            LoadOrigin::File => "file",
            LoadOrigin::Source => "source",
        };
        f.write_str(label)
    }
}

/// A named collection cached in memory and on disk.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tiercache::cache::{CacheSource, FileBasedCache, LoadOrigin, NoopCache};
///
/// struct Regions;
///
/// impl CacheSource for Regions {
///     type Item = String;
///
///     fn load_from_source(&mut self) -> anyhow::Result<Vec<String>> {
///         Ok(vec!["north".into(), "south".into()])
///     }
/// }
///
/// let root = tempfile::tempdir().unwrap();
/// let mut cache = FileBasedCache::new(Arc::new(NoopCache), "regions", root.path(), Regions).unwrap();
///
/// assert_eq!(cache.load().unwrap(), LoadOrigin::Source);
/// assert_eq!(cache.load().unwrap(), LoadOrigin::File);
/// assert_eq!(cache.items().unwrap().len(), 2);
/// ```
pub struct FileBasedCache<S: CacheSource> {
    memory: Arc<dyn MemoryCache>,
    name: String,
    path: PathBuf,
    codec: FileCodec,
    ignore_corruption: bool,
    items: Option<Vec<S::Item>>,
    source: S,
}

impl<S: CacheSource> FileBasedCache<S> {
    /// Create a cache named `name` under `root`.
    ///
    /// The name doubles as the memory-cache key and the file name. The
    /// root directory (and any missing parents) is created here.
    pub fn new(
        memory: Arc<dyn MemoryCache>,
        name: impl Into<String>,
        root: impl Into<PathBuf>,
        source: S,
    ) -> Result<Self> {
        let name = name.into();
        let store = CacheStore::new(root);
        let path = store.path_for(&name)?;
        store.ensure_dir()?;

        tracing::debug!("Cache '{}' persisted at {:?}", name, path);

        Ok(Self {
            memory,
            name,
            path,
            codec: FileCodec::default(),
            ignore_corruption: true,
            items: None,
            source,
        })
    }

    /// Set whether a corrupted file is discarded and reloaded (default) or fatal.
    pub fn with_ignore_corruption(mut self, ignore: bool) -> Self {
        self.ignore_corruption = ignore;
        self
    }

    /// Use a different codec for the persisted file.
    pub fn with_codec(mut self, codec: FileCodec) -> Self {
        self.codec = codec;
        self
    }

    pub fn set_ignore_corruption(&mut self, ignore: bool) {
        self.ignore_corruption = ignore;
    }

    pub fn ignore_corruption(&self) -> bool {
        self.ignore_corruption
    }

    /// Cache key (and file name).
    pub fn key(&self) -> &str {
        &self.name
    }

    /// Path of the persisted file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn codec(&self) -> &FileCodec {
        &self.codec
    }

    /// Loaded items, or `None` before the first load and after invalidation.
    pub fn items(&self) -> Option<&[S::Item]> {
        self.items.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.items.is_some()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Load the items from the first tier that has them.
    ///
    /// Order: memory cache, persisted file, source. Items read from the
    /// file are pushed into memory; items pulled from the source are
    /// written to the file and then to memory. [`CacheSource::initialize`]
    /// runs once afterwards.
    pub fn load(&mut self) -> Result<LoadOrigin> {
        let origin = if self.memory.contains(&self.name) {
            let items = self
                .memory
                .get_typed::<Vec<S::Item>>(&self.name)
                .ok_or_else(|| CacheError::MemoryCache {
                    key: self.name.clone(),
                })?;
            tracing::debug!("Cache '{}' hit in memory", self.name);
            self.items = Some(items);
            LoadOrigin::Memory
        } else {
            let origin = match self.load_from_file()? {
                Some(items) => {
                    tracing::debug!("Cache '{}' loaded {} items from file", self.name, items.len());
                    self.items = Some(items);
                    LoadOrigin::File
                }
                None => {
                    let items = self.load_from_source()?;
                    self.codec.serialize_to_file(&items, &self.path)?;
                    self.items = Some(items);
                    LoadOrigin::Source
                }
            };
            self.save_to_memory();
            origin
        };

        if let Some(items) = self.items.as_deref() {
            self.source.initialize(items);
        }

        Ok(origin)
    }

    /// Clear both tiers and forget the loaded items.
    ///
    /// Safe to call repeatedly or before any load. Does not reload.
    pub fn invalidate_cache(&mut self) -> Result<()> {
        if remove_if_exists(&self.path)? {
            tracing::info!("Removed cache file {:?}", self.path);
        }
        self.memory.remove(&self.name);
        self.items = None;
        Ok(())
    }

    fn load_from_file(&self) -> Result<Option<Vec<S::Item>>> {
        match self.codec.deserialize_from_file(&self.path) {
            Err(e) if e.is_corrupted() && self.ignore_corruption => {
                tracing::warn!("Discarding cache '{}': {}", self.name, e);
                remove_if_exists(&self.path)?;
                Ok(None)
            }
            result => result,
        }
    }

    fn load_from_source(&mut self) -> Result<Vec<S::Item>> {
        tracing::info!("Loading cache '{}' from source", self.name);
        let items = self
            .source
            .load_from_source()
            .map_err(|source| CacheError::Source {
                name: self.name.clone(),
                source,
            })?;
        tracing::info!("Cache '{}' loaded {} items from source", self.name, items.len());
        Ok(items)
    }

    fn save_to_memory(&self) {
        if let Some(items) = &self.items {
            self.memory.put_typed(&self.name, items.clone());
        }
    }
}

impl<S: CacheSource> fmt::Debug for FileBasedCache<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileBasedCache")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("ignore_corruption", &self.ignore_corruption)
            .field("loaded", &self.items.as_ref().map(Vec::len))
            .finish()
    }
}
