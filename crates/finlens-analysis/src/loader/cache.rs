//! Memoized dataset loading using moka.
//!
//! Entries are keyed by an xxh3 hash of the path and the file contents, so
//! an edited file is reloaded while repeated loads of an unchanged file hand
//! out the same immutable snapshot. The cache is owned by the caller; there
//! is no process-wide instance.

use std::path::Path;

use finlens_core::config::LoaderConfig;
use finlens_core::errors::LoadError;
use finlens_core::types::Dataset;
use moka::sync::Cache;
use tracing::debug;
use xxhash_rust::xxh3::{xxh3_64, xxh3_64_with_seed};

use super::csv_loader::CsvLoader;

/// Caller-controlled memoizing wrapper around [`CsvLoader`].
pub struct DatasetCache {
    cache: Cache<u64, Dataset>,
    loader: CsvLoader,
}

impl DatasetCache {
    /// Create a cache holding at most `max_entries` datasets.
    pub fn new(max_entries: u64, loader: CsvLoader) -> Self {
        Self {
            cache: Cache::builder().max_capacity(max_entries).build(),
            loader,
        }
    }

    pub fn from_config(config: &LoaderConfig) -> Self {
        Self::new(config.effective_cache_capacity(), CsvLoader::from_config(config))
    }

    /// Load `path`, reusing the cached snapshot when the contents are unchanged.
    pub fn load(&self, path: &Path) -> Result<Dataset, LoadError> {
        let content = std::fs::read(path).map_err(|e| LoadError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let key = cache_key(path, &content);

        if let Some(dataset) = self.cache.get(&key) {
            debug!(path = %path.display(), "dataset cache hit");
            return Ok(dataset);
        }

        let dataset = self.loader.load_reader(content.as_slice())?;
        debug!(path = %path.display(), record_count = dataset.len(), "dataset cache miss");
        self.cache.insert(key, dataset.clone());
        Ok(dataset)
    }

    /// Number of cached datasets. Eventually consistent with inserts.
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invalidate all entries.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

/// Hash of the path, used as the seed for the hash of the content.
fn cache_key(path: &Path, content: &[u8]) -> u64 {
    let path_hash = xxh3_64(path.to_string_lossy().as_bytes());
    xxh3_64_with_seed(content, path_hash)
}
