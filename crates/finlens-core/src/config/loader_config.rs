//! Dataset loader configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoaderConfig {
    /// Maximum number of memoized datasets. Default: 8.
    pub cache_capacity: Option<u64>,
    /// Skip unrecognised CSV columns instead of failing. Default: false.
    pub allow_unknown_columns: Option<bool>,
}

impl LoaderConfig {
    pub fn effective_cache_capacity(&self) -> u64 {
        self.cache_capacity.unwrap_or(8)
    }

    pub fn effective_allow_unknown_columns(&self) -> bool {
        self.allow_unknown_columns.unwrap_or(false)
    }
}
