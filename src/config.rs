//! Construction parameters for [`HashTable`](crate::HashTable).

use crate::error::ConfigError;

pub const DEFAULT_BUCKET_COUNT: usize = 16;
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;
/// Smallest accepted load factor. Starting from a single bucket, the first
/// insert grows the table to at most 1024 buckets.
pub const MIN_LOAD_FACTOR: f64 = 1.0 / 1024.0;

/// Initial bucket count and growth threshold. Both are fixed once a table is
/// built; only the bucket count changes afterwards, by doubling on rehash.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    pub initial_bucket_count: usize,
    pub load_factor: f64,
}

impl TableConfig {
    pub fn new(initial_bucket_count: usize, load_factor: f64) -> Self {
        Self {
            initial_bucket_count,
            load_factor,
        }
    }

    pub fn with_initial_bucket_count(mut self, n: usize) -> Self {
        self.initial_bucket_count = n;
        self
    }

    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// A table needs at least one bucket and a finite threshold of at least
    /// [`MIN_LOAD_FACTOR`] to be able to grow.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_bucket_count == 0 {
            return Err(ConfigError::ZeroBucketCount);
        }
        if !(self.load_factor.is_finite() && self.load_factor > 0.0) {
            return Err(ConfigError::InvalidLoadFactor(self.load_factor));
        }
        if self.load_factor < MIN_LOAD_FACTOR {
            return Err(ConfigError::LoadFactorTooSmall(self.load_factor));
        }
        Ok(())
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKET_COUNT, DEFAULT_LOAD_FACTOR)
    }
}
