use thiserror::Error;

/// Rejected construction parameters for a [`HashTable`](crate::HashTable).
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("initial bucket count must be at least 1")]
    ZeroBucketCount,
    #[error("load factor must be a finite positive number, got {0}")]
    InvalidLoadFactor(f64),
    #[error("load factor {0} is below the minimum of 1/1024")]
    LoadFactorTooSmall(f64),
}
