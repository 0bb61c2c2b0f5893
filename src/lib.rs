//! chain-hashmap: a string-keyed map built from first principles on
//! separate chaining with load-factor driven doubling.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: show the mechanics of hashing, collision resolution and amortized
//!   growth in safe, small layers that can each be checked on their own.
//! - Layers:
//!   - `hash::bucket_index`: pure polynomial rolling hash of a key against an
//!     explicit bucket count.
//!   - `Chain<T>`: singly-linked list used as the per-bucket sequence. Nodes
//!     live in a `SlotMap` arena owned by the chain and link by key.
//!   - `HashTable<V>`: bucket array of optional chains, the tracked size and
//!     the growth threshold; public API.
//!
//! Constraints
//! - Single-threaded, single owner. Every operation runs to completion; a
//!   rehash finishes inside the `set` that triggered it.
//! - Keys are `String`; lookups take `&str`.
//! - A bucket is `None` exactly when it holds no entries. Removing the last
//!   entry of a chain drops the chain.
//! - After every `set`, `len() / bucket_count() <= load_factor()`. Growth
//!   doubles the bucket count, repeating if one doubling is not enough, and
//!   never shrinks.
//!
//! Hashing and rehash
//! - `bucket_index(key, n)` folds the key's UTF-16 code units as
//!   `h = (31 * h + code) % n` starting at 0. It takes the bucket count as a
//!   parameter instead of reading table state, so rehash places entries
//!   against the new count before the new array is installed.
//! - Rehash walks old buckets in index order and each chain head to tail,
//!   appending into the new array; only then is the array swapped in.
//!
//! Lookup results
//! - `get` returns `Option<&V>`, so a stored value that is itself "empty"
//!   (e.g. `None` in a `HashTable<Option<T>>`) is never mistaken for a
//!   missing key.
//!
//! Observability
//! - Diagnostics go through the `log` facade: rehash at `debug`, construction
//!   and `clear` at `trace`. Queries (`get`, `has`, `keys`, `values`,
//!   `entries`, `length`, iteration) never log.
//!
//! Notes and non-goals
//! - No thread safety, persistence, pluggable hashers or generic keys.
//! - Iteration order is bucket order then chain order; it changes when the
//!   table grows and callers should not depend on it.

pub mod chain;
pub mod config;
pub mod error;
pub mod hash;
pub mod hash_table;
mod hash_table_proptest;

// Public surface
pub use config::TableConfig;
pub use error::ConfigError;
pub use hash::bucket_index;
pub use hash_table::{HashTable, Iter};
