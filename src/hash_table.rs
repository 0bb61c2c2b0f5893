//! HashTable: string-keyed map on separate chaining with doubling rehash.

use crate::chain::{self, Chain};
use crate::config::TableConfig;
use crate::error::ConfigError;
use crate::hash::bucket_index;
use log::{debug, trace, warn};

struct Entry<V> {
    key: String,
    value: V,
}

type Bucket<V> = Option<Chain<Entry<V>>>;

/// A map from `String` keys to values of type `V`.
///
/// Each bucket is either empty or owns a non-empty [`Chain`] of entries whose
/// keys hash to that bucket under the current bucket count. After every
/// [`set`](Self::set) returns, `len() / bucket_count() <= load_factor()`.
///
/// Only string keys are accepted; there is no coercion from other key types,
/// so the "unsupported key type" case is rejected at compile time.
pub struct HashTable<V> {
    buckets: Vec<Bucket<V>>,
    size: usize,
    load_factor: f64,
}

fn empty_buckets<V>(n: usize) -> Vec<Bucket<V>> {
    std::iter::repeat_with(|| None).take(n).collect()
}

/// Like `empty_buckets`, but `None` when the array cannot be allocated.
fn try_empty_buckets<V>(n: usize) -> Option<Vec<Bucket<V>>> {
    let mut buckets = Vec::new();
    buckets.try_reserve_exact(n).ok()?;
    buckets.resize_with(n, || None);
    Some(buckets)
}

impl<V> HashTable<V> {
    /// Empty table with 16 buckets and a 0.75 load factor.
    pub fn new() -> Self {
        Self::from_valid(TableConfig::default())
    }

    /// Empty table with the given initial bucket count and load factor.
    pub fn with_buckets(
        initial_bucket_count: usize,
        load_factor: f64,
    ) -> Result<Self, ConfigError> {
        Self::with_config(TableConfig::new(initial_bucket_count, load_factor))
    }

    pub fn with_config(config: TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: TableConfig) -> Self {
        trace!(
            "new hash table: {} buckets, load factor {}",
            config.initial_bucket_count,
            config.load_factor
        );
        Self {
            buckets: empty_buckets(config.initial_bucket_count),
            size: 0,
            load_factor: config.load_factor,
        }
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Tracked number of entries.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    fn bucket_of(&self, key: &str) -> usize {
        bucket_index(key, self.bucket_count())
    }

    fn chain(&self, key: &str) -> Option<&Chain<Entry<V>>> {
        self.buckets[self.bucket_of(key)].as_ref()
    }

    /// Inserts `key`, or overwrites its value in place if already present.
    /// Only an insert can trigger growth.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        let index = self.bucket_of(&key);
        let chain = self.buckets[index].get_or_insert_with(Chain::new);
        if let Some(entry) = chain.find_mut(|e| e.key == key) {
            entry.value = value;
            return;
        }
        chain.append(Entry { key, value });
        self.size += 1;
        self.grow_if_needed();
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.chain(key)?
            .iter()
            .find(|e| e.key == key)
            .map(|e| &e.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.bucket_of(key);
        self.buckets[index]
            .as_mut()?
            .find_mut(|e| e.key == key)
            .map(|e| &mut e.value)
    }

    pub fn has(&self, key: &str) -> bool {
        self.chain(key)
            .map(|c| c.iter().any(|e| e.key == key))
            .unwrap_or(false)
    }

    /// Removes `key`, returning whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.take(key).is_some()
    }

    /// Removes `key` and hands back the owned entry. A chain left empty is
    /// dropped and its bucket reset to empty. Never shrinks the table.
    pub fn take(&mut self, key: &str) -> Option<(String, V)> {
        let index = self.bucket_of(key);
        let slot = &mut self.buckets[index];
        let chain = slot.as_mut()?;
        let pos = chain.iter().position(|e| e.key == key)?;
        let entry = chain.remove_at(pos)?;
        if chain.is_empty() {
            *slot = None;
        }
        self.size -= 1;
        Some((entry.key, entry.value))
    }

    /// Recounts entries by walking every chain. Always equals [`len`](Self::len).
    pub fn length(&self) -> usize {
        self.buckets
            .iter()
            .flatten()
            .map(|c| c.iter().count())
            .sum()
    }

    /// Drops every entry. Bucket count and load factor are kept.
    pub fn clear(&mut self) {
        for slot in self.buckets.iter_mut() {
            *slot = None;
        }
        self.size = 0;
        trace!("cleared hash table, {} buckets kept", self.bucket_count());
    }

    pub fn keys(&self) -> Vec<&str> {
        self.iter().map(|(k, _)| k).collect()
    }

    pub fn values(&self) -> Vec<&V> {
        self.iter().map(|(_, v)| v).collect()
    }

    pub fn entries(&self) -> Vec<(&str, &V)> {
        self.iter().collect()
    }

    /// Iterates bucket by bucket, each chain in insertion order. The order
    /// depends on the bucket count and is not stable across growth.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: None,
            remaining: self.size,
        }
    }

    fn exceeds_load_factor(&self) -> bool {
        self.size as f64 / self.bucket_count() as f64 > self.load_factor
    }

    // A single doubling suffices unless `bucket_count * load_factor < 1`;
    // `MIN_LOAD_FACTOR` bounds how many that can take.
    fn grow_if_needed(&mut self) {
        while self.exceeds_load_factor() {
            let grown = match self.bucket_count().checked_mul(2) {
                Some(new_count) => self.rehash(new_count),
                None => false,
            };
            if !grown {
                warn!(
                    "cannot grow past {} buckets; load factor exceeded",
                    self.bucket_count()
                );
                return;
            }
        }
    }

    /// Moves every entry into a fresh array of `new_count` buckets, walking
    /// old buckets in order and each chain head to tail, then installs it.
    /// Returns `false`, leaving the table untouched, if the new array cannot
    /// be allocated.
    fn rehash(&mut self, new_count: usize) -> bool {
        let old_count = self.bucket_count();
        let Some(mut buckets) = try_empty_buckets(new_count) else {
            return false;
        };
        for chain in std::mem::take(&mut self.buckets).into_iter().flatten() {
            for entry in chain {
                let i = bucket_index(&entry.key, new_count);
                buckets[i].get_or_insert_with(Chain::new).append(entry);
            }
        }
        self.buckets = buckets;
        debug!(
            "rehashed {} entries: {} -> {} buckets",
            self.size, old_count, new_count
        );
        true
    }

    /// Panics if any structural invariant is broken.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        assert_eq!(self.length(), self.size, "recount diverged from size");
        assert!(
            self.size as f64 / self.bucket_count() as f64 <= self.load_factor,
            "load factor exceeded: {} entries in {} buckets",
            self.size,
            self.bucket_count()
        );
        let mut seen = std::collections::HashSet::new();
        for (i, slot) in self.buckets.iter().enumerate() {
            if let Some(chain) = slot {
                assert!(!chain.is_empty(), "empty chain left in bucket {i}");
                for e in chain {
                    assert_eq!(bucket_index(&e.key, self.bucket_count()), i);
                    assert!(seen.insert(e.key.as_str()), "duplicate key {:?}", e.key);
                }
            }
        }
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: core::fmt::Debug> core::fmt::Debug for HashTable<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<String>, V> Extend<(K, V)> for HashTable<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for HashTable<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut t = Self::new();
        t.extend(iter);
        t
    }
}

/// Iterator over `(key, value)` pairs of a `HashTable`.
pub struct Iter<'a, V> {
    buckets: core::slice::Iter<'a, Bucket<V>>,
    chain: Option<chain::Iter<'a, Entry<V>>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(e) = self.chain.as_mut().and_then(Iterator::next) {
                self.remaining = self.remaining.saturating_sub(1);
                return Some((e.key.as_str(), &e.value));
            }
            self.chain = self.buckets.next()?.as_ref().map(Chain::iter);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
