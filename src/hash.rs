//! Polynomial rolling hash used to place keys into buckets.

const PRIME: u128 = 31;

/// Maps `key` to a bucket in `[0, bucket_count)`.
///
/// Walks the key's UTF-16 code units left to right, folding each one in as
/// `hash = (31 * hash + code) % bucket_count`. The function is pure in both
/// arguments so rehash can place entries against a bucket count that is not
/// installed yet. The empty key always lands in bucket 0.
///
/// `bucket_count` must be non-zero.
#[inline]
pub fn bucket_index(key: &str, bucket_count: usize) -> usize {
    debug_assert!(bucket_count > 0, "bucket_count must be non-zero");
    // Widened so `31 * hash + code` cannot overflow for any bucket count.
    let n = bucket_count as u128;
    let mut hash = 0u128;
    for code in key.encode_utf16() {
        hash = (PRIME * hash + u128::from(code)) % n;
    }
    hash as usize
}
