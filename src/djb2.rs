//! djb2 string hashing and power-of-two slot indexing.

/// Seed of the djb2 accumulator.
pub(crate) const DJB2_SEED: u64 = 5381;

/// Hashes every byte of `key` with djb2 (`hash * 33 + byte`).
///
/// Deterministic and unsalted; collisions are resolved by probing.
#[inline]
pub fn djb2(key: &str) -> u64 {
    key.bytes().fold(DJB2_SEED, |hash, b| {
        (hash << 5).wrapping_add(hash).wrapping_add(u64::from(b))
    })
}

/// Maps a digest onto `0..capacity`.
///
/// `capacity` must be a power of two, which makes the mask equal to
/// `digest % capacity`.
#[inline]
pub fn slot_index(digest: u64, capacity: usize) -> usize {
    debug_assert!(capacity.is_power_of_two());
    (digest & (capacity as u64 - 1)) as usize
}
