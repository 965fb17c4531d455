//! Seeded position hashing for approximate sets
//!
//! One keyed hash family replaces k distinct hash functions: SHA-256 over the
//! item followed by a big-endian seed, truncated to the first 8 bytes and
//! reduced mod m.

use sha2::{Digest, Sha256};

/// Hash an item under a single integer seed.
pub fn seeded_hash(item: &[u8], seed: u32) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(item);
    hasher.update(seed.to_be_bytes());
    let digest = hasher.finalize();

    let mut word = [0u8; 8];
    word.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(word)
}

/// Bit position of `item` for `seed` in an array of `m` bits.
pub fn position(item: &[u8], seed: u32, m: usize) -> usize {
    (seeded_hash(item, seed) % m as u64) as usize
}

/// Compute the `k` bit positions of an item, one per seed in `0..k`.
pub fn compute_positions(item: &[u8], k: usize, m: usize) -> impl Iterator<Item = usize> + '_ {
    (0..k as u32).map(move |seed| position(item, seed, m))
}
