//! # Deterministic random stream
//!
//! A block's random stream is seeded once from the block hash and then
//! advanced strictly in phase order. Taking a draw out of order is a
//! consensus bug: two nodes must draw identical values from identical
//! state, so the exact byte sequence below is pinned down rather than
//! left to a language-stdlib RNG.
//!
//! Draw algorithm: keyed-hash counter mode. `state = sha3_256(seed ||
//! counter_le_u64)`; the first 8 bytes of `state`, read little-endian,
//! are the draw's raw `u64`. `counter` starts at 0 and increments by one
//! per draw, never reused.

use sha3::{Digest, Sha3_256};

#[derive(Debug, Clone)]
pub struct DeterministicRng {
    seed: [u8; 32],
    counter: u64,
}

impl DeterministicRng {
    /// Seed from a block hash (or any 32-byte value derived from it).
    pub fn from_seed(seed: [u8; 32]) -> Self {
        DeterministicRng { seed, counter: 0 }
    }

    /// Seed from an arbitrary byte slice, hashed down to 32 bytes first.
    /// Convenient for tests that want a seed derived from a short label.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut hasher = Sha3_256::new();
        hasher.update(bytes);
        let digest = hasher.finalize();
        let mut seed = [0u8; 32];
        seed.copy_from_slice(&digest);
        DeterministicRng::from_seed(seed)
    }

    fn draw_u64(&mut self) -> u64 {
        let mut hasher = Sha3_256::new();
        hasher.update(self.seed);
        hasher.update(self.counter.to_le_bytes());
        let digest = hasher.finalize();
        self.counter += 1;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&digest[0..8]);
        u64::from_le_bytes(raw)
    }

    /// A uniform integer in `[0, n)`. Uses Lemire's multiply-high
    /// reduction rather than `% n` so there is no modulo bias and the
    /// result is independent of how `n` divides 2^64.
    pub fn next_int(&mut self, n: u64) -> u64 {
        assert!(n > 0, "next_int bound must be positive");
        let x = self.draw_u64();
        ((x as u128 * n as u128) >> 64) as u64
    }

    /// `true` with probability `num/den`.
    pub fn probability_roll(&mut self, num: u64, den: u64) -> bool {
        assert!(den > 0, "probability_roll denominator must be positive");
        self.next_int(den) < num
    }

    /// Picks a uniformly random element from a non-empty slice,
    /// returning its index. Used by combat target selection among tied
    /// closest enemies.
    pub fn pick_index(&mut self, len: usize) -> usize {
        assert!(len > 0, "pick_index requires a non-empty collection");
        self.next_int(len as u64) as usize
    }
}
