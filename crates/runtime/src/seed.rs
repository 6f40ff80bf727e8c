//! Match seeding.
//!
//! A match is reproducible from a single seed string: the string is hashed to
//! a 32-bit seed that initializes the match's only random generator.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

/// First four bytes of SHA-256(`seed`) as a big-endian integer.
pub fn seed_from_str(seed: &str) -> u32 {
    let digest = Sha256::digest(seed.as_bytes());
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Generator for a match seeded by `seed`.
pub fn rng_from_str(seed: &str) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(u64::from(seed_from_str(seed)))
}
