//! Deterministic RNG with per-asset seed derivation.
//!
//! All noise in the synthesis core flows through PCG32 so that rendering
//! the same asset twice produces byte-identical output. Seeds for distinct
//! assets are derived by BLAKE3-hashing the asset name against a base seed,
//! giving each asset an independent random stream.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Creates a PCG32 RNG from a 32-bit seed.
pub fn create_rng(seed: u32) -> Pcg32 {
    // Expand 32-bit seed to 64-bit for PCG32 state
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// Derives an independent seed for a named asset from the base seed.
pub fn derive_seed(base_seed: u32, key: &str) -> u32 {
    let mut input = Vec::with_capacity(4 + key.len());
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(key.as_bytes());

    let hash = blake3::hash(&input);
    let bytes: [u8; 4] = hash.as_bytes()[0..4].try_into().expect("hash is 32 bytes");
    u32::from_le_bytes(bytes)
}

/// Creates an RNG for a named asset.
pub fn create_keyed_rng(base_seed: u32, key: &str) -> Pcg32 {
    create_rng(derive_seed(base_seed, key))
}
