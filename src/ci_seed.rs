//! Deterministic seed derivation for independent random streams
//!
//! Every topology sample and every trial draws from its own `StdRng`, seeded
//! with Blake3(master seed || indices) under a per-purpose derivation context.
//! Streams never depend on execution order, so a run produces the same results
//! sequentially or on a thread pool.

use crate::ci_error::SimError;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Stream used to generate topology samples
pub const TOPOLOGY_CONTEXT: &str = "cyber-infiltration 2024 topology sample";

/// Stream used for compromise resolutions in one trial
pub const TRIAL_CONTEXT: &str = "cyber-infiltration 2024 trial";

/// Derive a 32-byte seed from the master seed and a list of stream indices
pub fn derive_seed(master: &[u8; 32], context: &str, indices: &[u64]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new_derive_key(context);
    hasher.update(master);
    for index in indices {
        hasher.update(&index.to_le_bytes());
    }
    *hasher.finalize().as_bytes()
}

/// Independent RNG for one stream
pub fn stream_rng(master: &[u8; 32], context: &str, indices: &[u64]) -> StdRng {
    StdRng::from_seed(derive_seed(master, context, indices))
}

/// Fresh master seed from OS entropy
pub fn random_seed() -> [u8; 32] {
    let mut temp_rng = StdRng::from_entropy();
    let mut seed = [0u8; 32];
    temp_rng.fill_bytes(&mut seed);
    seed
}

/// Parse a hex seed (optional `0x` prefix); missing trailing bytes are zero
pub fn parse_seed_hex(hex: &str) -> Result<[u8; 32], SimError> {
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    if hex.len() > 64 || hex.len() % 2 != 0 {
        return Err(SimError::Config(format!(
            "seed must be an even number of hex digits (at most 64), got {}",
            hex.len()
        )));
    }

    let mut seed = [0u8; 32];
    for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
        let byte_str = std::str::from_utf8(chunk)
            .map_err(|e| SimError::Config(format!("invalid hex seed: {}", e)))?;
        seed[i] = u8::from_str_radix(byte_str, 16)
            .map_err(|e| SimError::Config(format!("invalid hex seed: {}", e)))?;
    }

    Ok(seed)
}

pub fn seed_to_hex(seed: &[u8; 32]) -> String {
    seed.iter().map(|b| format!("{:02x}", b)).collect()
}
