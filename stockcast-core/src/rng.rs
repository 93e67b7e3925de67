//! Deterministic RNG hierarchy for forecast uncertainty sampling.
//!
//! A master seed is expanded into a sub-seed per `(ticker, horizon)` via
//! BLAKE3, so the same selection always yields the same interval bounds.

use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone)]
pub struct RngHierarchy {
    master_seed: u64,
}

impl RngHierarchy {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Derive a deterministic sub-seed for a `(ticker, horizon_days)` pair.
    pub fn sub_seed(&self, ticker: &str, horizon_days: u32) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(ticker.as_bytes());
        hasher.update(&horizon_days.to_le_bytes());
        let hash = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(bytes)
    }

    pub fn rng_for(&self, ticker: &str, horizon_days: u32) -> StdRng {
        StdRng::seed_from_u64(self.sub_seed(ticker, horizon_days))
    }
}
