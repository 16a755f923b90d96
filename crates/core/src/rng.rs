//! RNG module - seeded piece and relic draws
//!
//! Next pieces are drawn uniformly from the seven kinds (no bag). Relic offers
//! draw distinct entries from the catalog without replacement. A game is fully
//! reproducible from its seed.

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::types::{PieceKind, RelicId, MAX_RELIC_OFFER};

/// Seeded random source owned by one game
#[derive(Debug, Clone)]
pub struct Randomizer {
    rng: StdRng,
    seed: u64,
}

impl Randomizer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this randomizer was created from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform piece kind
    pub fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())]
    }

    /// Draw up to `count` distinct relics from `pool`, uniformly.
    pub fn relic_offer(&mut self, pool: &[RelicId], count: usize) -> ArrayVec<RelicId, MAX_RELIC_OFFER> {
        let amount = count.min(pool.len()).min(MAX_RELIC_OFFER);
        rand::seq::index::sample(&mut self.rng, pool.len(), amount)
            .into_iter()
            .map(|i| pool[i])
            .collect()
    }

    /// Fresh seed for the next game after a restart
    pub fn derive_seed(&mut self) -> u64 {
        self.rng.next_u64()
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::new(1)
    }
}
