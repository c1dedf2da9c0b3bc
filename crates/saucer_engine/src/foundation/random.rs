//! Seeded randomness shared by every generation pass

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Generator injected into map generation and sampling.
///
/// ChaCha output is stable across platforms and `rand` releases, so a seed
/// reproduces the same world everywhere.
pub type WorldRng = ChaCha8Rng;

/// Create a [`WorldRng`] from a 64-bit seed
pub fn seeded_rng(seed: u64) -> WorldRng {
    WorldRng::seed_from_u64(seed)
}
