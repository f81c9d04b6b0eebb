//! Locally synthesized stand-ins for provider output. Same shapes as the
//! normalized data, always marked `Origin::Fallback`, no network access.

pub mod analysis;
pub mod chart;
pub mod guidance;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

pub use analysis::{synthesize_analysis, synthesize_kalsarpa, synthesize_manglik, synthesize_sade_sati};
pub use chart::{synthesize_chart, synthesize_positions};
pub use guidance::{synthesize_reply, CAREER_REPLY, GENERIC_REPLIES, RELATIONSHIP_REPLY};

/// Where fallback randomness comes from. Each operation builds its own
/// generator, so concurrent operations never share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RandomSource {
    #[default]
    Entropy,
    Seeded(u64),
}

impl RandomSource {
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or(RandomSource::Entropy, RandomSource::Seeded)
    }

    pub fn rng(&self) -> ChaCha20Rng {
        match self {
            RandomSource::Entropy => ChaCha20Rng::from_entropy(),
            RandomSource::Seeded(seed) => ChaCha20Rng::seed_from_u64(*seed),
        }
    }
}
