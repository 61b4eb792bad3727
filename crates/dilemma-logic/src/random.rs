//! Random sources for probabilistic strategies
//!
//! A strategy never reaches for an ambient generator: it is handed a
//! [`RandomSource`] when it is built. Seeded entropy gives reproducible
//! tournaments, system entropy gives production runs.

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

/// Random source owned by one strategy instance
pub type RandomSource = Box<dyn RngCore>;

/// Where new random sources come from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entropy {
    /// Deterministic: same seed + stream = same sequence
    Seeded(u64),
    /// Seeded from the operating system for every instance
    System,
}

impl Entropy {
    /// Create the source for one numbered stream. The two roles of a
    /// match use different streams, so a strategy playing itself does
    /// not mirror its own draws.
    pub fn source(&self, stream: u64) -> RandomSource {
        match self {
            Entropy::Seeded(seed) => Box::new(SmallRng::seed_from_u64(mix(*seed, stream))),
            Entropy::System => Box::new(SmallRng::from_os_rng()),
        }
    }

    /// Entropy for the `stream`-th descriptor of a tournament, so two
    /// descriptors sharing one seed still draw different sequences
    pub fn derive(&self, stream: u64) -> Entropy {
        match self {
            Entropy::Seeded(seed) => {
                Entropy::Seeded(seed.wrapping_add(stream.wrapping_mul(0x9e3779b97f4a7c15)))
            }
            Entropy::System => Entropy::System,
        }
    }
}

/// Mix a stream index into a seed
fn mix(seed: u64, stream: u64) -> u64 {
    seed ^ stream.wrapping_mul(0x517cc1b727220a95)
}
