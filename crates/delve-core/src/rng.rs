//! Random number generation for dungeon building
//!
//! Uses a seeded ChaCha RNG so that a seed string always reproduces the
//! same dungeon.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of uniform randoms consumed by the generator.
///
/// Every randomized decision goes through `next_f64`, so any stream that is
/// reproducible for a given seed gives reproducible dungeons.
pub trait RandomSource {
    /// Uniform value in `[0, 1)`
    fn next_f64(&mut self) -> f64;

    /// Returns `floor(r * n)`, i.e. `0..n`
    ///
    /// Returns 0 if n is 0.
    fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        ((self.next_f64() * n as f64) as usize).min(n - 1)
    }

    /// Returns true with probability `p`
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Returns true with probability 1/n
    fn one_in(&mut self, n: u32) -> bool {
        self.below(n as usize) == 0
    }
}

/// Seeded dungeon RNG
///
/// Wraps ChaCha8Rng. The string seed is folded to a `u64` with a fixed hash
/// so streams match across platforms and toolchains.
/// Note: only the seed is serialized; deserializing restarts the stream.
#[derive(Debug, Clone)]
pub struct DungeonRng {
    rng: ChaCha8Rng,
    seed: String,
}

impl Serialize for DungeonRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DungeonRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = String::deserialize(deserializer)?;
        Ok(DungeonRng::new(&seed))
    }
}

impl DungeonRng {
    /// Create a new RNG from a seed string
    pub fn new(seed: &str) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(fold_seed(seed)),
            seed: seed.to_owned(),
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::random();
        Self::new(&format!("{seed:016x}"))
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl RandomSource for DungeonRng {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}

impl Default for DungeonRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// FNV-1a over the UTF-8 bytes of the seed.
fn fold_seed(seed: &str) -> u64 {
    const OFFSET: u64 = 0xCBF2_9CE4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;
    seed.bytes()
        .fold(OFFSET, |hash, byte| (hash ^ byte as u64).wrapping_mul(PRIME))
}
