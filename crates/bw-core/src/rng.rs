//! Deterministic per-agent RNG.
//!
//! # Determinism strategy
//!
//! Each agent owns an independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (stream * MIXING_CONSTANT)
//!
//! where `stream` is either an explicit index or a stable hash of the agent's
//! name.  The mixing constant is the 64-bit fractional part of the golden
//! ratio.  Agents never share RNG state, so a team run is reproducible from
//! its seed no matter in which order (or on which thread) members step.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentName;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Per-agent deterministic RNG.
///
/// Consumed by the probabilistic archetype policies (lazy abandonment,
/// message falsification).
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed from the run's global seed and a stream index.
    pub fn new(global_seed: u64, stream: u64) -> Self {
        let seed = global_seed ^ stream.wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from the run's global seed and an agent name (FNV-1a).
    pub fn for_name(global_seed: u64, name: &AgentName) -> Self {
        let stream = name
            .as_str()
            .bytes()
            .fold(FNV_OFFSET, |h, b| (h ^ u64::from(b)).wrapping_mul(FNV_PRIME));
        AgentRng::new(global_seed, stream)
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Shuffle a mutable slice in-place.
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }

    /// Choose a random element, `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
