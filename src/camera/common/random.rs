//! Uniform random sources.
//!
//! The sensor draws from two kinds of randomness: a seeded generator that
//! lays out defects identically on every run, and an entropy-backed generator
//! that makes per-shot noise differ between captures.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniformly distributed samples.
pub trait RandomSource {
    /// Restarts the sequence. Seeded sources replay from their seed, entropy
    /// sources pull a fresh seed from the operating system.
    fn reseed(&mut self);

    /// Uniform integer in the inclusive range `[low, high]`.
    fn uniform_usize(&mut self, low: usize, high: usize) -> usize;

    /// Uniform float in `[low, high)`. Returns `low` when the range is empty.
    fn uniform_f32(&mut self, low: f32, high: f32) -> f32;
}

/// Deterministic generator; the same seed always yields the same sequence.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn reseed(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
    }

    fn uniform_usize(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            return low;
        }
        self.rng.random_range(low..=high)
    }

    fn uniform_f32(&mut self, low: f32, high: f32) -> f32 {
        sample_f32(&mut self.rng, low, high)
    }
}

/// Non-deterministic generator seeded from the OS entropy pool.
#[derive(Debug, Clone)]
pub struct EntropyRandom {
    rng: StdRng,
}

impl EntropyRandom {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for EntropyRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropyRandom {
    fn reseed(&mut self) {
        self.rng = StdRng::from_os_rng();
    }

    fn uniform_usize(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            return low;
        }
        self.rng.random_range(low..=high)
    }

    fn uniform_f32(&mut self, low: f32, high: f32) -> f32 {
        sample_f32(&mut self.rng, low, high)
    }
}

fn sample_f32(rng: &mut StdRng, low: f32, high: f32) -> f32 {
    // random_range panics on empty or non-finite ranges, e.g. a [0, 0] gain range
    if high <= low || !(high - low).is_finite() {
        return low;
    }
    rng.random_range(low..high)
}
