//! Deterministic seeded randomness source threaded through all generators.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// A seeded 64-bit pseudo-random source.
///
/// All sampling in this crate draws from an explicit `RandomSource`; there is
/// no global RNG state. Two sources built from the same seed produce the same
/// sequence of outputs for the same sequence of calls.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
    seed: u64,
}

impl RandomSource {
    /// Create a source from an explicit seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a source from entropy, keeping the chosen seed for reporting
    pub fn from_entropy() -> Self {
        let seed = rand::rngs::OsRng.next_u64();
        Self::new(seed)
    }

    /// The seed this source was built from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Next raw 64-bit value
    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// Uniform value in `[0, bound)`; `bound` must be positive
    pub fn next_usize_below(&mut self, bound: usize) -> usize {
        assert!(bound > 0, "bound must be positive");
        self.rng.gen_range(0..bound)
    }

    /// Uniform value in `[lo, hi]`
    pub fn next_usize_between(&mut self, lo: usize, hi: usize) -> usize {
        assert!(lo <= hi, "inverted bounds");
        self.rng.gen_range(lo..=hi)
    }

    /// Uniform value in `[lo, hi]`
    pub fn next_i64_between(&mut self, lo: i64, hi: i64) -> i64 {
        assert!(lo <= hi, "inverted bounds");
        self.rng.gen_range(lo..=hi)
    }

    /// Uniform double in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    /// Uniform double in `[lo, hi]`.
    ///
    /// Spans wider than `f64::MAX` are sampled by picking one half of the
    /// interval first, so the full `[-MAX, MAX]` range stays drawable.
    pub fn next_f64_between(&mut self, lo: f64, hi: f64) -> f64 {
        assert!(lo <= hi, "inverted bounds");
        if lo == hi {
            return lo;
        }
        if (hi - lo).is_finite() {
            return self.rng.gen_range(lo..=hi);
        }
        let mid = lo / 2.0 + hi / 2.0;
        if self.next_bool(0.5) {
            self.rng.gen_range(lo..=mid)
        } else {
            self.rng.gen_range(mid..=hi)
        }
    }

    /// Uniform float in `[lo, hi]`, with the same wide-span splitting
    pub fn next_f32_between(&mut self, lo: f32, hi: f32) -> f32 {
        assert!(lo <= hi, "inverted bounds");
        if lo == hi {
            return lo;
        }
        if (hi - lo).is_finite() {
            return self.rng.gen_range(lo..=hi);
        }
        let mid = lo / 2.0 + hi / 2.0;
        if self.next_bool(0.5) {
            self.rng.gen_range(lo..=mid)
        } else {
            self.rng.gen_range(mid..=hi)
        }
    }

    /// Weighted coin flip; probabilities outside `[0, 1]` saturate
    pub fn next_bool(&mut self, probability: f64) -> bool {
        if probability <= 0.0 {
            false
        } else if probability >= 1.0 {
            true
        } else {
            self.rng.gen_bool(probability)
        }
    }

    /// Split off an independent child source seeded from this stream
    pub fn split(&mut self) -> RandomSource {
        RandomSource::new(self.next_u64())
    }

    /// Access the backing RNG for extension draws (e.g. big integers)
    pub fn inner_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}
