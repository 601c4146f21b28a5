//! Seedable random source threaded explicitly through every generation stage.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

/// Uniform random draws used by the generator.
///
/// Only [`RandomSource::next_u64`] is required. The provided methods define
/// how that stream is turned into ranges, floats and permutations, so two
/// sources producing the same `u64` sequence yield identical layouts.
pub trait RandomSource {
    fn next_u64(&mut self) -> u64;

    /// Uniform integer in `[0, upper)`. `upper` must be non-zero.
    fn below(&mut self, upper: usize) -> usize {
        debug_assert!(upper > 0, "below() needs a non-empty range");
        let upper = upper as u64;
        let zone = u64::MAX - (u64::MAX % upper);
        loop {
            let value = self.next_u64();
            if value < zone {
                return (value % upper) as usize;
            }
        }
    }

    /// Uniform float in `[0, 1)` built from the top 53 bits of one draw.
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
    }

    /// Fisher-Yates shuffle.
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        for index in (1..items.len()).rev() {
            let swap_with = self.below(index + 1);
            items.swap(index, swap_with);
        }
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            return None;
        }
        items.get(self.below(items.len()))
    }
}

/// ChaCha8-backed source; the same seed yields the same stream everywhere.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl RandomSource for SeededRandom {
    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }
}
