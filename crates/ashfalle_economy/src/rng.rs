//! # Random Sources
//!
//! Every draw the economy makes goes through [`RandomSource`], so callers
//! decide between a seeded generator, an entropy-seeded one, or a scripted
//! sequence in tests.
//!
//! All derived draws (index picks, inclusive integers) are computed from a
//! single uniform in `[0, 1)` so a scripted source controls them exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Largest value a uniform draw may take (just below 1).
const MAX_UNIFORM: f64 = 1.0 - f64::EPSILON;

/// The default generator for loot rolls.
pub type LootRng = ChaCha8Rng;

/// Creates a reproducible loot generator.
#[must_use]
pub fn seeded_rng(seed: u64) -> LootRng {
    LootRng::seed_from_u64(seed)
}

/// Creates a loot generator seeded from the operating system.
#[must_use]
pub fn entropy_rng() -> LootRng {
    LootRng::from_entropy()
}

/// A source of uniform random numbers.
pub trait RandomSource {
    /// Returns a uniform draw in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;

    /// Returns a uniform index in `0..len`, or `None` when `len == 0`.
    fn random_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = (self.next_uniform() * len as f64).floor() as usize;
        Some(index.min(len - 1))
    }

    /// Returns a uniform integer in `min..=max`.
    ///
    /// When `max < min` the result is `min`. One uniform is drawn either way.
    fn random_int_inclusive(&mut self, min: i64, max: i64) -> i64 {
        let u = self.next_uniform();
        if max <= min {
            return min;
        }
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
        let offset = (u * (max - min + 1) as f64).floor() as i64;
        (min + offset).min(max)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}

impl RandomSource for ChaCha8Rng {
    fn next_uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

impl RandomSource for StdRng {
    fn next_uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Picks a uniformly random element, or `None` for an empty slice.
pub fn choose<'a, T, R: RandomSource + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    rng.random_index(items.len()).map(|index| &items[index])
}

/// Replays a fixed list of uniforms, cycling when it runs out.
///
/// Values are clamped into `[0, 1)`. An empty script always yields `0.0`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    /// Creates a source that replays `values` in order.
    #[must_use]
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of uniforms drawn so far.
    #[must_use]
    pub const fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn next_uniform(&mut self) -> f64 {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, MAX_UNIFORM)
        }
    }
}
