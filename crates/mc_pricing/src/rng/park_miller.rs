//! Park-Miller minimal standard generator.
//!
//! A 31-bit multiplicative linear congruential generator,
//! `seed' = 16807 · seed mod (2³¹ - 1)`, evaluated with Schrage's
//! factorisation so that no intermediate overflows.

use super::RandomStream;

/// Multiplier.
const A: i64 = 16_807;
/// Modulus, 2³¹ - 1.
const M: i64 = 2_147_483_647;
/// M / A.
const Q: i64 = 127_773;
/// M mod A.
const R: i64 = 2_836;
/// Scales a raw draw into (0, 1); uses `M` rather than `M - 1`.
const RECIPROCAL: f64 = 1.0 / M as f64;

/// Park-Miller linear congruential stream.
///
/// Draws are integers in `[1, M - 1]`, scaled by `1 / M` into the open
/// interval (0, 1).
///
/// # Examples
///
/// ```rust
/// use mc_pricing::rng::{ParkMiller, RandomStream};
///
/// let mut rng = ParkMiller::new(1, 1);
/// assert_eq!(rng.raw_int(), 16_807);
///
/// rng.reset();
/// let mut u = [0.0];
/// rng.uniforms(&mut u);
/// assert!(u[0] > 0.0 && u[0] < 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkMiller {
    /// Current state.
    seed: i64,
    /// State restored by `reset`.
    initial_seed: i64,
    /// Variates per path.
    dimension: usize,
}

impl ParkMiller {
    /// Creates a stream with the given dimension and seed.
    ///
    /// The seed is reduced modulo `2³¹ - 1`; a reduced seed of 0 becomes 1.
    pub fn new(dimension: usize, seed: u64) -> Self {
        let seed = normalise_seed(seed);
        Self {
            seed,
            initial_seed: seed,
            dimension,
        }
    }

    /// Largest raw draw, `2³¹ - 2`.
    #[inline]
    pub const fn max() -> u32 {
        (M - 1) as u32
    }

    /// Smallest raw draw.
    #[inline]
    pub const fn min() -> u32 {
        1
    }

    /// Advances the generator and returns the raw integer draw.
    ///
    /// # Panics
    ///
    /// Panics if the state leaves `[1, M - 1]`. This cannot happen for a
    /// correctly seeded generator and indicates corrupted state.
    #[inline]
    pub fn raw_int(&mut self) -> u32 {
        let k = self.seed / Q;
        self.seed = A * (self.seed - k * Q) - k * R;
        if self.seed < 0 {
            self.seed += M;
        }
        assert!(
            self.seed >= 1 && self.seed < M,
            "Park-Miller state {} escaped [1, {}]",
            self.seed,
            M - 1
        );
        self.seed as u32
    }
}

impl RandomStream for ParkMiller {
    #[inline]
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn reset_dimension(&mut self, dimension: usize) {
        self.dimension = dimension;
    }

    #[inline]
    fn uniforms(&mut self, variates: &mut [f64]) {
        for v in variates.iter_mut() {
            *v = f64::from(self.raw_int()) * RECIPROCAL;
        }
    }

    fn skip(&mut self, n_paths: usize) {
        for _ in 0..n_paths * self.dimension {
            self.raw_int();
        }
    }

    fn set_seed(&mut self, seed: u64) {
        self.seed = normalise_seed(seed);
        self.initial_seed = self.seed;
    }

    fn reset(&mut self) {
        self.seed = self.initial_seed;
    }
}

fn normalise_seed(seed: u64) -> i64 {
    match (seed % M as u64) as i64 {
        0 => 1,
        s => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_golden_values_seed_one() {
        let mut rng = ParkMiller::new(1, 1);
        assert_eq!(rng.raw_int(), 16_807);
        assert_eq!(rng.raw_int(), 282_475_249);
        assert_eq!(rng.raw_int(), 1_622_650_073);
    }

    #[test]
    fn test_zero_seed_maps_to_one() {
        let mut zero = ParkMiller::new(1, 0);
        let mut one = ParkMiller::new(1, 1);
        assert_eq!(zero.raw_int(), one.raw_int());

        let mut rng = ParkMiller::new(1, 42);
        rng.set_seed(0);
        assert_eq!(rng.raw_int(), 16_807);
    }

    #[test]
    fn test_seed_equal_to_modulus_is_valid() {
        let mut rng = ParkMiller::new(1, M as u64);
        assert_eq!(rng.raw_int(), 16_807);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(ParkMiller::min(), 1);
        assert_eq!(ParkMiller::max(), 2_147_483_646);
    }

    #[test]
    fn test_skip_matches_discarded_draws() {
        let mut skipped = ParkMiller::new(3, 7);
        let mut drawn = ParkMiller::new(3, 7);

        skipped.skip(5);
        let mut scratch = [0.0; 3];
        for _ in 0..5 {
            drawn.uniforms(&mut scratch);
        }

        assert_eq!(skipped, drawn);
    }

    #[test]
    fn test_set_seed_becomes_reset_point() {
        let mut rng = ParkMiller::new(2, 1);
        rng.set_seed(99);
        let first = rng.raw_int();
        rng.raw_int();
        rng.reset();
        assert_eq!(rng.raw_int(), first);
    }
}
