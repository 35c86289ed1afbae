//! MT19937-64 stream with native Gaussian sampling.

use rand_core::{impls, Error, RngCore};
use rand_distr::{Distribution, StandardNormal};

use super::RandomStream;

const NN: usize = 312;
const MM: usize = 156;
const MATRIX_A: u64 = 0xB502_6F5A_A966_19E9;
const UPPER_MASK: u64 = 0xFFFF_FFFF_8000_0000;
const LOWER_MASK: u64 = 0x0000_0000_7FFF_FFFF;
/// 2⁻⁵³
const EPSILON_53: f64 = 1.0 / (1u64 << 53) as f64;

/// 64-bit Mersenne Twister stream.
///
/// Uniforms take the top 53 bits of each output and shift them by half a
/// unit, so every draw lies strictly inside (0, 1). Gaussians are sampled
/// directly with the Ziggurat method (`rand_distr::StandardNormal`) rather
/// than through the inverse cumulative normal.
///
/// `skip(n)` replays `n` paths of Gaussian draws, matching how the path
/// generator consumes the stream.
///
/// # Examples
///
/// ```rust
/// use mc_pricing::rng::{MersenneTwister, RandomStream};
///
/// let mut a = MersenneTwister::new(2, 2024);
/// let mut b = MersenneTwister::new(2, 2024);
/// let (mut x, mut y) = ([0.0; 2], [0.0; 2]);
/// a.gaussians(&mut x);
/// b.gaussians(&mut y);
/// assert_eq!(x, y);
/// ```
#[derive(Debug, Clone)]
pub struct MersenneTwister {
    mt: [u64; NN],
    index: usize,
    seed: u64,
    dimension: usize,
}

impl MersenneTwister {
    /// Creates a stream with the given dimension and seed.
    pub fn new(dimension: usize, seed: u64) -> Self {
        let mut rng = Self {
            mt: [0; NN],
            index: NN,
            seed,
            dimension,
        };
        rng.initialise(seed);
        rng
    }

    /// Returns the seed the stream restarts from on `reset`.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn initialise(&mut self, seed: u64) {
        self.mt[0] = seed;
        for i in 1..NN {
            let previous = self.mt[i - 1];
            self.mt[i] = 6_364_136_223_846_793_005u64
                .wrapping_mul(previous ^ (previous >> 62))
                .wrapping_add(i as u64);
        }
        self.index = NN;
    }

    fn twist(&mut self) {
        let mag01 = |x: u64| if x & 1 == 1 { MATRIX_A } else { 0 };

        for i in 0..NN - MM {
            let x = (self.mt[i] & UPPER_MASK) | (self.mt[i + 1] & LOWER_MASK);
            self.mt[i] = self.mt[i + MM] ^ (x >> 1) ^ mag01(x);
        }
        for i in NN - MM..NN - 1 {
            let x = (self.mt[i] & UPPER_MASK) | (self.mt[i + 1] & LOWER_MASK);
            self.mt[i] = self.mt[i + MM - NN] ^ (x >> 1) ^ mag01(x);
        }
        let x = (self.mt[NN - 1] & UPPER_MASK) | (self.mt[0] & LOWER_MASK);
        self.mt[NN - 1] = self.mt[MM - 1] ^ (x >> 1) ^ mag01(x);

        self.index = 0;
    }
}

impl RngCore for MersenneTwister {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        if self.index >= NN {
            self.twist();
        }

        let mut x = self.mt[self.index];
        self.index += 1;

        // Tempering
        x ^= (x >> 29) & 0x5555_5555_5555_5555;
        x ^= (x << 17) & 0x71D6_7FFF_EDA6_0000;
        x ^= (x << 37) & 0xFFF7_EEE0_0000_0000;
        x ^= x >> 43;

        x
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl RandomStream for MersenneTwister {
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
            *v = ((self.next_u64() >> 11) as f64 + 0.5) * EPSILON_53;
        }
    }

    #[inline]
    fn gaussians(&mut self, variates: &mut [f64]) {
        for v in variates.iter_mut() {
            *v = StandardNormal.sample(self);
        }
    }

    fn skip(&mut self, n_paths: usize) {
        for _ in 0..n_paths * self.dimension {
            let _: f64 = StandardNormal.sample(self);
        }
    }

    fn skip_uniforms(&mut self, n_paths: usize) {
        for _ in 0..n_paths * self.dimension {
            self.next_u64();
        }
    }

    fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.initialise(seed);
    }

    fn reset(&mut self) {
        self.initialise(self.seed);
    }
}
