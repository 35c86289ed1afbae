//! Antithetic sampling decorator.

use super::RandomStream;

/// Wraps a stream so that every fresh draw is followed by its mirror.
///
/// A fresh draw of `x` from the inner stream is returned as-is and `1 - x` is
/// cached; the next call of equal or smaller size is served from the cache
/// instead of the inner stream. Paths therefore come in antithetic pairs and
/// the inner stream is consumed at half rate.
///
/// Gaussians use the default inverse-cumulative transform, so the pair of
/// Gaussian draws is exactly `(z, -z)` up to rounding.
#[derive(Debug, Clone)]
pub struct AntiThetic<G> {
    inner: G,
    /// Mirrored values of the last fresh draw.
    cache: Vec<f64>,
    /// Next call should be served from `cache`.
    mirror_pending: bool,
}

impl<G: RandomStream> AntiThetic<G> {
    /// Wraps `inner`.
    pub fn new(inner: G) -> Self {
        let dimension = inner.dimension();
        Self {
            inner,
            cache: Vec::with_capacity(dimension),
            mirror_pending: false,
        }
    }

    /// Returns the wrapped stream.
    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// Whether the next draw will be served from the mirror cache.
    pub fn mirror_pending(&self) -> bool {
        self.mirror_pending
    }
}

impl<G: RandomStream> RandomStream for AntiThetic<G> {
    #[inline]
    fn dimension(&self) -> usize {
        self.inner.dimension()
    }

    fn reset_dimension(&mut self, dimension: usize) {
        self.inner.reset_dimension(dimension);
        self.cache.clear();
        self.mirror_pending = false;
    }

    fn uniforms(&mut self, variates: &mut [f64]) {
        let n = variates.len();

        if self.mirror_pending && self.cache.len() >= n {
            variates.copy_from_slice(&self.cache[..n]);
            self.mirror_pending = false;
            return;
        }

        self.inner.uniforms(variates);
        self.cache.clear();
        self.cache.extend(variates.iter().map(|x| 1.0 - x));
        self.mirror_pending = true;
    }

    fn skip(&mut self, n_paths: usize) {
        if n_paths == 0 {
            return;
        }

        let mut remaining = n_paths;
        if self.mirror_pending {
            self.mirror_pending = false;
            remaining -= 1;
        }

        self.inner.skip_uniforms(remaining / 2);

        if remaining % 2 == 1 {
            let mut scratch = vec![0.0; self.dimension()];
            self.uniforms(&mut scratch);
        }
    }

    fn set_seed(&mut self, seed: u64) {
        self.inner.set_seed(seed);
        self.cache.clear();
        self.mirror_pending = false;
    }

    fn reset(&mut self) {
        self.inner.reset();
        self.cache.clear();
        self.mirror_pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{MersenneTwister, ParkMiller};

    #[test]
    fn test_fresh_then_mirror() {
        let mut stream = AntiThetic::new(ParkMiller::new(3, 5));
        let mut reference = ParkMiller::new(3, 5);

        let mut fresh = [0.0; 3];
        let mut mirror = [0.0; 3];
        let mut expected = [0.0; 3];
        stream.uniforms(&mut fresh);
        assert!(stream.mirror_pending());
        stream.uniforms(&mut mirror);
        assert!(!stream.mirror_pending());
        reference.uniforms(&mut expected);

        assert_eq!(fresh, expected);
        for i in 0..3 {
            assert_eq!(mirror[i], 1.0 - fresh[i]);
        }
    }

    #[test]
    fn test_smaller_request_served_from_cache() {
        let mut stream = AntiThetic::new(ParkMiller::new(4, 9));
        let mut fresh = [0.0; 4];
        let mut partial = [0.0; 2];
        stream.uniforms(&mut fresh);
        stream.uniforms(&mut partial);
        assert_eq!(partial[0], 1.0 - fresh[0]);
        assert_eq!(partial[1], 1.0 - fresh[1]);
    }

    #[test]
    fn test_larger_request_draws_fresh() {
        let mut stream = AntiThetic::new(ParkMiller::new(2, 9));
        let mut reference = ParkMiller::new(2, 9);

        let mut small = [0.0; 2];
        let mut large = [0.0; 4];
        stream.uniforms(&mut small);
        stream.uniforms(&mut large);

        let mut expected = [0.0; 6];
        reference.uniforms(&mut expected);
        assert_eq!(large, expected[2..6]);
        assert!(stream.mirror_pending());
    }

    #[test]
    fn test_gaussian_pairs_are_negated() {
        let mut stream = AntiThetic::new(ParkMiller::new(5, 17));
        let mut z = [0.0; 5];
        let mut w = [0.0; 5];
        stream.gaussians(&mut z);
        stream.gaussians(&mut w);
        for i in 0..5 {
            assert!((z[i] + w[i]).abs() < 1e-6, "{} vs {}", z[i], w[i]);
        }
    }

    #[test]
    fn test_skip_consumes_half_of_inner_stream() {
        let mut stream = AntiThetic::new(ParkMiller::new(2, 3));
        stream.skip(6);

        let mut inner = ParkMiller::new(2, 3);
        inner.skip(3);
        assert_eq!(stream.inner(), &inner);
        assert!(!stream.mirror_pending());
    }

    fn assert_skip_matches_drawing<G: RandomStream>(make: impl Fn() -> G) {
        for first in 0..4 {
            for skipped in [0, 1, 2, 3, 4, 257, 2_000] {
                let mut drawn = AntiThetic::new(make());
                let mut jumped = AntiThetic::new(make());
                let mut scratch = [0.0; 2];

                for _ in 0..first {
                    drawn.gaussians(&mut scratch);
                    jumped.gaussians(&mut scratch);
                }
                for _ in 0..skipped {
                    drawn.gaussians(&mut scratch);
                }
                jumped.skip(skipped);

                let (mut a, mut b) = ([0.0; 2], [0.0; 2]);
                drawn.gaussians(&mut a);
                jumped.gaussians(&mut b);
                assert_eq!(a, b, "after {} draws and {} skipped paths", first, skipped);
            }
        }
    }

    #[test]
    fn test_skip_matches_drawing_for_any_offset() {
        assert_skip_matches_drawing(|| ParkMiller::new(2, 21));
    }

    #[test]
    fn test_skip_matches_drawing_over_mersenne() {
        // The inner twister is read through uniforms, not its Ziggurat sampler.
        assert_skip_matches_drawing(|| MersenneTwister::new(2, 99));
    }

    #[test]
    fn test_reset_clears_pending_mirror() {
        let mut stream = AntiThetic::new(ParkMiller::new(2, 1));
        let mut first = [0.0; 2];
        stream.uniforms(&mut first);
        stream.reset();
        assert!(!stream.mirror_pending());

        let mut again = [0.0; 2];
        stream.uniforms(&mut again);
        assert_eq!(first, again);
    }
}
