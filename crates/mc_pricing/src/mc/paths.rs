//! Path generation.
//!
//! A [`PathGenerator`] produces one vector of simulated spots per call, one
//! spot per product observation time. [`BlackScholesPathGenerator`] evolves
//! a lognormal process with deterministic time-dependent coefficients:
//!
//! ```text
//! ln S(tᵢ) = ln S(tᵢ₋₁) + driftᵢ + stdᵢ · zᵢ
//! stdᵢ   = sqrt(∫ σ² dt)
//! driftᵢ = ∫ r dt - ∫ d dt - ½ stdᵢ²
//! ```
//!
//! over each interval `[tᵢ₋₁, tᵢ]` with `t₀ = 0`. The integrals are exact, so
//! there is no discretisation error between observation dates.

use mc_core::Parameter;
use tracing::debug;

use super::error::{check_observation_times, EngineError};
use crate::rng::RandomStream;

/// Produces simulated spot paths.
pub trait PathGenerator: Clone + Send {
    /// Number of spots per path.
    fn dimension(&self) -> usize;

    /// Overwrites `spots` with the next simulated path.
    fn path(&mut self, spots: &mut [f64]);

    /// Advances as if `n_paths` paths had been generated.
    fn skip_paths(&mut self, n_paths: usize);

    /// Restores the generator to its initial state.
    fn reset(&mut self);
}

/// Lognormal path generator driven by a [`RandomStream`].
///
/// # Examples
///
/// ```rust
/// use mc_core::Parameter;
/// use mc_pricing::mc::{BlackScholesPathGenerator, PathGenerator};
/// use mc_pricing::rng::ParkMiller;
///
/// let mut generator = BlackScholesPathGenerator::new(
///     ParkMiller::new(1, 1),
///     100.0,
///     &[0.5, 1.0],
///     &Parameter::constant(0.05),
///     &Parameter::constant(0.0),
///     &Parameter::constant(0.2),
/// )
/// .unwrap();
///
/// let mut spots = [0.0; 2];
/// generator.path(&mut spots);
/// assert!(spots.iter().all(|&s| s > 0.0));
/// ```
#[derive(Debug, Clone)]
pub struct BlackScholesPathGenerator<R> {
    stream: R,
    log_spot: f64,
    drifts: Vec<f64>,
    std_devs: Vec<f64>,
}

impl<R: RandomStream> BlackScholesPathGenerator<R> {
    /// Creates a generator observing at `times`.
    ///
    /// The stream's dimension is reset to `times.len()`.
    ///
    /// # Errors
    ///
    /// - `EngineError::InvalidSpot` if `spot` is not positive
    /// - `EngineError::EmptyObservationTimes` / `NonIncreasingTimes` for bad times
    pub fn new(
        mut stream: R,
        spot: f64,
        times: &[f64],
        rate: &Parameter,
        dividend: &Parameter,
        volatility: &Parameter,
    ) -> Result<Self, EngineError> {
        if spot.is_nan() || spot <= 0.0 {
            return Err(EngineError::InvalidSpot { spot });
        }
        check_observation_times(times)?;

        let mut drifts = Vec::with_capacity(times.len());
        let mut std_devs = Vec::with_capacity(times.len());
        let mut previous = 0.0;
        for &time in times {
            let variance = volatility.integral_square(previous, time);
            drifts.push(
                rate.integral(previous, time) - dividend.integral(previous, time) - 0.5 * variance,
            );
            std_devs.push(variance.sqrt());
            previous = time;
        }

        stream.reset_dimension(times.len());
        debug!(
            observations = times.len(),
            spot, "black-scholes path generator ready"
        );

        Ok(Self {
            stream,
            log_spot: spot.ln(),
            drifts,
            std_devs,
        })
    }

    /// Per-interval log drifts.
    pub fn drifts(&self) -> &[f64] {
        &self.drifts
    }

    /// Per-interval standard deviations of the log increment.
    pub fn std_devs(&self) -> &[f64] {
        &self.std_devs
    }

    /// The underlying random stream.
    pub fn stream(&self) -> &R {
        &self.stream
    }
}

impl<R: RandomStream> PathGenerator for BlackScholesPathGenerator<R> {
    #[inline]
    fn dimension(&self) -> usize {
        self.drifts.len()
    }

    #[inline]
    fn path(&mut self, spots: &mut [f64]) {
        debug_assert_eq!(spots.len(), self.drifts.len());

        self.stream.gaussians(spots);

        let mut log_spot = self.log_spot;
        for ((s, drift), std) in spots.iter_mut().zip(&self.drifts).zip(&self.std_devs) {
            log_spot += drift + std * *s;
            *s = log_spot.exp();
        }
    }

    fn skip_paths(&mut self, n_paths: usize) {
        self.stream.skip(n_paths);
    }

    fn reset(&mut self) {
        self.stream.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{AntiThetic, ParkMiller};
    use approx::assert_relative_eq;

    fn flat(value: f64) -> Parameter {
        Parameter::constant(value)
    }

    #[test]
    fn test_interval_terms() {
        let generator = BlackScholesPathGenerator::new(
            ParkMiller::new(1, 1),
            100.0,
            &[1.0, 3.0],
            &flat(0.05),
            &flat(0.01),
            &flat(0.2),
        )
        .unwrap();

        assert_eq!(generator.dimension(), 2);
        assert_eq!(generator.stream().dimension(), 2);
        assert_relative_eq!(generator.std_devs()[0], 0.2, epsilon = 1e-15);
        assert_relative_eq!(generator.std_devs()[1], 0.08_f64.sqrt(), epsilon = 1e-15);
        assert_relative_eq!(generator.drifts()[0], 0.05 - 0.01 - 0.02, epsilon = 1e-15);
        assert_relative_eq!(generator.drifts()[1], 0.10 - 0.02 - 0.04, epsilon = 1e-15);
    }

    #[test]
    fn test_zero_volatility_is_deterministic_forward() {
        let mut generator = BlackScholesPathGenerator::new(
            ParkMiller::new(1, 9),
            100.0,
            &[0.5, 1.0, 2.0],
            &flat(0.03),
            &flat(0.01),
            &flat(0.0),
        )
        .unwrap();

        let mut spots = [0.0; 3];
        generator.path(&mut spots);
        for (s, t) in spots.iter().zip([0.5, 1.0, 2.0]) {
            assert_relative_eq!(*s, 100.0 * (0.02_f64 * t).exp(), epsilon = 1e-10);
        }
    }

    #[test]
    fn test_antithetic_paths_mirror_in_log_space() {
        let mut generator = BlackScholesPathGenerator::new(
            AntiThetic::new(ParkMiller::new(1, 5)),
            100.0,
            &[1.0],
            &flat(0.0),
            &flat(0.0),
            &flat(0.2),
        )
        .unwrap();

        let mut up = [0.0];
        let mut down = [0.0];
        generator.path(&mut up);
        generator.path(&mut down);

        // ln(up/S0) + ln(down/S0) = 2 · drift
        let sum = (up[0] / 100.0).ln() + (down[0] / 100.0).ln();
        assert_relative_eq!(sum, -0.04, epsilon = 1e-6);
    }

    #[test]
    fn test_skip_then_path_matches_sequential() {
        let make = || {
            BlackScholesPathGenerator::new(
                ParkMiller::new(1, 13),
                50.0,
                &[0.25, 0.5],
                &flat(0.02),
                &flat(0.0),
                &flat(0.3),
            )
            .unwrap()
        };
        let mut sequential = make();
        let mut skipped = make();

        let mut spots = [0.0; 2];
        for _ in 0..3 {
            sequential.path(&mut spots);
        }
        sequential.path(&mut spots);

        skipped.skip_paths(3);
        let mut jumped = [0.0; 2];
        skipped.path(&mut jumped);
        assert_eq!(spots, jumped);
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        let build = |spot: f64, times: &[f64]| {
            BlackScholesPathGenerator::new(
                ParkMiller::new(1, 1),
                spot,
                times,
                &flat(0.0),
                &flat(0.0),
                &flat(0.2),
            )
        };
        assert!(matches!(
            build(0.0, &[1.0]),
            Err(EngineError::InvalidSpot { .. })
        ));
        assert!(matches!(
            build(100.0, &[]),
            Err(EngineError::EmptyObservationTimes)
        ));
        assert!(matches!(
            build(100.0, &[1.0, 1.0]),
            Err(EngineError::NonIncreasingTimes { index: 1, .. })
        ));
    }
}
