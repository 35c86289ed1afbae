//! # Random Streams
//!
//! This module provides the random-number layer of the simulation: seeded,
//! reproducible streams of uniform variates and the Gaussian variates
//! derived from them.
//!
//! ## Design
//!
//! - **Reproducibility**: every stream is explicitly seeded; `reset` restores
//!   the state at construction
//! - **Zero allocation**: draws fill caller-owned `&mut [f64]` slices
//! - **Static dispatch**: the engine is generic over [`RandomStream`], so the
//!   hot loop carries no virtual calls
//! - **Per-worker copies**: streams are `Clone + Send`; parallel runs give each
//!   worker its own copy advanced with [`RandomStream::skip`]
//!
//! ## Dimension
//!
//! A stream has a dimension: the number of variates one path consumes. The
//! path generator sets it to the number of observation times. `skip(n)`
//! advances by `n` paths of that dimension.
//!
//! ## Module Structure
//!
//! - [`ParkMiller`]: Park-Miller minimal standard generator
//! - [`MersenneTwister`]: MT19937-64 with native Ziggurat Gaussians
//! - [`AntiThetic`]: antithetic decorator over any stream
//!
//! ## Usage Example
//!
//! ```rust
//! use mc_pricing::rng::{AntiThetic, ParkMiller, RandomStream};
//!
//! let mut stream = AntiThetic::new(ParkMiller::new(4, 1));
//! let mut first = [0.0; 4];
//! let mut second = [0.0; 4];
//! stream.uniforms(&mut first);
//! stream.uniforms(&mut second);
//!
//! for i in 0..4 {
//!     assert_eq!(second[i], 1.0 - first[i]);
//! }
//! ```

mod antithetic;
mod mersenne;
mod park_miller;

pub use antithetic::AntiThetic;
pub use mersenne::MersenneTwister;
pub use park_miller::ParkMiller;

use mc_core::math::inverse_cumulative_normal;

/// Source of uniform and Gaussian variates for path generation.
///
/// Implementors supply `uniforms`, `skip`, `set_seed`, `reset` and the
/// dimension accessors. `gaussians` defaults to the inverse cumulative normal
/// transform of `uniforms`; a stream with a native normal sampler overrides it.
pub trait RandomStream: Clone + Send {
    /// Number of variates consumed by one path.
    fn dimension(&self) -> usize;

    /// Changes the number of variates consumed by one path.
    fn reset_dimension(&mut self, dimension: usize);

    /// Fills `variates` with uniform draws in the open interval (0, 1).
    fn uniforms(&mut self, variates: &mut [f64]);

    /// Fills `variates` with standard normal draws.
    fn gaussians(&mut self, variates: &mut [f64]) {
        self.uniforms(variates);
        for x in variates.iter_mut() {
            *x = inverse_cumulative_normal(*x);
        }
    }

    /// Advances the stream as if `n_paths` paths of `dimension()` variates
    /// had been drawn.
    fn skip(&mut self, n_paths: usize);

    /// Advances the stream as if `n_paths` paths had been drawn through
    /// [`RandomStream::uniforms`].
    ///
    /// Equal to `skip` unless `gaussians` consumes the stream differently
    /// from `uniforms`.
    fn skip_uniforms(&mut self, n_paths: usize) {
        self.skip(n_paths);
    }

    /// Re-seeds the stream. The new seed becomes the reset point.
    fn set_seed(&mut self, seed: u64);

    /// Restores the state at construction (or at the last `set_seed`).
    fn reset(&mut self);
}

#[cfg(test)]
mod tests;
