//! Cross-stream tests for the RNG module.
//!
//! This module contains tests verifying:
//! - Determinism and reset behaviour shared by every stream
//! - Range of uniform draws
//! - Antithetic mirroring over arbitrary seeds and sizes
//! - Distribution of Gaussians produced by the default transform

use super::*;
use proptest::prelude::*;

fn draw<G: RandomStream>(stream: &mut G, n: usize) -> Vec<f64> {
    let mut buffer = vec![0.0; n];
    stream.uniforms(&mut buffer);
    buffer
}

fn assert_reset_replays<G: RandomStream>(mut stream: G) {
    let first = draw(&mut stream, 16);
    draw(&mut stream, 16);
    draw(&mut stream, 16);
    stream.reset();
    assert_eq!(draw(&mut stream, 16), first);
}

/// Verifies that every stream restores its initial sequence on reset.
#[test]
fn test_reset_restores_sequence() {
    assert_reset_replays(ParkMiller::new(16, 12345));
    assert_reset_replays(MersenneTwister::new(16, 12345));
    assert_reset_replays(AntiThetic::new(ParkMiller::new(16, 12345)));
}

/// Verifies that clones evolve independently from the same state.
#[test]
fn test_clone_is_independent_copy() {
    let mut original = ParkMiller::new(4, 8);
    draw(&mut original, 4);

    let mut copy = original.clone();
    let a = draw(&mut original, 4);
    let b = draw(&mut copy, 4);
    assert_eq!(a, b);
}

/// Verifies the Gaussian moments of the inverse-CDF transform.
#[test]
fn test_park_miller_gaussian_moments() {
    let mut rng = ParkMiller::new(1, 42);
    let mut buffer = vec![0.0; 200_000];
    rng.gaussians(&mut buffer);

    let n = buffer.len() as f64;
    let mean = buffer.iter().sum::<f64>() / n;
    let variance = buffer.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);

    assert!(mean.abs() < 0.01, "Mean {} too far from 0", mean);
    assert!((variance - 1.0).abs() < 0.02, "Variance {} too far from 1", variance);
}

/// Verifies that the antithetic mean of uniforms is exactly one half per pair.
#[test]
fn test_antithetic_pairs_average_to_half() {
    let mut stream = AntiThetic::new(ParkMiller::new(8, 2718));
    for _ in 0..50 {
        let fresh = draw(&mut stream, 8);
        let mirror = draw(&mut stream, 8);
        for (x, y) in fresh.iter().zip(&mirror) {
            assert!((x + y - 1.0).abs() < 1e-15);
        }
    }
}

proptest! {
    #[test]
    fn prop_park_miller_uniforms_in_open_interval(seed in any::<u64>()) {
        let mut rng = ParkMiller::new(1, seed);
        let values = draw(&mut rng, 1_000);
        prop_assert!(values.iter().all(|&u| u > 0.0 && u < 1.0));
    }

    #[test]
    fn prop_park_miller_deterministic(seed in any::<u64>(), n in 1usize..256) {
        let mut a = ParkMiller::new(n, seed);
        let mut b = ParkMiller::new(n, seed);
        prop_assert_eq!(draw(&mut a, n), draw(&mut b, n));
    }

    #[test]
    fn prop_antithetic_mirroring(seed in any::<u64>(), half in 1usize..64) {
        let n = 2 * half;
        let mut stream = AntiThetic::new(ParkMiller::new(half, seed));
        let mut result = draw(&mut stream, half);
        result.extend(draw(&mut stream, half));

        prop_assert_eq!(result.len(), n);
        for i in 0..half {
            prop_assert_eq!(result[i + half], 1.0 - result[i]);
        }
    }
}
