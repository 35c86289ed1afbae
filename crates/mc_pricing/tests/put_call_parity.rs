//! Put-call parity, analytically and path by path.

use approx::assert_abs_diff_eq;
use mc_core::analytical::BlackScholes;
use mc_core::{Parameter, Payoff};
use mc_pricing::mc::ExoticEngine;
use mc_pricing::products::EuropeanOption;
use mc_pricing::rng::{AntiThetic, ParkMiller, RandomStream};
use mc_pricing::statistics::StatisticsMean;

fn mc_price<R: RandomStream>(payoff: Payoff, stream: R, n_paths: usize) -> f64 {
    let mut engine = ExoticEngine::black_scholes(
        EuropeanOption::new(1.5, payoff).unwrap(),
        stream,
        100.0,
        Parameter::constant(0.04),
        Parameter::constant(0.015),
        Parameter::constant(0.3),
    )
    .unwrap();

    let mut stats = StatisticsMean::new();
    engine.do_simulation(&mut stats, n_paths);
    stats.mean().unwrap()
}

#[test]
fn test_closed_form_parity() {
    let bs = BlackScholes::new(100.0, 0.04, 0.015, 0.3).unwrap();
    for strike in [70.0, 90.0, 100.0, 110.0, 140.0] {
        let call = bs.call(strike, 1.5).unwrap();
        let put = bs.put(strike, 1.5).unwrap();
        let forward = bs.forward(strike, 1.5).unwrap();
        assert_abs_diff_eq!(call - put, forward, epsilon = 1e-3);
    }
}

#[test]
fn test_monte_carlo_parity_on_identical_streams() {
    // max(S-K,0) - max(K-S,0) = S-K on every path, so the identity holds to
    // rounding whatever the sampling error.
    for strike in [80.0, 100.0, 125.0] {
        let call = mc_price(Payoff::call(strike), ParkMiller::new(1, 31), 20_000);
        let put = mc_price(Payoff::put(strike), ParkMiller::new(1, 31), 20_000);
        let forward = mc_price(Payoff::forward(strike), ParkMiller::new(1, 31), 20_000);
        assert_abs_diff_eq!(call - put, forward, epsilon = 1e-9);
    }
}

#[test]
fn test_monte_carlo_parity_close_to_closed_form_forward() {
    let bs = BlackScholes::new(100.0, 0.04, 0.015, 0.3).unwrap();
    let call = mc_price(Payoff::call(100.0), AntiThetic::new(ParkMiller::new(1, 8)), 100_000);
    let put = mc_price(Payoff::put(100.0), AntiThetic::new(ParkMiller::new(1, 8)), 100_000);
    let forward = bs.forward(100.0, 1.5).unwrap();
    assert_abs_diff_eq!(call - put, forward, epsilon = 0.25);
}
