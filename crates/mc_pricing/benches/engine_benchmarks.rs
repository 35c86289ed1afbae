//! Criterion benchmarks for the exotic engine.
//!
//! Benchmarks cover:
//! - Random stream throughput (Park-Miller, Mersenne Twister, antithetic)
//! - Sequential simulation of European and Asian options
//! - Ordered parallel simulation against the sequential loop

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mc_core::{Parameter, Payoff};
use mc_pricing::mc::{ExoticEngine, SimulationConfig};
use mc_pricing::products::{AsianOption, Averaging, EuropeanOption};
use mc_pricing::rng::{AntiThetic, MersenneTwister, ParkMiller, RandomStream};
use mc_pricing::statistics::{ConvergenceTable, StatisticsMean};

fn bench_stream<R: RandomStream>(c: &mut Criterion, name: &str, make: impl Fn() -> R) {
    let mut group = c.benchmark_group("random_streams");
    for n in [1_000, 100_000] {
        group.bench_with_input(BenchmarkId::new(name, n), &n, |b, &n| {
            let mut stream = make();
            let mut buffer = vec![0.0; n];
            b.iter(|| {
                stream.gaussians(&mut buffer);
                black_box(buffer.iter().sum::<f64>())
            });
        });
    }
    group.finish();
}

/// Benchmark Gaussian generation for each stream.
fn bench_random_streams(c: &mut Criterion) {
    bench_stream(c, "park_miller", || ParkMiller::new(1, 42));
    bench_stream(c, "mersenne_twister", || MersenneTwister::new(1, 42));
    bench_stream(c, "antithetic_park_miller", || {
        AntiThetic::new(ParkMiller::new(1, 42))
    });
}

/// Benchmark the sequential engine loop.
fn bench_sequential(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential_simulation");
    group.sample_size(30);

    for n_paths in [10_000, 100_000] {
        group.bench_with_input(
            BenchmarkId::new("european_call", n_paths),
            &n_paths,
            |b, &n| {
                let product = EuropeanOption::new(1.0, Payoff::call(100.0)).unwrap();
                let mut engine = ExoticEngine::black_scholes(
                    product,
                    ParkMiller::new(1, 42),
                    100.0,
                    Parameter::constant(0.05),
                    Parameter::constant(0.0),
                    Parameter::constant(0.2),
                )
                .unwrap();
                b.iter(|| {
                    let mut stats = StatisticsMean::new();
                    engine.do_simulation(&mut stats, n);
                    black_box(stats.mean())
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("asian_call_12_dates", n_paths),
            &n_paths,
            |b, &n| {
                let product =
                    AsianOption::with_equal_spacing(1.0, 12, Payoff::call(100.0), Averaging::Arithmetic)
                        .unwrap();
                let mut engine = ExoticEngine::black_scholes(
                    product,
                    ParkMiller::new(12, 42),
                    100.0,
                    Parameter::constant(0.05),
                    Parameter::constant(0.0),
                    Parameter::constant(0.2),
                )
                .unwrap();
                b.iter(|| {
                    let mut table = ConvergenceTable::new(StatisticsMean::new());
                    engine.do_simulation(&mut table, n);
                    black_box(table.into_inner().mean())
                });
            },
        );
    }

    group.finish();
}

/// Benchmark the ordered parallel driver.
fn bench_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_simulation");
    group.sample_size(20);

    let n_paths = 1_000_000;
    let config = SimulationConfig::builder()
        .n_paths(n_paths)
        .build()
        .unwrap();
    let product =
        AsianOption::with_equal_spacing(1.0, 12, Payoff::call(100.0), Averaging::Arithmetic)
            .unwrap();
    let mut engine = ExoticEngine::black_scholes(
        product,
        MersenneTwister::new(12, 42),
        100.0,
        Parameter::constant(0.05),
        Parameter::constant(0.0),
        Parameter::constant(0.2),
    )
    .unwrap();

    group.bench_function(BenchmarkId::new("asian_ordered", n_paths), |b| {
        b.iter(|| {
            let mut stats = StatisticsMean::new();
            engine.do_simulation_parallel(&mut stats, &config);
            black_box(stats.mean())
        });
    });

    group.bench_function(BenchmarkId::new("asian_moments", n_paths), |b| {
        b.iter(|| black_box(engine.mean_parallel(&config).mean()));
    });

    group.finish();
}

criterion_group!(benches, bench_random_streams, bench_sequential, bench_parallel);
criterion_main!(benches);
