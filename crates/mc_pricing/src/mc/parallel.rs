//! Parallel simulation drivers.
//!
//! Paths are split into contiguous chunks. Each chunk gets its own copy of
//! the engine's path generator, advanced with `skip_paths` to the chunk's
//! first path, so every path sees exactly the random numbers it would see in
//! a sequential run. Chunks are evaluated on the rayon pool in waves of
//! `chunks_per_wave`.
//!
//! - [`ExoticEngine::do_simulation_parallel`] feeds each wave's values to
//!   the gatherer in original path order on the calling thread, so
//!   order-sensitive gatherers such as the convergence table record the same
//!   milestones as a sequential run.
//! - [`ExoticEngine::mean_parallel`] merges per-chunk
//!   [`StatisticsMoments`] in whatever order rayon reduces them.
//!
//! In both cases the engine's own generator ends up advanced by `n_paths`.

use rayon::prelude::*;
use tracing::{debug, info_span};

use super::config::SimulationConfig;
use super::engine::{discounted_value, ExoticEngine};
use super::paths::PathGenerator;
use crate::products::PathDependent;
use crate::statistics::{StatisticsGatherer, StatisticsMoments};

/// One unit of parallel work: a generator positioned at the chunk start and
/// the number of paths to evaluate.
type Chunk<G> = (G, usize);

impl<P: PathDependent, G: PathGenerator> ExoticEngine<P, G> {
    /// Simulates `config.n_paths()` paths in parallel, recording results in
    /// original path order.
    ///
    /// With a deterministic stream the gatherer receives exactly the same
    /// sequence of values as [`ExoticEngine::do_simulation`].
    pub fn do_simulation_parallel<S: StatisticsGatherer + ?Sized>(
        &mut self,
        gatherer: &mut S,
        config: &SimulationConfig,
    ) {
        let n_paths = config.n_paths();
        let _span = info_span!("simulation", paths = n_paths, mode = "parallel").entered();

        let (product, discounts, generator) = self.parts_mut();
        let chunk_size = even_chunk_size(config.chunk_size());
        let wave_paths = chunk_size * config.chunks_per_wave();
        let mut cursor = generator.clone();

        let mut wave_start = 0;
        while wave_start < n_paths {
            let wave_end = (wave_start + wave_paths).min(n_paths);
            let chunks = plan_wave(&mut cursor, wave_start, wave_end, chunk_size);
            let n_chunks = chunks.len();

            let values: Vec<Vec<f64>> = chunks
                .into_par_iter()
                .map(|(chunk_generator, len)| evaluate_chunk(product, discounts, chunk_generator, len))
                .collect();

            for value in values.into_iter().flatten() {
                gatherer.record_one_result(value);
            }

            debug!(
                wave_start,
                paths = wave_end - wave_start,
                chunks = n_chunks,
                "wave recorded"
            );
            wave_start = wave_end;
        }

        *generator = cursor;
    }

    /// Simulates `config.n_paths()` paths in parallel and returns their
    /// mean, variance and standard error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mc_core::{Parameter, Payoff};
    /// use mc_pricing::mc::{ExoticEngine, SimulationConfig};
    /// use mc_pricing::products::EuropeanOption;
    /// use mc_pricing::rng::ParkMiller;
    ///
    /// let mut engine = ExoticEngine::black_scholes(
    ///     EuropeanOption::new(1.0, Payoff::put(100.0)).unwrap(),
    ///     ParkMiller::new(1, 42),
    ///     100.0,
    ///     Parameter::constant(0.05),
    ///     Parameter::constant(0.0),
    ///     Parameter::constant(0.2),
    /// )
    /// .unwrap();
    ///
    /// let config = SimulationConfig::builder().n_paths(20_000).chunk_size(1_000).build().unwrap();
    /// let moments = engine.mean_parallel(&config);
    /// assert!(moments.std_error().unwrap() < 0.1);
    /// ```
    pub fn mean_parallel(&mut self, config: &SimulationConfig) -> StatisticsMoments {
        let n_paths = config.n_paths();
        let _span = info_span!("simulation", paths = n_paths, mode = "parallel-mean").entered();

        let (product, discounts, generator) = self.parts_mut();
        let chunk_size = even_chunk_size(config.chunk_size());
        let wave_paths = chunk_size * config.chunks_per_wave();
        let mut cursor = generator.clone();
        let mut total = StatisticsMoments::new();

        let mut wave_start = 0;
        while wave_start < n_paths {
            let wave_end = (wave_start + wave_paths).min(n_paths);
            let chunks = plan_wave(&mut cursor, wave_start, wave_end, chunk_size);

            let wave = chunks
                .into_par_iter()
                .fold(StatisticsMoments::new, |mut acc, (chunk_generator, len)| {
                    for value in evaluate_chunk(product, discounts, chunk_generator, len) {
                        acc.record_one_result(value);
                    }
                    acc
                })
                .reduce(StatisticsMoments::new, |mut a, b| {
                    a.merge(&b);
                    a
                });

            debug!(wave_start, paths = wave_end - wave_start, "wave merged");
            total.merge(&wave);
            wave_start = wave_end;
        }

        *generator = cursor;
        total
    }
}

/// Rounds `chunk_size` up to an even number.
fn even_chunk_size(chunk_size: usize) -> usize {
    chunk_size.max(1).next_multiple_of(2)
}

/// Splits `[start, end)` into chunks, positioning a generator copy at each
/// chunk start. `cursor` is left at `end`.
fn plan_wave<G: PathGenerator>(cursor: &mut G, start: usize, end: usize, chunk_size: usize) -> Vec<Chunk<G>> {
    let mut chunks = Vec::with_capacity((end - start).div_ceil(chunk_size));
    let mut chunk_start = start;
    while chunk_start < end {
        let len = chunk_size.min(end - chunk_start);
        chunks.push((cursor.clone(), len));
        cursor.skip_paths(len);
        chunk_start += len;
    }
    chunks
}

fn evaluate_chunk<P: PathDependent, G: PathGenerator>(
    product: &P,
    discounts: &[f64],
    mut generator: G,
    len: usize,
) -> Vec<f64> {
    let mut spots = vec![0.0; generator.dimension()];
    let mut flows = Vec::with_capacity(product.max_number_of_cash_flows());
    let mut values = Vec::with_capacity(len);

    for _ in 0..len {
        generator.path(&mut spots);
        let (value, returned) = discounted_value(product, discounts, &spots, flows);
        flows = returned;
        values.push(value);
    }
    values
}
