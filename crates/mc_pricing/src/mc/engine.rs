//! Exotic Monte Carlo engine.

use mc_core::Parameter;
use tracing::{debug, info_span};

use super::error::{check_observation_times, EngineError};
use super::paths::{BlackScholesPathGenerator, PathGenerator};
use crate::products::{CashFlow, PathDependent};
use crate::rng::RandomStream;
use crate::statistics::StatisticsGatherer;

/// Drives path generation, cash-flow extraction, discounting and aggregation.
///
/// The discount table `exp(-∫₀^{tᵢ} r)` is computed once from the product's
/// cash-flow times and never changes, so repeated simulations are
/// independent apart from the state of the generator.
///
/// # Examples
///
/// ```rust
/// use mc_core::{Parameter, Payoff};
/// use mc_pricing::mc::ExoticEngine;
/// use mc_pricing::products::EuropeanOption;
/// use mc_pricing::rng::ParkMiller;
/// use mc_pricing::statistics::{StatisticsGatherer, StatisticsMean};
///
/// let product = EuropeanOption::new(1.0, Payoff::call(100.0)).unwrap();
/// let mut engine = ExoticEngine::black_scholes(
///     product,
///     ParkMiller::new(1, 1),
///     100.0,
///     Parameter::constant(0.05),
///     Parameter::constant(0.0),
///     Parameter::constant(0.2),
/// )
/// .unwrap();
///
/// let mut stats = StatisticsMean::new();
/// engine.do_simulation(&mut stats, 10_000);
/// assert_eq!(stats.paths_recorded(), 10_000);
/// assert!(stats.mean().unwrap() > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct ExoticEngine<P, G> {
    product: P,
    generator: G,
    rate: Parameter,
    discounts: Vec<f64>,
}

impl<P: PathDependent, G: PathGenerator> ExoticEngine<P, G> {
    /// Creates an engine for `product` discounted with `rate`.
    ///
    /// # Errors
    ///
    /// - `CashFlowTimesMismatch` if the product's cash-flow times disagree
    ///   with `max_number_of_cash_flows()`
    /// - `EmptyObservationTimes` / `NonIncreasingTimes` for bad look-at times
    /// - `DimensionMismatch` if the generator does not produce one spot per
    ///   look-at time
    pub fn new(product: P, generator: G, rate: Parameter) -> Result<Self, EngineError> {
        let cash_flow_times = product.possible_cash_flow_times();
        let declared = product.max_number_of_cash_flows();
        if cash_flow_times.len() != declared {
            return Err(EngineError::CashFlowTimesMismatch {
                declared,
                actual: cash_flow_times.len(),
            });
        }

        let look_at_times = product.look_at_times();
        check_observation_times(look_at_times)?;
        if generator.dimension() != look_at_times.len() {
            return Err(EngineError::DimensionMismatch {
                expected: look_at_times.len(),
                actual: generator.dimension(),
            });
        }

        let discounts: Vec<f64> = cash_flow_times
            .iter()
            .map(|&t| (-rate.integral(0.0, t)).exp())
            .collect();

        debug!(
            look_at_times = look_at_times.len(),
            cash_flow_times = discounts.len(),
            "exotic engine constructed"
        );

        Ok(Self {
            product,
            generator,
            rate,
            discounts,
        })
    }

    /// The simulated product.
    #[inline]
    pub fn product(&self) -> &P {
        &self.product
    }

    /// The path generator.
    #[inline]
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Mutable access to the path generator (e.g. to reset it).
    #[inline]
    pub fn generator_mut(&mut self) -> &mut G {
        &mut self.generator
    }

    /// The discount rate.
    #[inline]
    pub fn rate(&self) -> &Parameter {
        &self.rate
    }

    /// Discount factors, one per possible cash-flow time.
    #[inline]
    pub fn discounts(&self) -> &[f64] {
        &self.discounts
    }

    /// Discounted value of one path.
    ///
    /// `flows` is a reusable buffer; it is returned alongside the value.
    ///
    /// # Panics
    ///
    /// Panics if the product emits more than `max_number_of_cash_flows()`
    /// flows or a `time_index` outside the discount table.
    #[inline]
    pub fn do_one_path(&self, spots: &[f64], flows: Vec<CashFlow>) -> (f64, Vec<CashFlow>) {
        discounted_value(&self.product, &self.discounts, spots, flows)
    }

    /// Simulates `n_paths` paths, feeding each discounted value to `gatherer`.
    pub fn do_simulation<S: StatisticsGatherer + ?Sized>(&mut self, gatherer: &mut S, n_paths: usize) {
        let _span = info_span!("simulation", paths = n_paths, mode = "sequential").entered();

        let mut spots = vec![0.0; self.generator.dimension()];
        let mut flows = Vec::with_capacity(self.product.max_number_of_cash_flows());

        for _ in 0..n_paths {
            self.generator.path(&mut spots);
            let (value, returned) = self.do_one_path(&spots, flows);
            flows = returned;
            gatherer.record_one_result(value);
        }
    }

    pub(crate) fn parts_mut(&mut self) -> (&P, &[f64], &mut G) {
        (&self.product, &self.discounts, &mut self.generator)
    }
}

impl<P: PathDependent, R: RandomStream> ExoticEngine<P, BlackScholesPathGenerator<R>> {
    /// Creates an engine with a lognormal path generator observing at the
    /// product's look-at times.
    ///
    /// # Errors
    ///
    /// As [`BlackScholesPathGenerator::new`] and [`ExoticEngine::new`].
    pub fn black_scholes(
        product: P,
        stream: R,
        spot: f64,
        rate: Parameter,
        dividend: Parameter,
        volatility: Parameter,
    ) -> Result<Self, EngineError> {
        let generator = BlackScholesPathGenerator::new(
            stream,
            spot,
            product.look_at_times(),
            &rate,
            &dividend,
            &volatility,
        )?;
        Self::new(product, generator, rate)
    }
}

/// `Σ amount · discounts[time_index]` over the product's flows for `spots`.
pub(crate) fn discounted_value<P: PathDependent + ?Sized>(
    product: &P,
    discounts: &[f64],
    spots: &[f64],
    flows: Vec<CashFlow>,
) -> (f64, Vec<CashFlow>) {
    let flows = product.cash_flows(spots, flows);
    assert!(
        flows.len() <= discounts.len(),
        "product emitted {} cash flows but declares at most {}",
        flows.len(),
        discounts.len()
    );

    let mut value = 0.0;
    for flow in &flows {
        assert!(
            flow.time_index < discounts.len(),
            "cash flow time index {} outside discount table of length {}",
            flow.time_index,
            discounts.len()
        );
        value += flow.amount * discounts[flow.time_index];
    }
    (value, flows)
}
