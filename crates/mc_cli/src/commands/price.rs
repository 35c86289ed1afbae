//! Price command implementation
//!
//! Prices a European or Asian option by simulation and, for European
//! products, reports the closed-form price alongside.

use clap::{Args, ValueEnum};
use mc_core::analytical::{AnalyticalError, BlackScholes};
use mc_core::Payoff;
use mc_pricing::products::{AsianOption, Averaging, EuropeanOption, PathDependent};
use serde::Serialize;
use tracing::info;

use super::{print_estimate, simulate, Estimate, MarketArgs, RunArgs};
use crate::config::{GeneratorKind, OutputFormat, PricingConfig};
use crate::Result;

/// Product to simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductKind {
    European,
    AsianArithmetic,
    AsianGeometric,
}

/// Payoff applied at expiry, or to the average for Asian products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayoffKind {
    Call,
    Put,
    DigitalCall,
    DigitalPut,
    Forward,
}

impl PayoffKind {
    /// Payoff struck at `strike`.
    pub fn payoff(self, strike: f64) -> Payoff {
        match self {
            PayoffKind::Call => Payoff::call(strike),
            PayoffKind::Put => Payoff::put(strike),
            PayoffKind::DigitalCall => Payoff::digital_call(strike),
            PayoffKind::DigitalPut => Payoff::digital_put(strike),
            PayoffKind::Forward => Payoff::forward(strike),
        }
    }

    /// Closed-form price of the European contract.
    pub fn closed_form(
        self,
        model: &BlackScholes,
        strike: f64,
        expiry: f64,
    ) -> std::result::Result<f64, AnalyticalError> {
        match self {
            PayoffKind::Call => model.call(strike, expiry),
            PayoffKind::Put => model.put(strike, expiry),
            PayoffKind::DigitalCall => model.digital_call(strike, expiry),
            PayoffKind::DigitalPut => model.digital_put(strike, expiry),
            PayoffKind::Forward => model.forward(strike, expiry),
        }
    }
}

/// Arguments of `mcprice price`.
#[derive(Debug, Clone, Args)]
pub struct PriceArgs {
    /// Product type
    #[arg(long, value_enum, default_value_t = ProductKind::European)]
    pub product: ProductKind,

    /// Payoff type
    #[arg(long, value_enum, default_value_t = PayoffKind::Call)]
    pub payoff: PayoffKind,

    /// Strike
    #[arg(long, default_value_t = 100.0)]
    pub strike: f64,

    /// Expiry in years
    #[arg(long, default_value_t = 1.0)]
    pub expiry: f64,

    /// Number of equally spaced averaging dates (Asian products)
    #[arg(long, default_value_t = 12)]
    pub dates: usize,

    #[command(flatten)]
    pub market: MarketArgs,

    #[command(flatten)]
    pub run: RunArgs,
}

impl PriceArgs {
    /// Builds the product described by the arguments.
    pub fn product(&self) -> Result<Box<dyn PathDependent>> {
        let payoff = self.payoff.payoff(self.strike);
        let product: Box<dyn PathDependent> = match self.product {
            ProductKind::European => Box::new(EuropeanOption::new(self.expiry, payoff)?),
            ProductKind::AsianArithmetic => Box::new(AsianOption::with_equal_spacing(
                self.expiry,
                self.dates,
                payoff,
                Averaging::Arithmetic,
            )?),
            ProductKind::AsianGeometric => Box::new(AsianOption::with_equal_spacing(
                self.expiry,
                self.dates,
                payoff,
                Averaging::Geometric,
            )?),
        };
        Ok(product)
    }

    /// Closed-form reference, European products only.
    pub fn closed_form(&self) -> Result<Option<f64>> {
        if self.product != ProductKind::European {
            return Ok(None);
        }
        let model = self.market.closed_form()?;
        Ok(Some(self.payoff.closed_form(&model, self.strike, self.expiry)?))
    }
}

#[derive(Debug, Serialize)]
struct PriceReport<'a> {
    product: ProductKind,
    payoff: PayoffKind,
    strike: f64,
    expiry: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    dates: Option<usize>,
    market: &'a MarketArgs,
    generator: GeneratorKind,
    antithetic: bool,
    parallel: bool,
    estimate: &'a Estimate,
    closed_form: Option<f64>,
}

/// Run the price command
pub fn run(args: &PriceArgs, config: &PricingConfig) -> Result<()> {
    info!(
        product = ?args.product,
        payoff = ?args.payoff,
        generator = ?config.generator,
        antithetic = config.antithetic,
        parallel = config.parallel,
        "Starting pricing"
    );

    let closed_form = args.closed_form()?;
    let estimate = simulate(args.product()?, &args.market, config)?;

    match config.format {
        OutputFormat::Json => {
            let report = PriceReport {
                product: args.product,
                payoff: args.payoff,
                strike: args.strike,
                expiry: args.expiry,
                dates: (args.product != ProductKind::European).then_some(args.dates),
                market: &args.market,
                generator: config.generator,
                antithetic: config.antithetic,
                parallel: config.parallel,
                estimate: &estimate,
                closed_form,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            print_estimate(&estimate);
            if let Some(exact) = closed_form {
                println!("Closed form:    {:.6}", exact);
                println!("Difference:     {:.6}", estimate.price - exact);
            }
        }
    }

    info!("Pricing complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;
    use approx::assert_relative_eq;

    fn args(product: ProductKind, payoff: PayoffKind) -> PriceArgs {
        PriceArgs {
            product,
            payoff,
            strike: 100.0,
            expiry: 1.0,
            dates: 12,
            market: MarketArgs {
                spot: 100.0,
                rate: 0.05,
                dividend: 0.0,
                vol: 0.2,
            },
            run: RunArgs::default(),
        }
    }

    #[test]
    fn test_payoff_mapping() {
        assert_eq!(PayoffKind::Call.payoff(90.0), Payoff::call(90.0));
        assert_eq!(PayoffKind::DigitalPut.payoff(90.0), Payoff::digital_put(90.0));
        assert_eq!(PayoffKind::Forward.payoff(90.0).evaluate(100.0), 10.0);
    }

    #[test]
    fn test_closed_form_only_for_european() {
        let european = args(ProductKind::European, PayoffKind::Call);
        assert_relative_eq!(
            european.closed_form().unwrap().unwrap(),
            10.4506,
            epsilon = 1e-4
        );

        let asian = args(ProductKind::AsianArithmetic, PayoffKind::Call);
        assert!(asian.closed_form().unwrap().is_none());
    }

    #[test]
    fn test_asian_product_uses_averaging_dates() {
        let product = args(ProductKind::AsianGeometric, PayoffKind::Put).product().unwrap();
        assert_eq!(product.look_at_times().len(), 12);
        assert_eq!(product.possible_cash_flow_times(), vec![1.0]);
    }

    #[test]
    fn test_invalid_product_is_reported() {
        let mut bad = args(ProductKind::AsianArithmetic, PayoffKind::Call);
        bad.dates = 0;
        assert!(matches!(bad.product(), Err(CliError::Product(_))));

        let mut bad = args(ProductKind::European, PayoffKind::Call);
        bad.expiry = -1.0;
        assert!(matches!(bad.product(), Err(CliError::Product(_))));
    }

    #[test]
    fn test_simulated_call_near_closed_form() {
        let args = args(ProductKind::European, PayoffKind::Call);
        let config = PricingConfig {
            paths: 50_000,
            antithetic: true,
            ..PricingConfig::default()
        };
        let estimate = simulate(args.product().unwrap(), &args.market, &config).unwrap();
        let exact = args.closed_form().unwrap().unwrap();
        let se = estimate.std_error.unwrap();
        assert!((estimate.price - exact).abs() < 4.0 * se);
    }
}
