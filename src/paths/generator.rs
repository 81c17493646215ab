// src/paths/generator.rs
//! Path Generator
//!
//! # Math Framework
//!
//! Simulates the underlying under GBM on a monthly grid, starting from the
//! normalised inception price:
//! ```text
//! S_0     = 100
//! S_{k+1} = S_k * exp((μ - σ²/2)Δt + σ√Δt * Z_k),   Δt = 1 / periods_per_year
//! ```
//! where Z_k ~ N(0,1) are independent draws.
//!
//! # Reproducibility
//!
//! Every call builds its own generator from the optional seed. A seeded call is
//! a pure function of its inputs; an unseeded call draws fresh entropy.

use crate::error::{validation::*, ScenarioError, ScenarioResult};
use crate::models::{Gbm, PriceModel};
use crate::paths::price_path::{PricePath, INITIAL_PRICE};
use crate::rng;
use rand::Rng;
use tracing::debug;

#[derive(Clone, Debug, PartialEq)]
pub struct PathConfig {
    pub term_periods: usize,
    pub annualized_drift: f64,
    pub annualized_vol: f64,
    pub periods_per_year: usize,
    pub seed: Option<u64>,
}

impl PathConfig {
    /// Validate the simulation inputs before any draw is made
    pub fn validate(&self) -> ScenarioResult<()> {
        validate_term(self.term_periods)?;
        validate_finite("annualized_drift", self.annualized_drift)?;
        validate_non_negative("annualized_vol", self.annualized_vol)?;
        if self.periods_per_year == 0 {
            return Err(ScenarioError::InvalidParameters {
                parameter: "periods_per_year".to_string(),
                value: 0.0,
                constraint: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Time step in years
    pub fn dt(&self) -> f64 {
        1.0 / self.periods_per_year as f64
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        PathConfig {
            term_periods: 24,
            annualized_drift: 0.0,
            annualized_vol: 0.2,
            periods_per_year: 12,
            seed: None,
        }
    }
}

/// Simulate a GBM price path of `term_periods + 1` points.
///
/// # Errors
///
/// `InvalidTerms` when `term_periods < 1`; `InvalidParameters` for a
/// non-finite drift, a negative or non-finite volatility or zero
/// `periods_per_year`.
pub fn generate_path(
    term_periods: usize,
    annualized_drift: f64,
    annualized_vol: f64,
    periods_per_year: usize,
    seed: Option<u64>,
) -> ScenarioResult<PricePath> {
    generate(&PathConfig {
        term_periods,
        annualized_drift,
        annualized_vol,
        periods_per_year,
        seed,
    })
}

/// Simulate a GBM path from a [`PathConfig`]
pub fn generate(cfg: &PathConfig) -> ScenarioResult<PricePath> {
    cfg.validate()?;
    let model = Gbm::new(cfg.annualized_drift, cfg.annualized_vol)?;
    let mut rng = rng::seed_rng(cfg.seed);
    generate_path_with_rng(&model, cfg, &mut rng)
}

/// Simulate a path with any price model and a caller-owned generator.
pub fn generate_path_with_rng<M: PriceModel, R: Rng + ?Sized>(
    model: &M,
    cfg: &PathConfig,
    rng: &mut R,
) -> ScenarioResult<PricePath> {
    cfg.validate()?;
    let dt = cfg.dt();

    let mut prices = Vec::with_capacity(cfg.term_periods + 1);
    prices.push(INITIAL_PRICE);

    let mut current_s = INITIAL_PRICE;
    for _ in 0..cfg.term_periods {
        let z = rng::get_normal_draw(rng);
        current_s = model.exact_step(current_s, dt, z);
        prices.push(current_s);
    }

    debug!(
        periods = cfg.term_periods,
        final_price = current_s,
        seeded = cfg.seed.is_some(),
        "generated price path"
    );

    PricePath::from_prices(prices)
}
