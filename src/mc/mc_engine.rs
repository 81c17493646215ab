// src/mc/mc_engine.rs
//! Monte Carlo Scenario Distribution
//!
//! Runs the path generator and the scenario engine over many independent GBM
//! paths and summarises how the note terminates.
//!
//! # Reproducibility
//!
//! Path `i` uses its own generator seeded with `seed + i`, so a seeded run
//! gives identical results however rayon schedules the work. Without a seed
//! every path draws fresh entropy.

use crate::error::{validation::*, ScenarioError, ScenarioResult};
use crate::models::Gbm;
use crate::paths::{generate_path_with_rng, PathConfig};
use crate::product::ProductTerms;
use crate::rng::RngFactory;
use crate::scenario::{evaluate, Scenario, ScenarioKind};
use rayon::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;
use tracing::{debug, info};

#[derive(Clone, Debug, PartialEq)]
pub struct McScenarioConfig {
    pub paths: usize,
    pub path: PathConfig,
}

impl McScenarioConfig {
    /// Validate the run against the note it will be evaluated on
    pub fn validate(&self, terms: &ProductTerms) -> ScenarioResult<()> {
        validate_paths(self.paths)?;
        self.path.validate()?;

        if self.path.term_periods != terms.term() {
            return Err(ScenarioError::InvalidConfiguration {
                field: "term_periods".to_string(),
                reason: format!(
                    "simulated {} periods but the note's term is {}",
                    self.path.term_periods,
                    terms.term()
                ),
            });
        }
        if self.path.periods_per_year != terms.periods_per_year() {
            return Err(ScenarioError::InvalidConfiguration {
                field: "periods_per_year".to_string(),
                reason: format!(
                    "simulation uses {} but the note accrues over {}",
                    self.path.periods_per_year,
                    terms.periods_per_year()
                ),
            });
        }
        Ok(())
    }
}

impl Default for McScenarioConfig {
    fn default() -> Self {
        McScenarioConfig {
            paths: 10_000,
            path: PathConfig {
                seed: Some(12345),
                ..Default::default()
            },
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct PathOutcome {
    scenario: Scenario,
    terminal_payoff: f64,
    knock_in_preceded_knock_out: bool,
}

/// Summary of scenario frequencies and terminal payoffs
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScenarioDistribution {
    pub paths: usize,
    pub early_knock_out: usize,
    pub maturity_no_event: usize,
    pub knock_in_no_knock_out: usize,
    /// Early knock-outs whose path had knocked in first
    pub knock_in_before_knock_out: usize,
    pub knock_out_probability: f64,
    pub mean_knock_out_period: Option<f64>,
    pub mean_terminal_payoff: f64,
    pub std_terminal_payoff: f64,
    pub min_terminal_payoff: f64,
    pub max_terminal_payoff: f64,
}

impl ScenarioDistribution {
    fn from_outcomes(outcomes: &[PathOutcome]) -> Self {
        let count = |kind: ScenarioKind| outcomes.iter().filter(|o| o.scenario.kind() == kind).count();

        let early_knock_out = count(ScenarioKind::EarlyKnockOut);
        let maturity_no_event = count(ScenarioKind::MaturityNoEvent);
        let knock_in_no_knock_out = count(ScenarioKind::KnockInNoKnockOut);

        let knock_out_periods: Vec<f64> = outcomes
            .iter()
            .filter_map(|o| o.scenario.knock_out_period())
            .map(|p| p as f64)
            .collect();
        let terminals: Vec<f64> = outcomes.iter().map(|o| o.terminal_payoff).collect();

        let std_terminal_payoff = if terminals.len() > 1 {
            Statistics::std_dev(&terminals)
        } else {
            0.0
        };

        ScenarioDistribution {
            paths: outcomes.len(),
            early_knock_out,
            maturity_no_event,
            knock_in_no_knock_out,
            knock_in_before_knock_out: outcomes
                .iter()
                .filter(|o| o.knock_in_preceded_knock_out)
                .count(),
            knock_out_probability: early_knock_out as f64 / outcomes.len() as f64,
            mean_knock_out_period: if knock_out_periods.is_empty() {
                None
            } else {
                Some(Statistics::mean(&knock_out_periods))
            },
            mean_terminal_payoff: Statistics::mean(&terminals),
            std_terminal_payoff,
            min_terminal_payoff: Statistics::min(&terminals),
            max_terminal_payoff: Statistics::max(&terminals),
        }
    }

    /// Share of paths ending in `kind`. Path classification never yields
    /// `KnockInThenKnockOut`, so its share is always zero.
    pub fn frequency(&self, kind: ScenarioKind) -> f64 {
        let count = match kind {
            ScenarioKind::EarlyKnockOut => self.early_knock_out,
            ScenarioKind::MaturityNoEvent => self.maturity_no_event,
            ScenarioKind::KnockInNoKnockOut => self.knock_in_no_knock_out,
            ScenarioKind::KnockInThenKnockOut => 0,
        };
        count as f64 / self.paths as f64
    }
}

/// Simulate `cfg.paths` GBM paths and summarise their scenarios.
///
/// # Errors
///
/// `InvalidConfiguration` when the run does not match the note's term or
/// accrual frequency, plus any generator validation error.
pub fn simulate_scenarios(
    cfg: &McScenarioConfig,
    terms: &ProductTerms,
) -> ScenarioResult<ScenarioDistribution> {
    cfg.validate(terms)?;
    let model = Gbm::new(cfg.path.annualized_drift, cfg.path.annualized_vol)?;
    let factory = RngFactory::new(cfg.path.seed);

    info!(
        paths = cfg.paths,
        term = terms.term(),
        seeded = factory.is_seeded(),
        "simulating scenario distribution"
    );

    let outcomes = (0..cfg.paths)
        .into_par_iter()
        .map(|i| {
            let mut rng = factory.create_std_rng(i as u64);
            let path = generate_path_with_rng(&model, &cfg.path, &mut rng)?;
            let evaluation = evaluate(&path, terms)?;
            Ok(PathOutcome {
                scenario: evaluation.scenario,
                terminal_payoff: evaluation.terminal_payoff,
                knock_in_preceded_knock_out: evaluation.knock_in_preceded_knock_out,
            })
        })
        .collect::<ScenarioResult<Vec<PathOutcome>>>()?;

    let distribution = ScenarioDistribution::from_outcomes(&outcomes);
    debug!(
        knock_out_probability = distribution.knock_out_probability,
        mean_terminal_payoff = distribution.mean_terminal_payoff,
        "scenario distribution complete"
    );
    Ok(distribution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn terms() -> ProductTerms {
        ProductTerms::builder().term(24).coupon_rate(5.0).build().unwrap()
    }

    #[test]
    fn test_counts_cover_every_path() {
        let cfg = McScenarioConfig {
            paths: 2_000,
            ..Default::default()
        };
        let dist = simulate_scenarios(&cfg, &terms()).unwrap();
        assert_eq!(
            dist.early_knock_out + dist.maturity_no_event + dist.knock_in_no_knock_out,
            2_000
        );
        assert!(dist.knock_in_before_knock_out <= dist.early_knock_out);
        let total: f64 = [
            ScenarioKind::EarlyKnockOut,
            ScenarioKind::MaturityNoEvent,
            ScenarioKind::KnockInNoKnockOut,
        ]
        .into_iter()
        .map(|kind| dist.frequency(kind))
        .sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);
        assert_eq!(dist.frequency(ScenarioKind::KnockInThenKnockOut), 0.0);
        assert!(dist.min_terminal_payoff <= dist.mean_terminal_payoff);
        assert!(dist.mean_terminal_payoff <= dist.max_terminal_payoff);
    }

    #[test]
    fn test_seeded_run_is_reproducible() {
        let cfg = McScenarioConfig {
            paths: 500,
            ..Default::default()
        };
        let a = simulate_scenarios(&cfg, &terms()).unwrap();
        let b = simulate_scenarios(&cfg, &terms()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_vol_flat_path_always_matures() {
        let cfg = McScenarioConfig {
            paths: 50,
            path: PathConfig {
                annualized_vol: 0.0,
                annualized_drift: 0.0,
                seed: None,
                ..Default::default()
            },
        };
        let dist = simulate_scenarios(&cfg, &terms()).unwrap();
        assert_eq!(dist.maturity_no_event, 50);
        assert_eq!(dist.mean_knock_out_period, None);
        assert_relative_eq!(dist.mean_terminal_payoff, 110.0, epsilon = 1e-9);
        assert_relative_eq!(dist.std_terminal_payoff, 0.0, epsilon = 1e-9);
        assert_relative_eq!(dist.frequency(ScenarioKind::MaturityNoEvent), 1.0);
        assert_relative_eq!(dist.frequency(ScenarioKind::EarlyKnockOut), 0.0);
    }

    #[test]
    fn test_strong_drift_knocks_out_first_period() {
        let cfg = McScenarioConfig {
            paths: 20,
            path: PathConfig {
                annualized_vol: 0.0,
                annualized_drift: 0.6,
                ..Default::default()
            },
        };
        let dist = simulate_scenarios(&cfg, &terms()).unwrap();
        assert_eq!(dist.early_knock_out, 20);
        assert_eq!(dist.mean_knock_out_period, Some(1.0));
        assert_relative_eq!(dist.knock_out_probability, 1.0);
    }

    #[test]
    fn test_term_mismatch_rejected() {
        let cfg = McScenarioConfig {
            path: PathConfig {
                term_periods: 12,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            simulate_scenarios(&cfg, &terms()),
            Err(ScenarioError::InvalidConfiguration { .. })
        ));
    }
}
