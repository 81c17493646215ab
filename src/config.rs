// src/config.rs
//! Analysis Configuration
//!
//! An analysis is described by a TOML file with a `[terms]` table (the note)
//! and a `[simulation]` table (the GBM run). Every key is optional; missing
//! keys take the standard 24-month Snowball defaults.
//!
//! ```toml
//! [terms]
//! term = "24M"
//! knock_out_barrier = 105.0
//! knock_in_barrier = 70.0
//! knock_in_observation = "daily"
//! coupon_rate = 5.0
//!
//! [simulation]
//! annualized_vol = 0.2
//! seed = 42
//! paths = 10000
//! ```

use crate::error::{ScenarioError, ScenarioResult};
use crate::mc::McScenarioConfig;
use crate::paths::PathConfig;
use crate::product::{parse_term, ObservationStyle, ProductTerms};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Term given either as whole periods or as a label like `"24M"`
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TermInput {
    Periods(usize),
    Label(String),
}

impl TermInput {
    pub fn periods(&self) -> ScenarioResult<usize> {
        match self {
            TermInput::Periods(periods) => parse_term(&periods.to_string()),
            TermInput::Label(label) => parse_term(label),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TermsConfig {
    pub term: TermInput,
    pub knock_out_barrier: f64,
    pub knock_in_barrier: f64,
    pub participation_rate: f64,
    pub coupon_rate: f64,
    pub margin_ratio: f64,
    pub max_loss_ratio: f64,
    pub knock_in_observation: String,
    pub knock_in_sampling: Option<Vec<usize>>,
    pub knock_out_observation: String,
    pub knock_out_sampling: Option<Vec<usize>>,
    pub periods_per_year: usize,
}

impl Default for TermsConfig {
    fn default() -> Self {
        TermsConfig {
            term: TermInput::Label("24M".to_string()),
            knock_out_barrier: 105.0,
            knock_in_barrier: 70.0,
            participation_rate: 100.0,
            coupon_rate: 5.0,
            margin_ratio: 100.0,
            max_loss_ratio: 100.0,
            knock_in_observation: "daily".to_string(),
            knock_in_sampling: None,
            knock_out_observation: "daily".to_string(),
            knock_out_sampling: None,
            periods_per_year: 12,
        }
    }
}

impl TermsConfig {
    /// Validate into immutable product terms
    pub fn to_terms(&self) -> ScenarioResult<ProductTerms> {
        ProductTerms::builder()
            .term(self.term.periods()?)
            .knock_out_barrier(self.knock_out_barrier)
            .knock_in_barrier(self.knock_in_barrier)
            .participation_rate(self.participation_rate)
            .coupon_rate(self.coupon_rate)
            .margin_ratio(self.margin_ratio)
            .max_loss_ratio(self.max_loss_ratio)
            .knock_in_observation(ObservationStyle::parse(
                &self.knock_in_observation,
                self.knock_in_sampling.clone(),
            )?)
            .knock_out_observation(ObservationStyle::parse(
                &self.knock_out_observation,
                self.knock_out_sampling.clone(),
            )?)
            .periods_per_year(self.periods_per_year)
            .build()
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub annualized_drift: f64,
    pub annualized_vol: f64,
    pub seed: Option<u64>,
    pub paths: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            annualized_drift: 0.0,
            annualized_vol: 0.2,
            seed: None,
            paths: 10_000,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub terms: TermsConfig,
    pub simulation: SimulationConfig,
}

impl AnalysisConfig {
    pub fn from_toml_str(contents: &str) -> ScenarioResult<Self> {
        toml::from_str(contents).map_err(|e| ScenarioError::InvalidConfiguration {
            field: "toml".to_string(),
            reason: e.to_string(),
        })
    }

    /// Read a config file; a missing file falls back to defaults when `optional`
    pub fn load<P: AsRef<Path>>(path: P, optional: bool) -> ScenarioResult<Self> {
        let path = path.as_ref();
        if optional && !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let contents =
            std::fs::read_to_string(path).map_err(|e| ScenarioError::InvalidConfiguration {
                field: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Self::from_toml_str(&contents)
    }

    pub fn product_terms(&self) -> ScenarioResult<ProductTerms> {
        self.terms.to_terms()
    }

    /// Single-path generator settings aligned with `terms`
    pub fn path_config(&self, terms: &ProductTerms) -> PathConfig {
        PathConfig {
            term_periods: terms.term(),
            annualized_drift: self.simulation.annualized_drift,
            annualized_vol: self.simulation.annualized_vol,
            periods_per_year: terms.periods_per_year(),
            seed: self.simulation.seed,
        }
    }

    pub fn mc_config(&self, terms: &ProductTerms) -> McScenarioConfig {
        McScenarioConfig {
            paths: self.simulation.paths,
            path: self.path_config(terms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AnalysisConfig::from_toml_str("").unwrap();
        let terms = config.product_terms().unwrap();
        assert_eq!(terms, ProductTerms::builder().build().unwrap());
        assert_eq!(config.simulation.seed, None);
    }

    #[test]
    fn test_full_config() {
        let config = AnalysisConfig::from_toml_str(
            r#"
            [terms]
            term = 12
            knock_out_barrier = 103.0
            knock_in_barrier = 75.0
            coupon_rate = 8.0
            knock_in_observation = "periodic"
            knock_in_sampling = [3, 6, 9, 12]

            [simulation]
            annualized_drift = 0.02
            annualized_vol = 0.25
            seed = 7
            paths = 500
            "#,
        )
        .unwrap();
        let terms = config.product_terms().unwrap();
        assert_eq!(terms.term(), 12);
        assert_eq!(terms.coupon_rate(), 8.0);
        assert_eq!(
            terms.knock_in_observation(),
            &ObservationStyle::Periodic {
                sampling: Some(vec![3, 6, 9, 12])
            }
        );
        let mc = config.mc_config(&terms);
        assert_eq!(mc.paths, 500);
        assert_eq!(mc.path.term_periods, 12);
        assert_eq!(mc.path.seed, Some(7));
    }

    #[test]
    fn test_term_label() {
        let config = AnalysisConfig::from_toml_str("[terms]\nterm = \"3Y\"\n").unwrap();
        assert_eq!(config.product_terms().unwrap().term(), 36);
    }

    #[test]
    fn test_invalid_values_surface_as_errors() {
        let bad_style = AnalysisConfig::from_toml_str("[terms]\nknock_in_observation = \"hourly\"\n")
            .unwrap();
        assert!(matches!(
            bad_style.product_terms(),
            Err(ScenarioError::UnsupportedObservationStyle { .. })
        ));

        let bad_barriers =
            AnalysisConfig::from_toml_str("[terms]\nknock_in_barrier = 120.0\n").unwrap();
        assert!(matches!(
            bad_barriers.product_terms(),
            Err(ScenarioError::InvalidTerms { .. })
        ));

        assert!(AnalysisConfig::from_toml_str("[terms]\nstrike = 1.0\n").is_err());
    }

    #[test]
    fn test_missing_optional_file_uses_defaults() {
        let config = AnalysisConfig::load("does-not-exist.toml", true).unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert!(AnalysisConfig::load("does-not-exist.toml", false).is_err());
    }
}
