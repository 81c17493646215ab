// src/models/gbm.rs
//! Geometric Brownian Motion
//!
//! ```text
//! dS_t = μ S_t dt + σ S_t dW_t
//! S_{t+dt} = S_t * exp((μ - σ²/2)dt + σ√dt * Z),  Z ~ N(0,1)
//! ```
//!
//! The log-return over one step is therefore normal with mean
//! `(μ - σ²/2)dt` and standard deviation `σ√dt`.

use super::model::PriceModel;
use crate::error::{validation::*, ScenarioResult};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gbm {
    pub mu: f64,
    pub sigma: f64,
}

impl Gbm {
    pub fn new(mu: f64, sigma: f64) -> ScenarioResult<Self> {
        validate_finite("annualized_drift", mu)?;
        validate_non_negative("annualized_vol", sigma)?;
        Ok(Gbm { mu, sigma })
    }

    /// Mean of the one-step log-return
    pub fn log_drift(&self, dt: f64) -> f64 {
        (self.mu - 0.5 * self.sigma * self.sigma) * dt
    }
}

impl PriceModel for Gbm {
    fn exact_step(&self, s_t: f64, dt: f64, normal_draw: f64) -> f64 {
        s_t * (self.log_drift(dt) + self.sigma * dt.sqrt() * normal_draw).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_vol_step_is_deterministic_drift() {
        let gbm = Gbm::new(0.06, 0.0).unwrap();
        let next = gbm.exact_step(100.0, 1.0 / 12.0, 1.7);
        assert_relative_eq!(next, 100.0 * (0.06_f64 / 12.0).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_log_drift_includes_ito_correction() {
        let gbm = Gbm::new(0.0, 0.2).unwrap();
        assert_relative_eq!(gbm.log_drift(1.0), -0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(Gbm::new(f64::NAN, 0.2).is_err());
        assert!(Gbm::new(0.0, -0.2).is_err());
    }
}
