// src/error.rs
use thiserror::Error;

/// Error types for the snowball-sde library
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioError {
    /// Product terms violate barrier ordering, term bounds or ratio limits
    #[error("Invalid product terms: '{field}' {reason}")]
    InvalidTerms { field: String, reason: String },

    /// Price path does not line up with the note's periods
    #[error("Invalid price path: {reason}")]
    InvalidPath { reason: String },

    /// Observation style label not recognised
    #[error("Unsupported observation style '{style}' (expected daily, periodic or terminal)")]
    UnsupportedObservationStyle { style: String },

    /// Invalid simulation parameter values
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// What-if event timings outside the note's life
    #[error("Invalid what-if scenario: {reason}")]
    InvalidScenario { reason: String },

    /// Configuration file could not be read or parsed
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },
}

/// Result type alias for snowball-sde operations
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// Validation utilities
pub mod validation {
    use super::{ScenarioError, ScenarioResult};

    /// Validate that a simulation parameter is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> ScenarioResult<()> {
        if !value.is_finite() {
            Err(ScenarioError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a simulation parameter is finite and non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> ScenarioResult<()> {
        validate_finite(name, value)?;
        if value < 0.0 {
            Err(ScenarioError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate a percentage term field against its input bounds
    pub fn validate_percentage(name: &str, value: f64, max: f64) -> ScenarioResult<()> {
        if !value.is_finite() || value < 0.0 || value > max {
            Err(ScenarioError::InvalidTerms {
                field: name.to_string(),
                reason: format!("= {} must be in range [0, {}]", value, max),
            })
        } else {
            Ok(())
        }
    }

    /// Validate the note's term in periods
    pub fn validate_term(term: usize) -> ScenarioResult<()> {
        if term == 0 {
            Err(ScenarioError::InvalidTerms {
                field: "term".to_string(),
                reason: "must be at least one period".to_string(),
            })
        } else if term > 1_200 {
            Err(ScenarioError::InvalidTerms {
                field: "term".to_string(),
                reason: "exceeds maximum allowed (1,200 periods)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate the number of simulated paths
    pub fn validate_paths(paths: usize) -> ScenarioResult<()> {
        if paths == 0 {
            Err(ScenarioError::InvalidConfiguration {
                field: "paths".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if paths > 100_000_000 {
            Err(ScenarioError::InvalidConfiguration {
                field: "paths".to_string(),
                reason: "exceeds maximum allowed (100 million)".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;

    #[test]
    fn test_validate_percentage() {
        assert!(validate_percentage("coupon_rate", 5.0, 100.0).is_ok());
        assert!(validate_percentage("coupon_rate", 0.0, 100.0).is_ok());
        assert!(validate_percentage("coupon_rate", 100.0, 100.0).is_ok());
        assert!(validate_percentage("coupon_rate", -0.1, 100.0).is_err());
        assert!(validate_percentage("coupon_rate", 100.1, 100.0).is_err());
        assert!(validate_percentage("coupon_rate", f64::NAN, 100.0).is_err());
    }

    #[test]
    fn test_validate_term() {
        assert!(validate_term(1).is_ok());
        assert!(validate_term(24).is_ok());
        assert!(matches!(
            validate_term(0),
            Err(ScenarioError::InvalidTerms { .. })
        ));
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("vol", 0.0).is_ok());
        assert!(validate_non_negative("vol", 0.2).is_ok());
        assert!(validate_non_negative("vol", -0.2).is_err());
        assert!(validate_non_negative("vol", f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_display() {
        let error = ScenarioError::InvalidParameters {
            parameter: "annualized_vol".to_string(),
            value: -0.1,
            constraint: "must be non-negative".to_string(),
        };

        let display = format!("{}", error);
        assert!(display.contains("annualized_vol"));
        assert!(display.contains("-0.1"));
        assert!(display.contains("non-negative"));
    }

    #[test]
    fn test_observation_style_error_display() {
        let error = ScenarioError::UnsupportedObservationStyle {
            style: "weekly".to_string(),
        };
        assert!(error.to_string().contains("weekly"));
    }
}
