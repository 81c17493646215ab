// src/product/observation.rs
//! Barrier Observation Styles
//!
//! An observation style decides WHICH periods of a path are eligible for
//! barrier detection. It never changes the detection rule itself, so a new
//! style only needs a new arm in [`ObservationStyle::eligible_periods`].
//!
//! | Style | Eligible periods |
//! |---|---|
//! | `Daily` | every period of the path |
//! | `Periodic` | the sampling periods, or every period when none are given |
//! | `Terminal` | the final period only |

use crate::error::{ScenarioError, ScenarioResult};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationStyle {
    /// Continuous observation; on a monthly path this is every period
    Daily,
    /// Discrete observation on the given periods
    Periodic { sampling: Option<Vec<usize>> },
    /// Observed at maturity only
    Terminal,
}

impl ObservationStyle {
    /// Build a style from its label and an optional sampling schedule.
    ///
    /// A sampling schedule is only meaningful for the periodic style.
    pub fn parse(label: &str, sampling: Option<Vec<usize>>) -> ScenarioResult<Self> {
        let style = label.parse::<ObservationStyle>()?;
        match (style, sampling) {
            (ObservationStyle::Periodic { .. }, sampling) => Ok(ObservationStyle::Periodic { sampling }),
            (style, None) => Ok(style),
            (style, Some(_)) => Err(ScenarioError::InvalidTerms {
                field: "sampling".to_string(),
                reason: format!("only applies to periodic observation, not {}", style),
            }),
        }
    }

    /// Periods in `first..=term` at which a barrier may be observed, ascending.
    pub fn eligible_periods(&self, term: usize, first: usize) -> Vec<usize> {
        match self {
            ObservationStyle::Daily | ObservationStyle::Periodic { sampling: None } => {
                (first..=term).collect()
            }
            ObservationStyle::Terminal => {
                if term >= first {
                    vec![term]
                } else {
                    Vec::new()
                }
            }
            ObservationStyle::Periodic {
                sampling: Some(periods),
            } => {
                let mut eligible: Vec<usize> = periods
                    .iter()
                    .copied()
                    .filter(|&p| p >= first && p <= term)
                    .collect();
                eligible.sort_unstable();
                eligible.dedup();
                eligible
            }
        }
    }

    pub(crate) fn validate(&self, field: &str, term: usize) -> ScenarioResult<()> {
        if let ObservationStyle::Periodic {
            sampling: Some(periods),
        } = self
        {
            if periods.is_empty() {
                return Err(ScenarioError::InvalidTerms {
                    field: field.to_string(),
                    reason: "sampling schedule is empty".to_string(),
                });
            }
            if let Some(&p) = periods.iter().find(|&&p| p > term) {
                return Err(ScenarioError::InvalidTerms {
                    field: field.to_string(),
                    reason: format!("sampling period {} lies beyond the term ({})", p, term),
                });
            }
        }
        Ok(())
    }
}

impl Default for ObservationStyle {
    fn default() -> Self {
        ObservationStyle::Daily
    }
}

impl FromStr for ObservationStyle {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "continuous" | "每日观察" => Ok(ObservationStyle::Daily),
            "periodic" | "discrete" | "monthly" => Ok(ObservationStyle::Periodic { sampling: None }),
            "terminal" | "terminal-only" | "maturity" | "到期观察" => Ok(ObservationStyle::Terminal),
            _ => Err(ScenarioError::UnsupportedObservationStyle {
                style: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ObservationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObservationStyle::Daily => write!(f, "daily"),
            ObservationStyle::Periodic { sampling: None } => write!(f, "periodic"),
            ObservationStyle::Periodic {
                sampling: Some(periods),
            } => write!(f, "periodic {:?}", periods),
            ObservationStyle::Terminal => write!(f, "terminal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_covers_every_period() {
        assert_eq!(ObservationStyle::Daily.eligible_periods(4, 0), vec![0, 1, 2, 3, 4]);
        assert_eq!(ObservationStyle::Daily.eligible_periods(4, 1), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_terminal_covers_last_period_only() {
        assert_eq!(ObservationStyle::Terminal.eligible_periods(24, 0), vec![24]);
    }

    #[test]
    fn test_periodic_defaults_to_every_period() {
        let style = ObservationStyle::Periodic { sampling: None };
        assert_eq!(style.eligible_periods(3, 1), vec![1, 2, 3]);
    }

    #[test]
    fn test_periodic_sampling_is_sorted_and_clipped() {
        let style = ObservationStyle::Periodic {
            sampling: Some(vec![12, 3, 0, 6, 3]),
        };
        assert_eq!(style.eligible_periods(12, 1), vec![3, 6, 12]);
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("Daily".parse::<ObservationStyle>().unwrap(), ObservationStyle::Daily);
        assert_eq!("到期观察".parse::<ObservationStyle>().unwrap(), ObservationStyle::Terminal);
        assert!(matches!(
            "weekly".parse::<ObservationStyle>(),
            Err(ScenarioError::UnsupportedObservationStyle { .. })
        ));
    }

    #[test]
    fn test_sampling_rejected_for_non_periodic() {
        assert!(ObservationStyle::parse("daily", Some(vec![1])).is_err());
        assert_eq!(
            ObservationStyle::parse("periodic", Some(vec![3, 6])).unwrap(),
            ObservationStyle::Periodic {
                sampling: Some(vec![3, 6])
            }
        );
    }

    #[test]
    fn test_validate_sampling_beyond_term() {
        let style = ObservationStyle::Periodic {
            sampling: Some(vec![6, 30]),
        };
        assert!(style.validate("knock_in_observation", 24).is_err());
        assert!(style.validate("knock_in_observation", 30).is_ok());
    }
}
