// src/scenario/what_if.rs
//! What-If Scenario Construction
//!
//! Builds a payoff from caller-chosen event timings instead of a simulated
//! path. This is the only way to obtain `KnockInThenKnockOut`: on a real
//! path the same history classifies as `EarlyKnockOut` (the evaluation's
//! `knock_in_preceded_knock_out` flag marks that case).
//!
//! Timing bounds, for a term of `T` periods:
//! - knock-out period in `[1, T-1]`
//! - knock-in period in `[1, T-1]`, strictly before any knock-out period
//! - final price in `[0, knock_in_barrier]`
//!
//! Synthetic events report the barrier level as their price.

use super::classify::Scenario;
use super::engine::Evaluation;
use super::events::{BarrierEvent, DetectedEvents, EventKind};
use crate::error::{ScenarioError, ScenarioResult};
use crate::product::ProductTerms;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scenario", rename_all = "snake_case")]
pub enum WhatIf {
    EarlyKnockOut {
        knock_out_period: usize,
    },
    MaturityNoEvent,
    KnockInNoKnockOut {
        knock_in_period: usize,
        final_price: f64,
    },
    KnockInThenKnockOut {
        knock_in_period: usize,
        knock_out_period: usize,
    },
}

impl WhatIf {
    /// Default timings for a term: knock-out at mid-life, knock-in at a
    /// quarter, final price at 90% of the knock-in barrier.
    pub fn defaults_for(label: &str, terms: &ProductTerms) -> ScenarioResult<Self> {
        let term = terms.term();
        match label.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "early_knock_out" => Ok(WhatIf::EarlyKnockOut {
                knock_out_period: term / 2,
            }),
            "maturity_no_event" => Ok(WhatIf::MaturityNoEvent),
            "knock_in_no_knock_out" => Ok(WhatIf::KnockInNoKnockOut {
                knock_in_period: term / 4,
                final_price: terms.knock_in_barrier() * 0.9,
            }),
            "knock_in_then_knock_out" => Ok(WhatIf::KnockInThenKnockOut {
                knock_in_period: term / 4,
                knock_out_period: term / 2,
            }),
            _ => Err(ScenarioError::InvalidScenario {
                reason: format!(
                    "unknown scenario '{}' (expected early_knock_out, maturity_no_event, \
                     knock_in_no_knock_out or knock_in_then_knock_out)",
                    label
                ),
            }),
        }
    }

    /// Check the timings against the note's life
    pub fn validate(&self, terms: &ProductTerms) -> ScenarioResult<()> {
        let last_interim = terms.term().saturating_sub(1);
        let check_period = |name: &str, period: usize, min: usize| -> ScenarioResult<()> {
            if period < min || period > last_interim {
                Err(ScenarioError::InvalidScenario {
                    reason: format!(
                        "{} = {} must be in [{}, {}]",
                        name, period, min, last_interim
                    ),
                })
            } else {
                Ok(())
            }
        };

        match *self {
            WhatIf::EarlyKnockOut { knock_out_period } => {
                check_period("knock_out_period", knock_out_period, 1)
            }
            WhatIf::MaturityNoEvent => Ok(()),
            WhatIf::KnockInNoKnockOut {
                knock_in_period,
                final_price,
            } => {
                check_period("knock_in_period", knock_in_period, 1)?;
                let ki = terms.knock_in_barrier();
                if !final_price.is_finite() || final_price < 0.0 || final_price > ki {
                    Err(ScenarioError::InvalidScenario {
                        reason: format!("final_price = {} must be in [0, {}]", final_price, ki),
                    })
                } else {
                    Ok(())
                }
            }
            WhatIf::KnockInThenKnockOut {
                knock_in_period,
                knock_out_period,
            } => {
                check_period("knock_in_period", knock_in_period, 1)?;
                check_period("knock_out_period", knock_out_period, knock_in_period + 1)
            }
        }
    }

    fn scenario(&self) -> Scenario {
        match *self {
            WhatIf::EarlyKnockOut { knock_out_period } => Scenario::EarlyKnockOut { knock_out_period },
            WhatIf::MaturityNoEvent => Scenario::MaturityNoEvent,
            WhatIf::KnockInNoKnockOut {
                knock_in_period, ..
            } => Scenario::KnockInNoKnockOut { knock_in_period },
            WhatIf::KnockInThenKnockOut {
                knock_in_period,
                knock_out_period,
            } => Scenario::KnockInThenKnockOut {
                knock_in_period,
                knock_out_period,
            },
        }
    }

    fn synthetic_events(&self, terms: &ProductTerms) -> DetectedEvents {
        let knock_out = |period| BarrierEvent {
            kind: EventKind::KnockOut,
            period,
            price: terms.knock_out_barrier(),
        };
        let knock_in = |period| BarrierEvent {
            kind: EventKind::KnockIn,
            period,
            price: terms.knock_in_barrier(),
        };
        match *self {
            WhatIf::EarlyKnockOut { knock_out_period } => DetectedEvents {
                knock_in: None,
                knock_out: Some(knock_out(knock_out_period)),
            },
            WhatIf::MaturityNoEvent => DetectedEvents::default(),
            WhatIf::KnockInNoKnockOut {
                knock_in_period, ..
            } => DetectedEvents {
                knock_in: Some(knock_in(knock_in_period)),
                knock_out: None,
            },
            WhatIf::KnockInThenKnockOut {
                knock_in_period,
                knock_out_period,
            } => DetectedEvents {
                knock_in: Some(knock_in(knock_in_period)),
                knock_out: Some(knock_out(knock_out_period)),
            },
        }
    }
}

/// Build the payoff for a what-if scenario without a simulated path.
///
/// # Errors
///
/// `InvalidScenario` when the timings fall outside the bounds above.
pub fn evaluate_what_if(terms: &ProductTerms, what_if: &WhatIf) -> ScenarioResult<Evaluation> {
    what_if.validate(terms)?;

    let final_price = match *what_if {
        WhatIf::KnockInNoKnockOut { final_price, .. } => final_price,
        _ => terms.knock_in_barrier(),
    };
    let scenario = what_if.scenario();
    let evaluation = Evaluation::assemble(what_if.synthetic_events(terms), scenario, terms, final_price);

    debug!(
        scenario = scenario.label(),
        terminal_payoff = evaluation.terminal_payoff,
        "evaluated what-if scenario"
    );
    Ok(evaluation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::state::NoteState;
    use approx::assert_relative_eq;

    fn terms() -> ProductTerms {
        ProductTerms::builder().term(24).coupon_rate(5.0).build().unwrap()
    }

    #[test]
    fn test_knock_in_then_knock_out() {
        let result = evaluate_what_if(
            &terms(),
            &WhatIf::KnockInThenKnockOut {
                knock_in_period: 6,
                knock_out_period: 12,
            },
        )
        .unwrap();
        assert_eq!(
            result.scenario,
            Scenario::KnockInThenKnockOut {
                knock_in_period: 6,
                knock_out_period: 12
            }
        );
        assert_relative_eq!(result.terminal_payoff, 105.0, epsilon = 1e-12);
        assert_eq!(result.events.len(), 2);
        assert!(!result.knock_in_preceded_knock_out);
    }

    #[test]
    fn test_knock_in_no_knock_out_uses_final_price() {
        let what_if = WhatIf::KnockInNoKnockOut {
            knock_in_period: 6,
            final_price: 63.0,
        };
        let result = evaluate_what_if(&terms(), &what_if).unwrap();
        assert_eq!(result.terminal_payoff, 63.0);
        assert_eq!(result.scenario, Scenario::KnockInNoKnockOut { knock_in_period: 6 });
        assert_eq!(result.events.len(), 1);
        assert_eq!(result.events[0].kind, EventKind::KnockIn);
        assert_eq!(result.events[0].period, 6);
    }

    #[test]
    fn test_knock_in_no_knock_out_reaches_knocked_in_state() {
        let terms = terms();
        let what_if = WhatIf::defaults_for("knock_in_no_knock_out", &terms).unwrap();
        let result = evaluate_what_if(&terms, &what_if).unwrap();
        assert_eq!(result.states[5], NoteState::Running);
        assert_eq!(result.states[6], NoteState::KnockedIn);
        assert!(result.states[6..24].iter().all(|&s| s == NoteState::KnockedIn));
        assert_eq!(result.states[24], NoteState::Matured);
    }

    #[test]
    fn test_timing_bounds() {
        let terms = terms();
        assert!(WhatIf::EarlyKnockOut { knock_out_period: 0 }.validate(&terms).is_err());
        assert!(WhatIf::EarlyKnockOut { knock_out_period: 24 }.validate(&terms).is_err());
        assert!(WhatIf::EarlyKnockOut { knock_out_period: 23 }.validate(&terms).is_ok());
        assert!(WhatIf::KnockInThenKnockOut {
            knock_in_period: 8,
            knock_out_period: 8
        }
        .validate(&terms)
        .is_err());
        let knock_in = |knock_in_period, final_price| WhatIf::KnockInNoKnockOut {
            knock_in_period,
            final_price,
        };
        assert!(knock_in(6, 75.0).validate(&terms).is_err());
        assert!(knock_in(6, -1.0).validate(&terms).is_err());
        assert!(knock_in(0, 60.0).validate(&terms).is_err());
        assert!(knock_in(24, 60.0).validate(&terms).is_err());
        assert!(knock_in(23, 60.0).validate(&terms).is_ok());
    }

    #[test]
    fn test_defaults_for_labels() {
        let terms = terms();
        assert_eq!(
            WhatIf::defaults_for("early-knock-out", &terms).unwrap(),
            WhatIf::EarlyKnockOut { knock_out_period: 12 }
        );
        assert_eq!(
            WhatIf::defaults_for("knock_in_then_knock_out", &terms).unwrap(),
            WhatIf::KnockInThenKnockOut {
                knock_in_period: 6,
                knock_out_period: 12
            }
        );
        assert!(WhatIf::defaults_for("sideways", &terms).is_err());
    }
}
