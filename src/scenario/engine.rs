// src/scenario/engine.rs
//! Scenario Payoff Engine
//!
//! `evaluate` runs detection → classification → payoff on one path. It holds
//! no state: the same (path, terms) pair always yields the same result.

use super::classify::{classify, Scenario};
use super::events::{detect_events, BarrierEvent, DetectedEvents};
use super::narrative::describe;
use super::payoffs::{payoff_series, PayoffSeries, PRINCIPAL};
use super::state::{lifecycle, NoteState};
use crate::error::ScenarioResult;
use crate::paths::PricePath;
use crate::product::ProductTerms;
use serde::Serialize;
use tracing::debug;

/// Result of one analysis
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Evaluation {
    pub events: Vec<BarrierEvent>,
    pub scenario: Scenario,
    pub payoff: PayoffSeries,
    pub terminal_payoff: f64,
    pub narrative: String,
    /// Set when the path knocked in before knocking out. Path classification
    /// reports `EarlyKnockOut` here while the what-if selector would call the
    /// same history `KnockInThenKnockOut`.
    pub knock_in_preceded_knock_out: bool,
    /// Principal plus one year of coupon, the reference level for charts
    pub principal_plus_coupon: f64,
    pub states: Vec<NoteState>,
}

impl Evaluation {
    pub(crate) fn assemble(
        detected: DetectedEvents,
        scenario: Scenario,
        terms: &ProductTerms,
        final_price: f64,
    ) -> Self {
        let payoff = payoff_series(&scenario, terms, final_price);
        Evaluation {
            events: detected.to_vec(),
            scenario,
            terminal_payoff: payoff.terminal(),
            payoff,
            narrative: describe(&scenario),
            knock_in_preceded_knock_out: detected.knock_in_precedes_knock_out()
                && matches!(scenario, Scenario::EarlyKnockOut { .. }),
            principal_plus_coupon: PRINCIPAL + terms.coupon_rate(),
            states: lifecycle(&detected, terms.term()),
        }
    }
}

/// Evaluate a note against one price path.
///
/// # Errors
///
/// `InvalidPath` when the path does not span exactly `term + 1` periods.
pub fn evaluate(path: &PricePath, terms: &ProductTerms) -> ScenarioResult<Evaluation> {
    path.check_term(terms.term())?;

    let detected = detect_events(path, terms);
    let scenario = classify(&detected);

    if detected.knock_in_precedes_knock_out() {
        debug!(
            knock_in_period = detected.knock_in.map(|e| e.period),
            knock_out_period = detected.knock_out.map(|e| e.period),
            "knock-in preceded knock-out; path classification reports early knock-out"
        );
    }

    let evaluation = Evaluation::assemble(detected, scenario, terms, path.final_price());
    debug!(
        scenario = scenario.label(),
        terminal_payoff = evaluation.terminal_payoff,
        "evaluated path"
    );
    Ok(evaluation)
}
