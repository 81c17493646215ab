// src/scenario/payoffs.rs
//! Snowball Payoff Functions
//!
//! # Mathematical Definitions
//!
//! Payoff marks are in percent of principal, one per period `t = 0..=T`.
//! With annual coupon `c` and `n` periods per year:
//!
//! ## Early knock-out at `t_ko`
//! - `100 + c·t/n` for `t < t_ko`
//! - `100 + c·t_ko/n` for `t ≥ t_ko` (accrual locks at knock-out)
//!
//! ## Maturity without events
//! - `100 + c·t/n`, reaching `100 + c·T/n` at maturity
//!
//! ## Knock-in without knock-out
//! - `100` for `t < T`
//! - `max(S_T, 0)` at maturity: principal follows the underlying 1:1
//!
//! ## Knock-in then knock-out
//! - Identical to early knock-out; the prior knock-in has no effect

use super::classify::Scenario;
use crate::product::ProductTerms;
use serde::Serialize;

/// Principal level every payoff starts from
pub const PRINCIPAL: f64 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PayoffPoint {
    pub period: usize,
    pub level: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PayoffSeries {
    points: Vec<PayoffPoint>,
}

impl PayoffSeries {
    fn from_levels<I: IntoIterator<Item = f64>>(levels: I) -> Self {
        PayoffSeries {
            points: levels
                .into_iter()
                .enumerate()
                .map(|(period, level)| PayoffPoint { period, level })
                .collect(),
        }
    }

    pub fn points(&self) -> &[PayoffPoint] {
        &self.points
    }

    pub fn levels(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.level).collect()
    }

    pub fn level_at(&self, period: usize) -> Option<f64> {
        self.points.get(period).map(|p| p.level)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Mark at the final period
    pub fn terminal(&self) -> f64 {
        self.points.last().map_or(PRINCIPAL, |p| p.level)
    }
}

/// Coupon accrues linearly and locks at `knock_out_period`.
pub fn knock_out_payoff(terms: &ProductTerms, knock_out_period: usize) -> PayoffSeries {
    PayoffSeries::from_levels(
        (0..=terms.term()).map(|t| PRINCIPAL + terms.accrued_coupon(t.min(knock_out_period))),
    )
}

/// Coupon accrues linearly to maturity.
pub fn maturity_payoff(terms: &ProductTerms) -> PayoffSeries {
    PayoffSeries::from_levels((0..=terms.term()).map(|t| PRINCIPAL + terms.accrued_coupon(t)))
}

/// Flat principal, then the final underlying level at maturity.
pub fn knock_in_payoff(terms: &ProductTerms, final_price: f64) -> PayoffSeries {
    let term = terms.term();
    PayoffSeries::from_levels((0..=term).map(|t| {
        if t == term {
            final_price.max(0.0)
        } else {
            PRINCIPAL
        }
    }))
}

/// Payoff series for a scenario.
///
/// `final_price` is only read by `KnockInNoKnockOut`.
pub fn payoff_series(scenario: &Scenario, terms: &ProductTerms, final_price: f64) -> PayoffSeries {
    match scenario {
        Scenario::EarlyKnockOut { knock_out_period }
        | Scenario::KnockInThenKnockOut {
            knock_out_period, ..
        } => knock_out_payoff(terms, *knock_out_period),
        Scenario::MaturityNoEvent => maturity_payoff(terms),
        Scenario::KnockInNoKnockOut { .. } => knock_in_payoff(terms, final_price),
    }
}
