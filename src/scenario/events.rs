// src/scenario/events.rs
//! Barrier Event Detection
//!
//! - **KnockOut**: first eligible period `t ≥ 1` with `S_t ≥ knock_out_barrier`
//! - **KnockIn**: first eligible period with `S_t ≤ knock_in_barrier`
//!
//! Eligible periods come from the terms' observation styles; the detection
//! rule is the same for every style. Later re-crossings are ignored.

use crate::paths::PricePath;
use crate::product::ProductTerms;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    KnockIn,
    KnockOut,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BarrierEvent {
    pub kind: EventKind,
    pub period: usize,
    pub price: f64,
}

/// First occurrence of each barrier event on one path
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DetectedEvents {
    pub knock_in: Option<BarrierEvent>,
    pub knock_out: Option<BarrierEvent>,
}

impl DetectedEvents {
    /// Events in chronological order; a same-period knock-in sorts first
    pub fn to_vec(&self) -> Vec<BarrierEvent> {
        let mut events: Vec<BarrierEvent> =
            self.knock_in.iter().chain(self.knock_out.iter()).copied().collect();
        events.sort_by_key(|e| e.period);
        events
    }

    /// True when a knock-in was observed strictly before the knock-out
    pub fn knock_in_precedes_knock_out(&self) -> bool {
        match (self.knock_in, self.knock_out) {
            (Some(ki), Some(ko)) => ki.period < ko.period,
            _ => false,
        }
    }
}

/// First eligible period whose price satisfies `crossed`
fn first_crossing<F>(path: &PricePath, eligible: &[usize], crossed: F) -> Option<(usize, f64)>
where
    F: Fn(f64) -> bool,
{
    eligible.iter().find_map(|&period| {
        path.price_at(period)
            .filter(|&price| crossed(price))
            .map(|price| (period, price))
    })
}

/// Detect the first knock-in and knock-out on a path.
///
/// The path is assumed to cover the terms' full life; the engine checks this
/// before calling.
pub fn detect_events(path: &PricePath, terms: &ProductTerms) -> DetectedEvents {
    let term = terms.term();

    let ko_eligible = terms.knock_out_observation().eligible_periods(term, 1);
    let ki_eligible = terms.knock_in_observation().eligible_periods(term, 0);

    let ko_barrier = terms.knock_out_barrier();
    let ki_barrier = terms.knock_in_barrier();

    let knock_out = first_crossing(path, &ko_eligible, |price| price >= ko_barrier).map(
        |(period, price)| BarrierEvent {
            kind: EventKind::KnockOut,
            period,
            price,
        },
    );
    let knock_in = first_crossing(path, &ki_eligible, |price| price <= ki_barrier).map(
        |(period, price)| BarrierEvent {
            kind: EventKind::KnockIn,
            period,
            price,
        },
    );

    DetectedEvents { knock_in, knock_out }
}
