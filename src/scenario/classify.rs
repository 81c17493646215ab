// src/scenario/classify.rs
//! Termination Scenarios
//!
//! Path-derived classification, first match wins:
//! 1. knock-out at `t_ko ≥ 1`  → `EarlyKnockOut` (a prior knock-in is irrelevant)
//! 2. neither event            → `MaturityNoEvent`
//! 3. knock-in, no knock-out   → `KnockInNoKnockOut`
//!
//! `KnockInThenKnockOut` is never produced here; it only comes from what-if
//! construction (see [`crate::scenario::what_if`]).

use super::events::DetectedEvents;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "scenario", rename_all = "snake_case")]
pub enum Scenario {
    /// Knocked out before maturity; coupon locks at the knock-out period
    EarlyKnockOut { knock_out_period: usize },
    /// Neither barrier fired; full coupon at maturity
    MaturityNoEvent,
    /// Knocked in and never knocked out; principal follows the underlying
    KnockInNoKnockOut { knock_in_period: usize },
    /// What-if only: knocked in, then knocked out later
    KnockInThenKnockOut {
        knock_in_period: usize,
        knock_out_period: usize,
    },
}

/// Scenario without its event periods, for counting and lookups
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    EarlyKnockOut,
    MaturityNoEvent,
    KnockInNoKnockOut,
    KnockInThenKnockOut,
}

impl ScenarioKind {
    pub fn label(self) -> &'static str {
        match self {
            ScenarioKind::EarlyKnockOut => "early_knock_out",
            ScenarioKind::MaturityNoEvent => "maturity_no_event",
            ScenarioKind::KnockInNoKnockOut => "knock_in_no_knock_out",
            ScenarioKind::KnockInThenKnockOut => "knock_in_then_knock_out",
        }
    }
}

impl Scenario {
    pub fn kind(&self) -> ScenarioKind {
        match self {
            Scenario::EarlyKnockOut { .. } => ScenarioKind::EarlyKnockOut,
            Scenario::MaturityNoEvent => ScenarioKind::MaturityNoEvent,
            Scenario::KnockInNoKnockOut { .. } => ScenarioKind::KnockInNoKnockOut,
            Scenario::KnockInThenKnockOut { .. } => ScenarioKind::KnockInThenKnockOut,
        }
    }

    pub fn label(&self) -> &'static str {
        self.kind().label()
    }

    /// Period at which the note stops accruing, if it terminated early
    pub fn knock_out_period(&self) -> Option<usize> {
        match self {
            Scenario::EarlyKnockOut { knock_out_period }
            | Scenario::KnockInThenKnockOut {
                knock_out_period, ..
            } => Some(*knock_out_period),
            _ => None,
        }
    }
}

/// Classify detected events into exactly one scenario
pub fn classify(events: &DetectedEvents) -> Scenario {
    match (events.knock_out, events.knock_in) {
        (Some(ko), _) if ko.period >= 1 => Scenario::EarlyKnockOut {
            knock_out_period: ko.period,
        },
        (_, None) => Scenario::MaturityNoEvent,
        (_, Some(ki)) => Scenario::KnockInNoKnockOut {
            knock_in_period: ki.period,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::events::{BarrierEvent, EventKind};

    fn event(kind: EventKind, period: usize) -> Option<BarrierEvent> {
        Some(BarrierEvent {
            kind,
            period,
            price: 100.0,
        })
    }

    #[test]
    fn test_knock_out_wins_regardless_of_order() {
        let events = DetectedEvents {
            knock_in: event(EventKind::KnockIn, 2),
            knock_out: event(EventKind::KnockOut, 9),
        };
        assert_eq!(
            classify(&events),
            Scenario::EarlyKnockOut { knock_out_period: 9 }
        );
    }

    #[test]
    fn test_no_events_is_maturity() {
        assert_eq!(classify(&DetectedEvents::default()), Scenario::MaturityNoEvent);
    }

    #[test]
    fn test_knock_in_only() {
        let events = DetectedEvents {
            knock_in: event(EventKind::KnockIn, 10),
            knock_out: None,
        };
        assert_eq!(
            classify(&events),
            Scenario::KnockInNoKnockOut {
                knock_in_period: 10
            }
        );
    }

    #[test]
    fn test_labels_and_knock_out_period() {
        let scenario = Scenario::KnockInThenKnockOut {
            knock_in_period: 3,
            knock_out_period: 8,
        };
        assert_eq!(scenario.label(), "knock_in_then_knock_out");
        assert_eq!(scenario.kind(), ScenarioKind::KnockInThenKnockOut);
        assert_eq!(scenario.knock_out_period(), Some(8));
        assert_eq!(Scenario::MaturityNoEvent.knock_out_period(), None);
    }
}
