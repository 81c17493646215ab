// src/scenario/state.rs
//! Note Lifecycle
//!
//! ```text
//! Running ──knock-in──▶ KnockedIn
//! Running | KnockedIn ──knock-out──▶ KnockedOut   (absorbing)
//! Running | KnockedIn ──period = term──▶ Matured  (absorbing)
//! ```

use super::events::DetectedEvents;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteState {
    Running,
    KnockedIn,
    KnockedOut,
    Matured,
}

impl NoteState {
    pub fn is_terminal(self) -> bool {
        matches!(self, NoteState::KnockedOut | NoteState::Matured)
    }

    /// Apply the observations made at `period`
    pub fn advance(self, period: usize, term: usize, knock_in: bool, knock_out: bool) -> Self {
        if self.is_terminal() {
            return self;
        }
        if knock_out && period >= 1 {
            return NoteState::KnockedOut;
        }
        let next = if knock_in { NoteState::KnockedIn } else { self };
        if period >= term {
            NoteState::Matured
        } else {
            next
        }
    }
}

/// State of the note at the end of each period `0..=term`
pub fn lifecycle(events: &DetectedEvents, term: usize) -> Vec<NoteState> {
    let ki_period = events.knock_in.map(|e| e.period);
    let ko_period = events.knock_out.map(|e| e.period);

    let mut state = NoteState::Running;
    (0..=term)
        .map(|period| {
            state = state.advance(
                period,
                term,
                ki_period == Some(period),
                ko_period == Some(period),
            );
            state
        })
        .collect()
}
