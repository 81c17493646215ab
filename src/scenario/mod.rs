pub mod classify;
pub mod engine;
pub mod events;
pub mod narrative;
pub mod payoffs;
pub mod state;
pub mod what_if;

pub use classify::{classify, Scenario, ScenarioKind};
pub use engine::{evaluate, Evaluation};
pub use events::{detect_events, BarrierEvent, DetectedEvents, EventKind};
pub use payoffs::{PayoffPoint, PayoffSeries};
pub use state::{lifecycle, NoteState};
pub use what_if::{evaluate_what_if, WhatIf};
