//! # snowball-sde: Scenario Analysis for Snowball Notes
//!
//! A Rust library that simulates an underlying price path, detects knock-in and
//! knock-out events against it, and computes the payoff of an autocallable
//! "Snowball" note under each termination scenario.
//!
//! ## Key Features
//!
//! - **Path Generation**: Seeded or entropy-seeded GBM paths on a monthly grid
//! - **Barrier Detection**: First knock-in / knock-out under daily, periodic or terminal observation
//! - **Scenario Payoffs**: One payoff function per termination scenario
//! - **What-If Analysis**: Payoffs from chosen event timings, no path required
//! - **Scenario Distribution**: Parallel Monte Carlo over many paths with Rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use snowball_sde::paths::generate_path;
//! use snowball_sde::product::ProductTerms;
//! use snowball_sde::scenario::evaluate;
//!
//! // 24-month note, KO 105%, KI 70%, 5% p.a. coupon
//! let terms = ProductTerms::builder()
//!     .term(24)
//!     .knock_out_barrier(105.0)
//!     .knock_in_barrier(70.0)
//!     .coupon_rate(5.0)
//!     .build()
//!     .expect("Valid terms");
//!
//! let path = generate_path(terms.term(), 0.0, 0.2, 12, Some(42)).expect("Valid simulation");
//! let result = evaluate(&path, &terms).expect("Path covers the term");
//! println!("{} -> {:.2}%", result.narrative, result.terminal_payoff);
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod math_utils;
pub mod mc;
pub mod models;
pub mod output;
pub mod paths;
pub mod product;
pub mod rng;
pub mod scenario;

// Re-export commonly used types for convenience
pub use error::{ScenarioError, ScenarioResult};
