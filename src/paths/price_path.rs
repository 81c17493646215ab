// src/paths/price_path.rs
//! Discrete price trajectories
//!
//! A path holds one price per period, from inception (period 0, normalised to
//! 100) to maturity. Period indices are contiguous and strictly increasing.

use crate::error::{ScenarioError, ScenarioResult};
use serde::Serialize;

/// Normalised price of the underlying at inception
pub const INITIAL_PRICE: f64 = 100.0;

const INITIAL_PRICE_TOLERANCE: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PathPoint {
    pub period: usize,
    pub price: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PricePath {
    points: Vec<PathPoint>,
}

impl PricePath {
    /// Build a path from explicit (period, price) points.
    ///
    /// # Errors
    ///
    /// `InvalidPath` when periods do not run 0, 1, 2, ... without gaps, when
    /// any price is non-finite or non-positive, or when the inception price is
    /// not 100.
    pub fn new(points: Vec<PathPoint>) -> ScenarioResult<Self> {
        if points.len() < 2 {
            return Err(ScenarioError::InvalidPath {
                reason: format!(
                    "needs an inception price and at least one period, got {} point(s)",
                    points.len()
                ),
            });
        }

        for (expected, point) in points.iter().enumerate() {
            if point.period != expected {
                return Err(ScenarioError::InvalidPath {
                    reason: format!(
                        "period indices must run 0, 1, 2, ... without gaps; found {} at position {}",
                        point.period, expected
                    ),
                });
            }
            if !point.price.is_finite() || point.price <= 0.0 {
                return Err(ScenarioError::InvalidPath {
                    reason: format!(
                        "price at period {} must be finite and positive, got {}",
                        point.period, point.price
                    ),
                });
            }
        }

        if (points[0].price - INITIAL_PRICE).abs() > INITIAL_PRICE_TOLERANCE {
            return Err(ScenarioError::InvalidPath {
                reason: format!(
                    "inception price must be normalised to {}, got {}",
                    INITIAL_PRICE, points[0].price
                ),
            });
        }

        Ok(PricePath { points })
    }

    /// Build a path from prices indexed by period, starting at inception.
    pub fn from_prices(prices: Vec<f64>) -> ScenarioResult<Self> {
        Self::new(
            prices
                .into_iter()
                .enumerate()
                .map(|(period, price)| PathPoint { period, price })
                .collect(),
        )
    }

    /// Normalise an observed close series so its first close maps to 100.
    pub fn from_observed(closes: &[f64]) -> ScenarioResult<Self> {
        let first = match closes.first() {
            Some(&first) if first.is_finite() && first > 0.0 => first,
            Some(&first) => {
                return Err(ScenarioError::InvalidPath {
                    reason: format!("first observed close must be finite and positive, got {}", first),
                })
            }
            None => {
                return Err(ScenarioError::InvalidPath {
                    reason: "observed close series is empty".to_string(),
                })
            }
        };

        Self::from_prices(
            closes
                .iter()
                .map(|close| close / first * INITIAL_PRICE)
                .collect(),
        )
    }

    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn price_at(&self, period: usize) -> Option<f64> {
        self.points.get(period).map(|p| p.price)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Last period index of the path
    pub fn last_period(&self) -> usize {
        self.points.len() - 1
    }

    pub fn final_price(&self) -> f64 {
        self.points[self.points.len() - 1].price
    }

    /// Check that the path covers exactly `term + 1` periods.
    pub fn check_term(&self, term: usize) -> ScenarioResult<()> {
        if self.points.len() != term + 1 {
            return Err(ScenarioError::InvalidPath {
                reason: format!(
                    "path has {} periods but the note's term needs {} (term + 1)",
                    self.points.len(),
                    term + 1
                ),
            });
        }
        Ok(())
    }
}
