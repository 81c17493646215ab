// src/product/terms.rs
//! Snowball Note Terms
//!
//! All percentages are quoted as percent of the initial price or principal
//! (`105.0` means 105%). The coupon rate is per annum and accrues pro-rata
//! per elapsed period, with `periods_per_year` periods in a year.

use super::observation::ObservationStyle;
use crate::error::{validation::*, ScenarioError, ScenarioResult};
use serde::Serialize;
use tracing::warn;

/// Upper bound for barrier levels, in percent of the initial price
pub const MAX_BARRIER: f64 = 200.0;
/// Upper bound for the participation rate, in percent
pub const MAX_PARTICIPATION: f64 = 500.0;
/// Upper bound for coupon, margin and max-loss ratios, in percent
pub const MAX_RATIO: f64 = 100.0;

/// Immutable parameters of one Snowball note
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductTerms {
    term: usize,
    knock_out_barrier: f64,
    knock_in_barrier: f64,
    participation_rate: f64,
    coupon_rate: f64,
    margin_ratio: f64,
    max_loss_ratio: f64,
    knock_in_observation: ObservationStyle,
    knock_out_observation: ObservationStyle,
    periods_per_year: usize,
}

impl ProductTerms {
    pub fn builder() -> ProductTermsBuilder {
        ProductTermsBuilder::default()
    }

    /// Term length in whole periods
    pub fn term(&self) -> usize {
        self.term
    }

    pub fn knock_out_barrier(&self) -> f64 {
        self.knock_out_barrier
    }

    pub fn knock_in_barrier(&self) -> f64 {
        self.knock_in_barrier
    }

    pub fn participation_rate(&self) -> f64 {
        self.participation_rate
    }

    /// Annual coupon rate in percent
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    pub fn margin_ratio(&self) -> f64 {
        self.margin_ratio
    }

    pub fn max_loss_ratio(&self) -> f64 {
        self.max_loss_ratio
    }

    pub fn knock_in_observation(&self) -> &ObservationStyle {
        &self.knock_in_observation
    }

    pub fn knock_out_observation(&self) -> &ObservationStyle {
        &self.knock_out_observation
    }

    pub fn periods_per_year(&self) -> usize {
        self.periods_per_year
    }

    /// Coupon accrued after `periods` elapsed periods, in percent of principal
    pub fn accrued_coupon(&self, periods: usize) -> f64 {
        self.coupon_rate * (periods as f64 / self.periods_per_year as f64)
    }

    /// Parameter table as (name, formatted value) rows, in input-form order
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("term", format!("{}M", self.term)),
            ("knock_out_barrier", format!("{:.2}%", self.knock_out_barrier)),
            ("knock_in_barrier", format!("{:.2}%", self.knock_in_barrier)),
            ("knock_in_observation", self.knock_in_observation.to_string()),
            ("participation_rate", format!("{:.2}%", self.participation_rate)),
            ("coupon_rate", format!("{:.2}%", self.coupon_rate)),
            ("margin_ratio", format!("{:.2}%", self.margin_ratio)),
            ("max_loss_ratio", format!("{:.2}%", self.max_loss_ratio)),
        ]
    }
}

/// Parse a term label into periods: `"24"`, `"24M"` (months) or `"2Y"` (years).
pub fn parse_term(label: &str) -> ScenarioResult<usize> {
    let trimmed = label.trim().to_ascii_uppercase();
    let (digits, multiplier) = if let Some(months) = trimmed.strip_suffix('M') {
        (months, 1)
    } else if let Some(years) = trimmed.strip_suffix('Y') {
        (years, 12)
    } else {
        (trimmed.as_str(), 1)
    };

    let count: usize = digits.trim().parse().map_err(|_| ScenarioError::InvalidTerms {
        field: "term".to_string(),
        reason: format!("cannot parse '{}' (expected e.g. 24, 24M or 2Y)", label),
    })?;
    let term = count
        .checked_mul(multiplier)
        .ok_or_else(|| ScenarioError::InvalidTerms {
            field: "term".to_string(),
            reason: format!("'{}' overflows the number of periods", label),
        })?;
    validate_term(term)?;
    Ok(term)
}

/// Builder for [`ProductTerms`]; defaults mirror a standard 24-month Snowball.
#[derive(Clone, Debug)]
pub struct ProductTermsBuilder {
    term: usize,
    knock_out_barrier: f64,
    knock_in_barrier: f64,
    participation_rate: f64,
    coupon_rate: f64,
    margin_ratio: f64,
    max_loss_ratio: f64,
    knock_in_observation: ObservationStyle,
    knock_out_observation: ObservationStyle,
    periods_per_year: usize,
}

impl Default for ProductTermsBuilder {
    fn default() -> Self {
        ProductTermsBuilder {
            term: 24,
            knock_out_barrier: 105.0,
            knock_in_barrier: 70.0,
            participation_rate: 100.0,
            coupon_rate: 5.0,
            margin_ratio: 100.0,
            max_loss_ratio: 100.0,
            knock_in_observation: ObservationStyle::Daily,
            knock_out_observation: ObservationStyle::Daily,
            periods_per_year: 12,
        }
    }
}

impl ProductTermsBuilder {
    pub fn term(mut self, term: usize) -> Self {
        self.term = term;
        self
    }

    /// Set the term from a label such as `"24M"`
    pub fn term_label(mut self, label: &str) -> ScenarioResult<Self> {
        self.term = parse_term(label)?;
        Ok(self)
    }

    pub fn knock_out_barrier(mut self, barrier: f64) -> Self {
        self.knock_out_barrier = barrier;
        self
    }

    pub fn knock_in_barrier(mut self, barrier: f64) -> Self {
        self.knock_in_barrier = barrier;
        self
    }

    pub fn participation_rate(mut self, rate: f64) -> Self {
        self.participation_rate = rate;
        self
    }

    pub fn coupon_rate(mut self, rate: f64) -> Self {
        self.coupon_rate = rate;
        self
    }

    pub fn margin_ratio(mut self, ratio: f64) -> Self {
        self.margin_ratio = ratio;
        self
    }

    pub fn max_loss_ratio(mut self, ratio: f64) -> Self {
        self.max_loss_ratio = ratio;
        self
    }

    pub fn knock_in_observation(mut self, style: ObservationStyle) -> Self {
        self.knock_in_observation = style;
        self
    }

    pub fn knock_out_observation(mut self, style: ObservationStyle) -> Self {
        self.knock_out_observation = style;
        self
    }

    pub fn periods_per_year(mut self, periods: usize) -> Self {
        self.periods_per_year = periods;
        self
    }

    /// Validate and freeze the terms
    pub fn build(self) -> ScenarioResult<ProductTerms> {
        validate_term(self.term)?;
        validate_percentage("knock_out_barrier", self.knock_out_barrier, MAX_BARRIER)?;
        validate_percentage("knock_in_barrier", self.knock_in_barrier, MAX_BARRIER)?;
        validate_percentage("participation_rate", self.participation_rate, MAX_PARTICIPATION)?;
        validate_percentage("coupon_rate", self.coupon_rate, MAX_RATIO)?;
        validate_percentage("margin_ratio", self.margin_ratio, MAX_RATIO)?;
        validate_percentage("max_loss_ratio", self.max_loss_ratio, MAX_RATIO)?;

        if self.knock_in_barrier > self.knock_out_barrier {
            return Err(ScenarioError::InvalidTerms {
                field: "knock_in_barrier".to_string(),
                reason: format!(
                    "({:.2}%) must not exceed knock_out_barrier ({:.2}%)",
                    self.knock_in_barrier, self.knock_out_barrier
                ),
            });
        }

        if self.periods_per_year == 0 {
            return Err(ScenarioError::InvalidTerms {
                field: "periods_per_year".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        self.knock_in_observation
            .validate("knock_in_observation", self.term)?;
        self.knock_out_observation
            .validate("knock_out_observation", self.term)?;

        if self.knock_in_barrier == 0.0 {
            warn!("knock-in barrier of 0% can never be breached by a positive price");
        }
        if self.knock_out_barrier <= 100.0 {
            warn!(
                knock_out_barrier = self.knock_out_barrier,
                "knock-out barrier at or below the inception level"
            );
        }

        Ok(ProductTerms {
            term: self.term,
            knock_out_barrier: self.knock_out_barrier,
            knock_in_barrier: self.knock_in_barrier,
            participation_rate: self.participation_rate,
            coupon_rate: self.coupon_rate,
            margin_ratio: self.margin_ratio,
            max_loss_ratio: self.max_loss_ratio,
            knock_in_observation: self.knock_in_observation,
            knock_out_observation: self.knock_out_observation,
            periods_per_year: self.periods_per_year,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_terms_are_valid() {
        let terms = ProductTerms::builder().build().unwrap();
        assert_eq!(terms.term(), 24);
        assert_eq!(terms.knock_out_barrier(), 105.0);
        assert_eq!(terms.knock_in_barrier(), 70.0);
        assert_eq!(terms.periods_per_year(), 12);
    }

    #[test]
    fn test_barrier_ordering_enforced() {
        let err = ProductTerms::builder()
            .knock_in_barrier(110.0)
            .knock_out_barrier(105.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, ScenarioError::InvalidTerms { ref field, .. } if field == "knock_in_barrier"));
    }

    #[test]
    fn test_equal_barriers_allowed() {
        assert!(ProductTerms::builder()
            .knock_in_barrier(100.0)
            .knock_out_barrier(100.0)
            .build()
            .is_ok());
    }

    #[test]
    fn test_zero_term_rejected() {
        assert!(matches!(
            ProductTerms::builder().term(0).build(),
            Err(ScenarioError::InvalidTerms { .. })
        ));
    }

    #[test]
    fn test_ratio_bounds() {
        assert!(ProductTerms::builder().coupon_rate(-1.0).build().is_err());
        assert!(ProductTerms::builder().participation_rate(501.0).build().is_err());
        assert!(ProductTerms::builder().knock_out_barrier(250.0).build().is_err());
        assert!(ProductTerms::builder().max_loss_ratio(f64::NAN).build().is_err());
    }

    #[test]
    fn test_parse_term_labels() {
        assert_eq!(parse_term("24M").unwrap(), 24);
        assert_eq!(parse_term(" 12m ").unwrap(), 12);
        assert_eq!(parse_term("2Y").unwrap(), 24);
        assert_eq!(parse_term("36").unwrap(), 36);
        assert!(parse_term("0M").is_err());
        assert!(parse_term("two years").is_err());
        assert!(parse_term("").is_err());
    }

    #[test]
    fn test_parse_term_overflowing_years_is_error() {
        assert!(matches!(
            parse_term("2000000000000000000Y"),
            Err(ScenarioError::InvalidTerms { .. })
        ));
        assert!(parse_term("18446744073709551616M").is_err());
    }

    #[test]
    fn test_accrued_coupon_is_pro_rata() {
        let terms = ProductTerms::builder().coupon_rate(5.0).build().unwrap();
        assert_relative_eq!(terms.accrued_coupon(6), 2.5, epsilon = 1e-12);
        assert_relative_eq!(terms.accrued_coupon(24), 10.0, epsilon = 1e-12);
        assert_eq!(terms.accrued_coupon(0), 0.0);
    }

    #[test]
    fn test_summary_rows() {
        let terms = ProductTerms::builder().build().unwrap();
        let summary = terms.summary();
        assert_eq!(summary.len(), 8);
        assert_eq!(summary[0], ("term", "24M".to_string()));
        assert_eq!(summary[1], ("knock_out_barrier", "105.00%".to_string()));
        assert_eq!(summary[3], ("knock_in_observation", "daily".to_string()));
    }

    #[test]
    fn test_sampling_beyond_term_rejected() {
        let result = ProductTerms::builder()
            .term(12)
            .knock_in_observation(ObservationStyle::Periodic {
                sampling: Some(vec![6, 18]),
            })
            .build();
        assert!(result.is_err());
    }
}
