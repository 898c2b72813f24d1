//! Display-ready estimate summary.
//!
//! The engine works in floating point and never rounds. This module turns
//! an [`Estimate`] into decimal amounts rounded for presentation, one line
//! per catalog item, so a host UI can render it without doing any math.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{EstimatorError, Result};

use super::calculators::{is_included, item_contribution};
use super::models::{Estimate, EstimateState};

/// Default number of decimal places shown for money.
pub const DISPLAY_PLACES: u32 = 2;

/// Round to `places` decimal places, halves away from zero.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use pricing_estimator::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2887.505), 2), dec!(2887.51));
/// assert_eq!(round_money(dec!(-1.005), 2), dec!(-1.01));
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert an engine amount to a rounded decimal.
///
/// NaN and infinities are `NonFiniteAmount`; finite values beyond the
/// decimal range are `AmountOutOfRange`.
pub fn to_display_amount(amount: f64, places: u32, label: &str) -> Result<Decimal> {
    if !amount.is_finite() {
        return Err(EstimatorError::NonFiniteAmount {
            label: label.to_string(),
        });
    }

    Decimal::from_f64(amount)
        .map(|d| round_money(d, places))
        .ok_or_else(|| EstimatorError::AmountOutOfRange {
            label: label.to_string(),
        })
}

#[derive(Debug, Clone, Serialize)]
pub struct LineSummary {
    pub key: String,
    pub quantity: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
    pub included: bool,
    /// Adjusted contribution; zero when the line is not included
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    pub lines: Vec<LineSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EstimateSummary {
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    pub categories: Vec<CategorySummary>,
}

impl EstimateSummary {
    /// Build a summary of `estimate`, which must have been computed from
    /// `state`. Categories missing from the breakdown show a zero subtotal.
    pub fn from_estimate(state: &EstimateState, estimate: &Estimate, places: u32) -> Result<Self> {
        let total = to_display_amount(estimate.total, places, "total")?;

        let categories = state
            .categories
            .iter()
            .map(|category| -> Result<CategorySummary> {
                let subtotal = estimate.breakdown.get(&category.name).unwrap_or(0.0);

                let lines = category
                    .iter()
                    .map(|(key, item)| -> Result<LineSummary> {
                        let included = is_included(key, item);
                        let amount = if included {
                            item_contribution(item, &state.factors)
                        } else {
                            0.0
                        };
                        let label = format!("{}.{}", category.name, key);

                        Ok(LineSummary {
                            key: key.to_string(),
                            quantity: item.quantity,
                            unit_price: to_display_amount(item.base_price(), places, &label)?,
                            included,
                            amount: to_display_amount(amount, places, &label)?,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;

                Ok(CategorySummary {
                    name: category.name.clone(),
                    subtotal: to_display_amount(subtotal, places, &category.name)?,
                    lines,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { total, categories })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::calculators::compute_estimate;
    use crate::pricing::catalog::default_state;
    use crate::pricing::models::{Category, GlobalField, LineItem};
    use rust_decimal_macros::dec;

    fn discovery_state() -> EstimateState {
        let mut state = EstimateState::default().with_category(
            Category::new("discovery")
                .with_item("base", LineItem::priced(2500.0).subjective(1.0).size(0.25))
                .with_item("survey", LineItem::priced(1000.0)),
        );
        state.factors.subjective_factor = 10.0;
        state.factors.size_factor = 20.0;
        state
    }

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_half_away_from_zero() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(3));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
        assert_eq!(round_money(dec!(-2.5), 0), dec!(-3));
        assert_eq!(round_money(dec!(4331.245), 2), dec!(4331.25));
    }

    #[test]
    fn test_round_money_normal_rounding() {
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.236), 2), dec!(1.24));
        assert_eq!(round_money(dec!(0), 2), dec!(0));
    }

    // ==================== to_display_amount tests ====================

    #[test]
    fn test_to_display_amount() {
        assert_eq!(to_display_amount(2887.5, 2, "total").unwrap(), dec!(2887.50));
        assert_eq!(to_display_amount(0.1 + 0.2, 2, "total").unwrap(), dec!(0.30));
    }

    #[test]
    fn test_to_display_amount_non_finite() {
        assert!(matches!(
            to_display_amount(f64::NAN, 2, "total"),
            Err(EstimatorError::NonFiniteAmount { label }) if label == "total"
        ));
        assert!(matches!(
            to_display_amount(f64::NEG_INFINITY, 2, "total"),
            Err(EstimatorError::NonFiniteAmount { .. })
        ));
    }

    #[test]
    fn test_to_display_amount_beyond_decimal_range() {
        assert!(matches!(
            to_display_amount(1e30, 2, "total"),
            Err(EstimatorError::AmountOutOfRange { label }) if label == "total"
        ));
        assert!(matches!(
            to_display_amount(-1e30, 2, "visual"),
            Err(EstimatorError::AmountOutOfRange { .. })
        ));
    }

    // ==================== EstimateSummary tests ====================

    #[test]
    fn test_summary_totals() {
        let mut state = discovery_state();
        state.factors.attendance = 500.0;
        let estimate = compute_estimate(&state);

        let summary = EstimateSummary::from_estimate(&state, &estimate, DISPLAY_PLACES).unwrap();

        assert_eq!(summary.total, dec!(4331.25));
        assert_eq!(summary.categories.len(), 1);
        assert_eq!(summary.categories[0].subtotal, dec!(2887.50));
    }

    #[test]
    fn test_summary_lines() {
        let state = discovery_state();
        let estimate = compute_estimate(&state);
        let summary = EstimateSummary::from_estimate(&state, &estimate, DISPLAY_PLACES).unwrap();

        let lines = &summary.categories[0].lines;
        assert_eq!(lines.len(), 2);

        assert_eq!(lines[0].key, "base");
        assert!(lines[0].included);
        assert_eq!(lines[0].amount, dec!(2887.50));

        assert_eq!(lines[1].key, "survey");
        assert!(!lines[1].included);
        assert_eq!(lines[1].unit_price, dec!(1000));
        assert_eq!(lines[1].amount, dec!(0));
    }

    #[test]
    fn test_summary_non_finite_total() {
        let mut state = discovery_state();
        state.factors.size_factor = f64::INFINITY;
        let estimate = compute_estimate(&state);

        assert!(matches!(
            EstimateSummary::from_estimate(&state, &estimate, DISPLAY_PLACES),
            Err(EstimatorError::NonFiniteAmount { .. })
        ));
    }

    #[test]
    fn test_summary_huge_revenue_is_out_of_range() {
        let mut state = default_state();
        state.set_global_factor(GlobalField::AnnualRevenue, "1e32");
        let estimate = compute_estimate(&state);
        assert!(estimate.total.is_finite());

        assert!(matches!(
            EstimateSummary::from_estimate(&state, &estimate, DISPLAY_PLACES),
            Err(EstimatorError::AmountOutOfRange { label }) if label == "total"
        ));
    }

    #[test]
    fn test_summary_serializes_amounts_as_strings() {
        let state = default_state();
        let estimate = compute_estimate(&state);
        let summary = EstimateSummary::from_estimate(&state, &estimate, DISPLAY_PLACES).unwrap();

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["total"].is_string());
        assert_eq!(json["categories"][0]["name"], "discovery");
        assert!(json["categories"][0]["lines"][0]["amount"].is_string());
    }
}
