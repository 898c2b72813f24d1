//! Core pricing calculation functions.
//!
//! Pure functions for estimate math - no state is mutated and nothing is
//! rounded here. Rounding for display lives in [`crate::pricing::summary`].

use tracing::{debug, trace};

use super::models::{Breakdown, Estimate, EstimateState, GlobalFactors, LineItem, BASE_ITEM_KEY};

/// Compute the grand total and per-category breakdown for `state`.
///
/// Every category present in `state` gets a breakdown entry, starting at 0.
/// Included lines are priced as `(price + multiplier) * quantity`, scaled by
/// the global subjective and size percentages weighted by the line's own
/// coefficients. Attendance and annual revenue scale the grand total only,
/// so breakdown values are subtotals before those two adjustments.
///
/// # Examples
/// ```
/// use pricing_estimator::pricing::{compute_estimate, Category, EstimateState, LineItem};
///
/// let mut state = EstimateState::default().with_category(
///     Category::new("discovery")
///         .with_item("base", LineItem::priced(2500.0).subjective(1.0).size(0.25)),
/// );
/// state.factors.subjective_factor = 10.0;
/// state.factors.size_factor = 20.0;
///
/// let estimate = compute_estimate(&state);
/// assert!((estimate.total - 2887.5).abs() < 1e-9);
/// assert_eq!(estimate.breakdown.get("discovery"), Some(estimate.total));
/// ```
pub fn compute_estimate(state: &EstimateState) -> Estimate {
    let mut breakdown = Breakdown::zeroed(state);
    let mut sum = 0.0;

    for (index, category) in state.categories.iter().enumerate() {
        for (key, item) in category.iter() {
            if !is_included(key, item) {
                continue;
            }

            let adjusted = item_contribution(item, &state.factors);
            trace!(category = %category.name, key, adjusted, "Priced line");

            sum += adjusted;
            if let Some(subtotal) = breakdown.slot_mut(index) {
                *subtotal += adjusted;
            }
        }
    }

    let total = apply_volume_adjustments(sum, &state.factors);

    debug!(
        total,
        subtotal = sum,
        categories = breakdown.len(),
        "Estimate recomputed"
    );

    Estimate { total, breakdown }
}

/// Whether a line counts toward the total.
///
/// The `base` line of a category is mandatory and always counts, whatever
/// its `checked` flag says.
pub fn is_included(key: &str, item: &LineItem) -> bool {
    item.checked || key == BASE_ITEM_KEY
}

/// Fully adjusted contribution of one line, ignoring inclusion.
///
/// A coefficient of 0 makes the line insensitive to the matching global
/// percentage; a coefficient of 2 doubles the sensitivity.
pub fn item_contribution(item: &LineItem, factors: &GlobalFactors) -> f64 {
    let raw = item.base_price() * item.quantity as f64;

    raw * (1.0 + item.item_subjective_factor * factors.subjective_factor / 100.0)
        * (1.0 + item.item_size_factor * factors.size_factor / 100.0)
}

/// Apply attendance, then annual revenue, to a pre-volume subtotal.
///
/// Each term only applies when strictly positive.
pub fn apply_volume_adjustments(subtotal: f64, factors: &GlobalFactors) -> f64 {
    let mut sum = subtotal;

    if factors.attendance > 0.0 {
        sum *= 1.0 + factors.attendance / 1000.0;
    }
    if factors.annual_revenue > 0.0 {
        sum *= 1.0 + factors.annual_revenue / 1_000_000.0;
    }

    sum
}
