//! Pricing engine module for the estimator.
//!
//! The catalog defines categories and line items, the calculators turn the
//! current selections into a total and per-category breakdown, and the
//! session keeps the two in step as the user edits.

pub mod calculators;
pub mod catalog;
pub mod models;
pub mod mutations;
pub mod session;
pub mod summary;

// Re-export commonly used items
pub use calculators::{apply_volume_adjustments, compute_estimate, is_included, item_contribution};
pub use catalog::default_state;
pub use models::{
    Breakdown, Category, CategoryEntry, Estimate, EstimateState, GlobalFactors, GlobalField,
    LineItem, Subtotal, BASE_ITEM_KEY,
};
pub use mutations::{parse_factor, parse_quantity};
pub use session::{EstimateSession, SessionSnapshot};
pub use summary::{round_money, EstimateSummary};
