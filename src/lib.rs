//! Interactive price estimator.
//!
//! A host UI owns an [`pricing::EstimateSession`] (or its own
//! [`pricing::EstimateState`]), feeds it user edits, and renders the
//! recomputed total and breakdown.
//!
//! ```
//! use pricing_estimator::pricing::{EstimateSession, GlobalField};
//!
//! let mut session = EstimateSession::from_catalog();
//! let before = session.estimate().total;
//!
//! let estimate = session.set_global_factor(GlobalField::Attendance, "250");
//! assert!(estimate.total > before);
//! ```

pub mod config;
pub mod error;
pub mod pricing;
pub mod telemetry;

pub use config::EstimatorConfig;
pub use error::{EstimatorError, Result};
