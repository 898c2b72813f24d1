//! Single-owner estimating session.
//!
//! The session is the one authoritative owner of an [`EstimateState`].
//! Every successful mutation is followed by a full recomputation before
//! control returns, so [`EstimateSession::estimate`] always reflects the
//! current state. Callers only ever get shared references to the state.

use serde::Serialize;
use tracing::info;

use crate::error::Result;

use super::calculators::compute_estimate;
use super::catalog::default_state;
use super::models::{Estimate, EstimateState, GlobalField};

#[derive(Debug, Clone)]
pub struct EstimateSession {
    state: EstimateState,
    estimate: Estimate,
}

/// State and latest result together, for handing to a host UI.
#[derive(Debug, Serialize)]
pub struct SessionSnapshot<'a> {
    pub state: &'a EstimateState,
    pub estimate: &'a Estimate,
}

impl EstimateSession {
    pub fn new(state: EstimateState) -> Self {
        let estimate = compute_estimate(&state);
        info!(
            categories = state.categories.len(),
            total = estimate.total,
            "Estimate session started"
        );
        Self { state, estimate }
    }

    /// Session over the compiled-in catalog
    pub fn from_catalog() -> Self {
        Self::new(default_state())
    }

    pub fn state(&self) -> &EstimateState {
        &self.state
    }

    pub fn estimate(&self) -> &Estimate {
        &self.estimate
    }

    pub fn toggle_checked(&mut self, category: &str, key: &str) -> Result<&Estimate> {
        self.state.toggle_checked(category, key)?;
        Ok(self.recompute())
    }

    pub fn set_quantity(&mut self, category: &str, key: &str, raw: &str) -> Result<&Estimate> {
        self.state.set_quantity(category, key, raw)?;
        Ok(self.recompute())
    }

    pub fn set_global_factor(&mut self, field: GlobalField, raw: &str) -> &Estimate {
        self.state.set_global_factor(field, raw);
        self.recompute()
    }

    pub fn set_global_factor_named(&mut self, field: &str, raw: &str) -> Result<&Estimate> {
        self.state.set_global_factor_named(field, raw)?;
        Ok(self.recompute())
    }

    /// Swap in a whole new state, e.g. a reset to the catalog defaults.
    pub fn replace_state(&mut self, state: EstimateState) -> &Estimate {
        self.state = state;
        self.recompute()
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            state: &self.state,
            estimate: &self.estimate,
        }
    }

    /// [`EstimateSession::snapshot`] as a JSON value
    pub fn snapshot_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self.snapshot())
    }

    fn recompute(&mut self) -> &Estimate {
        self.estimate = compute_estimate(&self.state);
        &self.estimate
    }
}

impl Default for EstimateSession {
    fn default() -> Self {
        Self::from_catalog()
    }
}
