//! Logging setup for host applications.

use tracing_subscriber::EnvFilter;

use crate::config::EstimatorConfig;

/// Install a fmt subscriber. `RUST_LOG` takes precedence over the
/// configured filter. Does nothing if a global subscriber is already set.
pub fn init_tracing(config: &EstimatorConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(filter = %config.log_filter, "Tracing initialized");
    }
}
