//! Tracing setup for hosts embedding the ledger.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::Config;

/// Initialize tracing/logging
///
/// Honours `RUST_LOG`; production environments log JSON lines.
pub fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "custodial_ledger=debug".into());

    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
