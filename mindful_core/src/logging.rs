//! Logging infrastructure for Mindful.
//!
//! Centralized tracing setup for the binary. The default level is INFO and
//! can be overridden with the RUST_LOG environment variable.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging with environment-based filtering and compact output
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}
