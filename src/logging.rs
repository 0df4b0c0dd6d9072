//! Logging setup for the command line tool.
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the binary. `RUST_LOG` takes precedence over the filter passed in, which in
//! turn falls back to `warn`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_FILTER: &str = "warn";

/// Pick the effective filter directive.
pub fn filter_directive(rust_log: Option<&str>, configured: Option<&str>) -> String {
    rust_log
        .or(configured)
        .filter(|f| !f.trim().is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Install a stderr subscriber. Calling this twice is harmless.
pub fn init_logging(filter: Option<&str>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let directive = filter_directive(rust_log.as_deref(), filter);
    let env_filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(std::env::var_os("NO_COLOR").is_none()),
        )
        .with(env_filter)
        .try_init();
}
