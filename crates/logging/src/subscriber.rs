//! crates/logging/src/subscriber.rs
//! Subscriber installation for the treescan binary.
//!
//! Library crates never install a subscriber; they only emit events. The
//! binary calls [`init_tracing`] once, before any scanning starts, so that
//! worker threads spawned later inherit the global dispatcher.

use super::config::VerbosityConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Environment variable that overrides the directive derived from `-v`/`-q`.
pub const LOG_ENV: &str = "TREESCAN_LOG";

/// Builds the filter used by [`init_tracing`].
///
/// A non-empty [`LOG_ENV`] value that parses as an `EnvFilter` directive wins;
/// otherwise the verbosity directive applies.
#[must_use]
pub fn build_filter(config: VerbosityConfig) -> EnvFilter {
    std::env::var(LOG_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(config.directive()))
}

/// Installs the global subscriber, reporting failure instead of panicking.
///
/// Fails when another global subscriber was installed first.
pub fn try_init_tracing(config: VerbosityConfig) -> Result<(), TryInitError> {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.verbose_level() >= 2)
        .without_time();

    tracing_subscriber::registry()
        .with(build_filter(config))
        .with(layer)
        .try_init()
}

/// Installs the global subscriber writing to standard error.
///
/// A second call is a no-op.
///
/// # Example
///
/// ```rust,ignore
/// use logging::{VerbosityConfig, init_tracing};
///
/// init_tracing(VerbosityConfig::from_verbose_level(1));
/// tracing::info!(target: "treescan::stats", "scan complete");
/// ```
pub fn init_tracing(config: VerbosityConfig) {
    let _ = try_init_tracing(config);
}
