//! crates/logging/src/tracing_macros.rs
//! Convenience macros for treescan-specific tracing.
//!
//! These macros wrap the standard tracing macros with the target for each
//! subsystem. Crates using them must depend on `tracing` directly.

/// Emit a directory traversal trace.
///
/// # Example
/// ```ignore
/// trace_walk!(path = %dir.display(), "entering directory");
/// ```
#[macro_export]
macro_rules! trace_walk {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "treescan::walk", $($arg)*);
    };
}

/// Emit a digest worker trace.
///
/// # Example
/// ```ignore
/// trace_digest!(workers, "starting digest pool");
/// ```
#[macro_export]
macro_rules! trace_digest {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "treescan::digest", $($arg)*);
    };
}

/// Emit a per-record output trace.
#[macro_export]
macro_rules! trace_emit {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "treescan::emit", $($arg)*);
    };
}

/// Emit a skipped-entry warning.
///
/// # Example
/// ```ignore
/// trace_policy!(path = %path.display(), error = %err, "skipping entry");
/// ```
#[macro_export]
macro_rules! trace_policy {
    ($($arg:tt)*) => {
        ::tracing::warn!(target: "treescan::policy", $($arg)*);
    };
}

/// Emit a statistics trace.
///
/// # Example
/// ```ignore
/// trace_stats!(written, skipped, "scan complete");
/// ```
#[macro_export]
macro_rules! trace_stats {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "treescan::stats", $($arg)*);
    };
}
