#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` owns the diagnostic plumbing shared by the treescan workspace.
//! Library crates emit events through the [`tracing`] macros re-exported as
//! subsystem helpers ([`trace_walk!`], [`trace_digest!`], [`trace_emit!`],
//! [`trace_policy!`], [`trace_stats!`]); only the binary front-end installs a
//! subscriber, via [`init_tracing`].
//!
//! # Design
//!
//! - [`VerbosityConfig`] translates the `-v`/`-q` command-line counters into
//!   an [`EnvFilter`](tracing_subscriber::EnvFilter) directive.
//! - [`init_tracing`] installs a `fmt` subscriber writing to standard error.
//!   The [`LOG_ENV`] environment variable, when set, replaces the directive
//!   derived from the verbosity counters.
//!
//! # Invariants
//!
//! - Warnings are always visible unless `-q` was given; skipped entries are
//!   reported at warning level so they surface with default verbosity.
//! - Every event uses a `treescan::<subsystem>` target so filters can select
//!   individual stages.
//!
//! # Examples
//!
//! ```
//! use logging::VerbosityConfig;
//!
//! assert_eq!(VerbosityConfig::from_verbose_level(0).directive(), "warn");
//! assert_eq!(
//!     VerbosityConfig::from_verbose_level(2).directive(),
//!     "warn,treescan=debug"
//! );
//! assert_eq!(VerbosityConfig::quiet().directive(), "error");
//! ```

mod config;
mod subscriber;
mod tracing_macros;

pub use config::VerbosityConfig;
pub use subscriber::{LOG_ENV, build_filter, init_tracing, try_init_tracing};

/// Target prefix shared by every event emitted in the workspace.
pub const TARGET_PREFIX: &str = "treescan";
