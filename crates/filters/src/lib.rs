#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `filters` compiles the ordered exclusion patterns used by the treescan
//! walker. Patterns are shell-style globs (`*`, `?`, `[...]`) matched against
//! a single path segment, never against a whole relative path. A directory
//! whose name matches is pruned together with everything below it; a file
//! whose name matches is simply not reported.
//!
//! # Design
//!
//! - [`ExcludeSet`] owns a [`globset::GlobSet`] built from the patterns in
//!   the order they were supplied, plus the original pattern text so the
//!   first matching pattern can be reported in diagnostics.
//! - [`parse_exclude_file`] reads patterns from an `--exclude-from` style
//!   list where blank lines and `#`/`;` comments are ignored.
//!
//! # Invariants
//!
//! - An empty set excludes nothing.
//! - Patterns never contain a path separator; such patterns are rejected at
//!   construction because they could never match a single segment.
//!
//! # Errors
//!
//! [`ExcludeSet::new`] reports [`FilterError`] for patterns that fail to
//! compile or that contain a separator. The error carries the offending
//! pattern text.
//!
//! # Examples
//!
//! ```
//! use filters::ExcludeSet;
//! use std::ffi::OsStr;
//!
//! let set = ExcludeSet::new([".*", "*.tmp"]).unwrap();
//! assert!(set.is_excluded(OsStr::new(".git")));
//! assert!(set.is_excluded(OsStr::new("build.tmp")));
//! assert!(!set.is_excluded(OsStr::new("src")));
//! assert_eq!(set.first_match(OsStr::new("x.tmp")), Some("*.tmp"));
//! ```

mod error;
mod exclude_file;
mod set;

pub use error::{FilterError, FilterErrorKind};
pub use exclude_file::parse_exclude_file;
pub use set::ExcludeSet;
