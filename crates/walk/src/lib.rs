#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` provides the deterministic traversal used by treescan. The walker
//! reports regular files only, in a fixed order that does not depend on the
//! platform's directory iteration order or on thread scheduling: within one
//! directory every file is yielded, sorted by name, before any subdirectory
//! is entered; subdirectories are then entered one at a time, sorted by
//! name, and each contributes its whole subtree before the next sibling.
//!
//! # Design
//!
//! - [`WalkBuilder`] configures recursion, symlink following, the
//!   [`ExcludeSet`](filters::ExcludeSet) applied to every path segment, a
//!   single file to leave out, and whether traversal stops at the first
//!   error.
//! - [`FileWalker`] implements [`Iterator`] over an explicit stack of open
//!   directories. Each directory is listed once, its entries classified and
//!   sorted, and file metadata is fetched lazily as files are yielded.
//! - [`WalkError`] describes I/O failures with the offending path.
//!
//! # Invariants
//!
//! - Names are compared as raw `OsStr` values, i.e. by bytes on Unix.
//! - An excluded name is never stat'ed; an excluded directory is never
//!   listed, so nothing below it is reported.
//! - A symbolic link to a file is reported as a file, with its target's
//!   size and mtime; a dangling link is a stat error at its sorted position.
//!   Links to directories are entered only with symlink following enabled,
//!   and canonical directory paths are then tracked so cycles are entered
//!   only once.
//! - FIFOs, sockets, and device nodes are never reported.
//!
//! # Errors
//!
//! [`WalkBuilder::build`] fails only when the root cannot be inspected or is
//! not a directory. Every later failure is yielded in place as an `Err` item
//! and traversal continues with the next entry, unless
//! [`WalkBuilder::stop_on_error`] was requested.
//!
//! # Examples
//!
//! ```
//! use walk::WalkBuilder;
//! use std::fs;
//! use std::path::PathBuf;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let root = temp.path();
//! fs::create_dir(root.join("sub"))?;
//! fs::write(root.join("z.txt"), b"z")?;
//! fs::write(root.join("sub/a.txt"), b"a")?;
//!
//! let paths = WalkBuilder::new(root)
//!     .build()?
//!     .map(|entry| entry.map(|entry| entry.relative_path().to_path_buf()))
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! assert_eq!(paths, [PathBuf::from("z.txt"), PathBuf::from("sub/a.txt")]);
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```
//!
//! # See also
//!
//! - [`filters`] for the exclusion pattern semantics.

mod builder;
mod entry;
mod error;
mod walker;

#[cfg(test)]
mod tests;

pub use builder::WalkBuilder;
pub use entry::FileEntry;
pub use error::{WalkError, WalkErrorKind};
pub use walker::FileWalker;
