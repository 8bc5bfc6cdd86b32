#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `scan` turns a directory tree into a stream of [`ScanRecord`]s and writes
//! them as one JSON array without holding the result set in memory. It ties
//! together the deterministic [`walk`] traversal, optional MD5 digests from
//! [`checksums`], and a single fail/skip [`ErrorPolicy`].
//!
//! # Design
//!
//! - [`ScanConfig`] collects options; [`Scanner::new`] validates them before
//!   any directory is listed.
//! - The digest pipeline hashes either inline or on a private rayon pool
//!   (`parallel` feature). Pooled results pass through a FIFO window of
//!   `max(4, workers * 4)` pending jobs whose head is awaited before
//!   emission, so output order is always traversal order.
//! - [`ScanRecord::from_entry`] maps a walked file and its digest to the
//!   output record.
//! - [`JsonArrayWriter`] appends records to any [`std::io::Write`] as they
//!   arrive.
//! - [`ErrorHandler`] is the seam every stage reports failures through;
//!   [`PolicyHandler`] implements the configured [`ErrorPolicy`].
//!
//! # Invariants
//!
//! - Records are emitted in traversal order regardless of worker count.
//! - Configuration errors are reported before any I/O other than reading
//!   the metadata of the input and output directories.
//! - Write errors and worker pool failures always abort, even under
//!   [`ErrorPolicy::Skip`].
//!
//! # Errors
//!
//! [`ConfigError`] for rejected options; [`ScanError`] for everything that
//! happens once scanning has started. A scan aborted under
//! [`ErrorPolicy::Fail`] leaves a partial, syntactically invalid output
//! file; it is not cleaned up.
//!
//! # Examples
//!
//! ```
//! use scan::{ScanConfig, Scanner};
//! use std::fs;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! fs::create_dir(temp.path().join("sub"))?;
//! fs::write(temp.path().join("a.txt"), b"hello")?;
//! fs::write(temp.path().join("sub/b.bin"), b"")?;
//!
//! let scanner = Scanner::new(ScanConfig::new(temp.path()).checksum(true))?;
//! let (records, skipped) = scanner.records()?;
//!
//! assert_eq!(skipped, 0);
//! assert_eq!(records[0].complete_path, "a.txt");
//! assert_eq!(records[0].checksum, "5d41402abc4b2a76b9719d911017c592");
//! assert_eq!(records[1].path, "sub");
//! assert_eq!(records[1].filename, "b.bin");
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```
//!
//! # See also
//!
//! - [`walk`] for traversal order and symlink handling.
//! - [`filters`] for exclusion pattern semantics.

mod config;
mod error;
mod pipeline;
mod policy;
mod record;
mod scanner;
mod writer;

pub use config::{DEFAULT_OUTPUT_PREFIX, DEFAULT_WORKERS, ScanConfig, load_exclude_file};
pub use error::{ConfigError, ScanError};
pub use pipeline::{DigestMode, MIN_WINDOW, WINDOW_PER_WORKER};
pub use policy::{ErrorHandler, ErrorPolicy, PolicyHandler};
pub use record::{RECORD_SEPARATOR, ScanRecord, local_date};
pub use scanner::{ScanReport, Scanner, output_file_name};
pub use writer::{JsonArrayWriter, STREAM_DESTINATION, ScanTotals, read_records};
