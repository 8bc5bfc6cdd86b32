//! Ordered digest pipeline.
//!
//! Consumes the walker and hands each file, paired with its digest when
//! digests are enabled, to a sink in traversal order.
//!
//! # Architecture Overview
//!
//! ```text
//!  walker ──► submit ──► rayon pool (N workers, out-of-order completion)
//!               │                         │
//!               ▼                         ▼ bounded(1) handle per job
//!  FIFO window  ┌────┬────┬────┬────┐
//!  (capacity    │ P0 │ P1 │ P2 │ .. │ ──► pop head, block on its handle ──► sink
//!   max(4,4N))  └────┴────┴────┴────┘
//! ```
//!
//! The head of the window is the only place the controlling thread waits.
//! That wait is what keeps emission in traversal order and bounds how far
//! hashing can run ahead of output.
//!
//! With digests disabled, or with a single worker, everything happens
//! inline on the calling thread and no window exists.

mod inline;
#[cfg(feature = "parallel")]
mod pending;
#[cfg(feature = "parallel")]
mod pooled;

use checksums::FileDigest;
#[cfg(not(feature = "parallel"))]
use logging::trace_digest;
use walk::{FileEntry, FileWalker};

use crate::error::ScanError;
use crate::policy::ErrorHandler;

/// Smallest window used by the pooled pipeline.
pub const MIN_WINDOW: usize = 4;

/// In-flight digests allowed per worker.
pub const WINDOW_PER_WORKER: usize = 4;

/// How digests are computed for one scan.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DigestMode {
    /// No digests; every record carries an empty checksum.
    Disabled,
    /// Digests are computed on the scanning thread.
    Inline,
    /// Digests are computed on a private pool of `workers` threads.
    Pooled {
        /// Pool size, at least 2.
        workers: usize,
    },
}

impl DigestMode {
    /// Selects the mode for a checksum flag and validated worker count.
    #[must_use]
    pub const fn select(checksum: bool, workers: usize) -> Self {
        match (checksum, workers) {
            (false, _) => Self::Disabled,
            (true, 0 | 1) => Self::Inline,
            (true, workers) => Self::Pooled { workers },
        }
    }

    /// Maximum number of digests in flight: `max(4, workers * 4)` when
    /// pooled, zero otherwise.
    #[must_use]
    pub const fn window_capacity(self) -> usize {
        match self {
            Self::Disabled | Self::Inline => 0,
            Self::Pooled { workers } => {
                let scaled = workers.saturating_mul(WINDOW_PER_WORKER);
                if scaled > MIN_WINDOW { scaled } else { MIN_WINDOW }
            }
        }
    }
}

/// Drives `walker` to completion, passing each file and its digest to `sink`
/// in traversal order.
///
/// Walker and digest failures go through `handler`; sink failures abort
/// directly.
pub(crate) fn drive<F>(
    walker: FileWalker,
    mode: DigestMode,
    handler: &mut dyn ErrorHandler,
    sink: &mut F,
) -> Result<(), ScanError>
where
    F: FnMut(FileEntry, Option<FileDigest>) -> Result<(), ScanError>,
{
    match mode {
        DigestMode::Disabled => inline::run(walker, false, handler, sink),
        DigestMode::Inline => inline::run(walker, true, handler, sink),
        #[cfg(feature = "parallel")]
        DigestMode::Pooled { workers } => pooled::run(walker, workers, handler, sink),
        #[cfg(not(feature = "parallel"))]
        DigestMode::Pooled { workers } => {
            trace_digest!(workers, "built without pooled digests; hashing inline");
            inline::run(walker, true, handler, sink)
        }
    }
}
