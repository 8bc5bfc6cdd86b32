//! Pooled pipeline: hashing on a private rayon pool, emission in order.

use std::sync::atomic::{AtomicBool, Ordering};

use checksums::{FileDigest, digest_file_with};
use logging::trace_digest;
use rayon::{Scope, ThreadPoolBuilder};
use walk::{FileEntry, FileWalker};

use super::DigestMode;
use super::pending::{DigestWindow, PendingDigest};
use crate::error::ScanError;
use crate::policy::ErrorHandler;

/// Runs the scan with `workers` digest threads.
///
/// The pool lives only for this call. Leaving the scope joins every job, so
/// no hashing outlives the scan; on abort the shared cancellation flag makes
/// queued and running jobs stop at their next chunk.
pub(super) fn run<F>(
    walker: FileWalker,
    workers: usize,
    handler: &mut dyn ErrorHandler,
    sink: &mut F,
) -> Result<(), ScanError>
where
    F: FnMut(FileEntry, Option<FileDigest>) -> Result<(), ScanError>,
{
    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|index| format!("treescan-digest-{index}"))
        .build()
        .map_err(|error| ScanError::WorkerPool(Box::new(error)))?;
    let capacity = DigestMode::Pooled { workers }.window_capacity();
    let cancel = AtomicBool::new(false);
    trace_digest!(workers, capacity, "starting digest pool");

    pool.in_place_scope(|scope| {
        let mut window = DigestWindow::new(capacity);
        let outcome = feed(scope, walker, &cancel, &mut window, handler, sink);
        if outcome.is_err() {
            cancel.store(true, Ordering::Relaxed);
            trace_digest!(
                outstanding = window.len(),
                "scan aborted; cancelling outstanding digests"
            );
        }
        outcome
    })
}

fn feed<'scope, F>(
    scope: &Scope<'scope>,
    walker: FileWalker,
    cancel: &'scope AtomicBool,
    window: &mut DigestWindow,
    handler: &mut dyn ErrorHandler,
    sink: &mut F,
) -> Result<(), ScanError>
where
    F: FnMut(FileEntry, Option<FileDigest>) -> Result<(), ScanError>,
{
    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(error) => {
                handler.handle(error.into())?;
                continue;
            }
        };

        let (sender, receiver) = crossbeam_channel::bounded(1);
        let path = entry.full_path().to_path_buf();
        scope.spawn(move |_| {
            // The receiver is gone once the scan has aborted.
            let _ = sender.send(digest_file_with(&path, cancel));
        });
        trace_digest!(path = %entry.full_path().display(), "submitted");

        if let Some(head) = window.push(PendingDigest::new(entry, receiver)) {
            settle(head, handler, sink)?;
        }
    }

    while let Some(head) = window.pop() {
        settle(head, handler, sink)?;
    }
    Ok(())
}

fn settle<F>(
    pending: PendingDigest,
    handler: &mut dyn ErrorHandler,
    sink: &mut F,
) -> Result<(), ScanError>
where
    F: FnMut(FileEntry, Option<FileDigest>) -> Result<(), ScanError>,
{
    match pending.resolve() {
        Ok((entry, digest)) => sink(entry, Some(digest)),
        Err(error) => handler.handle(error),
    }
}
