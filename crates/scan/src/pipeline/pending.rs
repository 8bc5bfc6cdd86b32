//! In-flight digest tracking for the pooled pipeline.

use std::collections::VecDeque;
use std::io;

use checksums::FileDigest;
use crossbeam_channel::Receiver;
use walk::FileEntry;

use crate::error::ScanError;

/// A file whose digest job has been submitted but not yet consumed.
#[derive(Debug)]
pub(super) struct PendingDigest {
    entry: FileEntry,
    result: Receiver<io::Result<FileDigest>>,
}

impl PendingDigest {
    pub(super) fn new(entry: FileEntry, result: Receiver<io::Result<FileDigest>>) -> Self {
        Self { entry, result }
    }

    /// Blocks until the job reports, then pairs the entry with its digest.
    pub(super) fn resolve(self) -> Result<(FileEntry, FileDigest), ScanError> {
        match self.result.recv() {
            Ok(Ok(digest)) => Ok((self.entry, digest)),
            Ok(Err(source)) => Err(ScanError::digest(self.entry.full_path(), source)),
            Err(_) => Err(ScanError::digest(
                self.entry.full_path(),
                io::Error::other("digest worker exited before reporting"),
            )),
        }
    }
}

/// Fixed-capacity FIFO of pending digests.
#[derive(Debug)]
pub(super) struct DigestWindow {
    pending: VecDeque<PendingDigest>,
    capacity: usize,
}

impl DigestWindow {
    pub(super) fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            pending: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `digest`; once the window is full, returns the head so the
    /// caller can wait on it.
    pub(super) fn push(&mut self, digest: PendingDigest) -> Option<PendingDigest> {
        self.pending.push_back(digest);
        if self.pending.len() >= self.capacity {
            self.pending.pop_front()
        } else {
            None
        }
    }

    pub(super) fn pop(&mut self) -> Option<PendingDigest> {
        self.pending.pop_front()
    }

    pub(super) fn len(&self) -> usize {
        self.pending.len()
    }
}
