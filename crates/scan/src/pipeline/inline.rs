//! Synchronous pipeline: walk, hash, and emit on the calling thread.

use checksums::{FileDigest, digest_file};
use walk::{FileEntry, FileWalker};

use crate::error::ScanError;
use crate::policy::ErrorHandler;

pub(super) fn run<F>(
    walker: FileWalker,
    checksum: bool,
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

        if !checksum {
            sink(entry, None)?;
            continue;
        }

        match digest_file(entry.full_path()) {
            Ok(digest) => sink(entry, Some(digest))?,
            Err(source) => handler.handle(ScanError::digest(entry.full_path(), source))?,
        }
    }
    Ok(())
}
