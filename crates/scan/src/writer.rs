//! crates/scan/src/writer.rs
//! Incremental JSON array output.
//!
//! Records are written one at a time so memory use does not grow with the
//! number of files. The array is only closed by [`JsonArrayWriter::finish`];
//! an aborted scan leaves a truncated, syntactically invalid file behind.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use logging::trace_emit;

use crate::error::ScanError;
use crate::record::ScanRecord;

/// Destination label used when the writer has no file path.
pub const STREAM_DESTINATION: &str = "<stream>";

/// Counts reported at the end of a scan.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ScanTotals {
    /// Records written to the output.
    pub written: u64,
    /// Entries dropped under the skip policy.
    pub skipped: u64,
}

impl ScanTotals {
    /// Reports whether the scan finished without skipping anything.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.skipped == 0
    }
}

/// Streams [`ScanRecord`]s as a pretty-printed JSON array.
///
/// The layout is `[` and a newline, then each record as a 2-space indented
/// object with every line indented two more spaces, records separated by
/// `,` and a newline, and finally a newline, `]`, and a newline.
#[derive(Debug)]
pub struct JsonArrayWriter<W: Write> {
    inner: W,
    destination: PathBuf,
    written: u64,
}

impl<W: Write> JsonArrayWriter<W> {
    /// Starts an array on `inner`.
    pub fn new(inner: W) -> Result<Self, ScanError> {
        Self::with_destination(inner, STREAM_DESTINATION)
    }

    /// Starts an array on `inner`, naming `destination` in write errors.
    pub fn with_destination<P: Into<PathBuf>>(
        mut inner: W,
        destination: P,
    ) -> Result<Self, ScanError> {
        let destination = destination.into();
        inner
            .write_all(b"[\n")
            .map_err(|error| ScanError::write(&destination, error))?;
        Ok(Self {
            inner,
            destination,
            written: 0,
        })
    }

    /// Appends one record.
    pub fn write_record(&mut self, record: &ScanRecord) -> Result<(), ScanError> {
        let json = serde_json::to_string_pretty(record)
            .map_err(|error| ScanError::write(&self.destination, io::Error::other(error)))?;

        let mut chunk = String::with_capacity(json.len() + json.len() / 8 + 4);
        if self.written > 0 {
            chunk.push_str(",\n");
        }
        for (index, line) in json.lines().enumerate() {
            if index > 0 {
                chunk.push('\n');
            }
            chunk.push_str("  ");
            chunk.push_str(line);
        }

        self.inner
            .write_all(chunk.as_bytes())
            .map_err(|error| ScanError::write(&self.destination, error))?;
        self.written += 1;
        trace_emit!(complete_path = %record.complete_path, "record written");
        Ok(())
    }

    /// Number of records written so far.
    #[must_use]
    pub const fn written(&self) -> u64 {
        self.written
    }

    /// Closes the array, flushes, and returns the totals.
    pub fn finish(mut self, skipped: u64) -> Result<ScanTotals, ScanError> {
        self.inner
            .write_all(b"\n]\n")
            .and_then(|()| self.inner.flush())
            .map_err(|error| ScanError::write(&self.destination, error))?;
        Ok(ScanTotals {
            written: self.written,
            skipped,
        })
    }
}

/// Reads a file produced by [`JsonArrayWriter`] back into records.
pub fn read_records(path: &Path) -> Result<Vec<ScanRecord>, io::Error> {
    let file = File::open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(io::Error::from)
}
