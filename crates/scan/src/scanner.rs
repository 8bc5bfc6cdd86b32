//! crates/scan/src/scanner.rs
//! Scan orchestration: walker, digest pipeline, record mapping, output.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use checksums::FileDigest;
use chrono::{DateTime, Local};
use filters::ExcludeSet;
use logging::trace_stats;
use walk::{FileEntry, FileWalker, WalkBuilder};

use crate::config::ScanConfig;
use crate::error::{ConfigError, ScanError};
use crate::pipeline::{self, DigestMode};
use crate::policy::{ErrorHandler, PolicyHandler};
use crate::record::ScanRecord;
use crate::writer::{JsonArrayWriter, ScanTotals};

/// Outcome of [`Scanner::run`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScanReport {
    /// File the records were written to.
    pub output_path: PathBuf,
    /// Written and skipped counts.
    pub totals: ScanTotals,
}

/// A validated scan, ready to run.
#[derive(Clone, Debug)]
pub struct Scanner {
    config: ScanConfig,
    excludes: ExcludeSet,
}

impl Scanner {
    /// Validates `config`.
    ///
    /// Only the metadata of the input and output directories is read; no
    /// directory is listed and nothing is created.
    pub fn new(config: ScanConfig) -> Result<Self, ConfigError> {
        let excludes = config.validate()?;
        Ok(Self { config, excludes })
    }

    /// Returns the configuration this scanner was built from.
    #[must_use]
    pub const fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Digest mode implied by the configuration.
    #[must_use]
    pub const fn digest_mode(&self) -> DigestMode {
        DigestMode::select(self.config.checksum, self.config.workers)
    }

    fn walker(&self, output: Option<&Path>) -> Result<FileWalker, ScanError> {
        let mut builder = WalkBuilder::new(&self.config.root)
            .recursive(self.config.recursive)
            .follow_symlinks(self.config.follow_symlinks)
            .excludes(self.excludes.clone());
        if let Some(output) = output {
            builder = builder.skip_file(output);
        }
        builder.build().map_err(ScanError::from)
    }

    /// Scans the tree, passing every record to `sink` in traversal order.
    ///
    /// Returns the number of records passed to `sink`. Recoverable failures
    /// go through `handler`; a failing `sink` aborts the scan.
    pub fn scan_with<F>(&self, handler: &mut dyn ErrorHandler, sink: F) -> Result<u64, ScanError>
    where
        F: FnMut(ScanRecord) -> Result<(), ScanError>,
    {
        self.scan_excluding(None, handler, sink)
    }

    /// Like [`Scanner::scan_with`], but never records `output`.
    fn scan_excluding<F>(
        &self,
        output: Option<&Path>,
        handler: &mut dyn ErrorHandler,
        mut sink: F,
    ) -> Result<u64, ScanError>
    where
        F: FnMut(ScanRecord) -> Result<(), ScanError>,
    {
        let walker = self.walker(output)?;
        let mut emitted = 0_u64;
        let mut emit = |entry: FileEntry, digest: Option<FileDigest>| -> Result<(), ScanError> {
            sink(ScanRecord::from_entry(&entry, digest.as_ref()))?;
            emitted += 1;
            Ok(())
        };
        pipeline::drive(walker, self.digest_mode(), handler, &mut emit)?;
        Ok(emitted)
    }

    /// Collects every record in memory under the configured policy.
    pub fn records(&self) -> Result<(Vec<ScanRecord>, u64), ScanError> {
        let mut handler = PolicyHandler::new(self.config.policy);
        let mut records = Vec::new();
        self.scan_with(&mut handler, |record| {
            records.push(record);
            Ok(())
        })?;
        Ok((records, handler.skipped()))
    }

    /// Streams the scan as a JSON array into `writer`.
    pub fn write_to<W: Write>(
        &self,
        writer: W,
        handler: &mut dyn ErrorHandler,
    ) -> Result<ScanTotals, ScanError> {
        self.stream(JsonArrayWriter::new(writer)?, None, handler)
    }

    fn stream<W: Write>(
        &self,
        mut json: JsonArrayWriter<W>,
        output: Option<&Path>,
        handler: &mut dyn ErrorHandler,
    ) -> Result<ScanTotals, ScanError> {
        self.scan_excluding(output, handler, |record| json.write_record(&record))?;
        json.finish(handler.skipped())
    }

    /// Runs the scan into a new timestamped file in the output directory.
    ///
    /// The output directory is created if needed. The file is created
    /// exclusively: an existing file with the same name is a write error.
    /// When the output directory lies inside the scanned tree, the output
    /// file itself is left out of the records.
    pub fn run(&self) -> Result<ScanReport, ScanError> {
        let output_dir = &self.config.output_dir;
        fs::create_dir_all(output_dir).map_err(|error| ScanError::write(output_dir, error))?;

        let output_path =
            output_dir.join(output_file_name(&self.config.output_prefix, Local::now()));
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&output_path)
            .map_err(|error| ScanError::write(&output_path, error))?;

        let mut handler = PolicyHandler::new(self.config.policy);
        let json = JsonArrayWriter::with_destination(BufWriter::new(file), &output_path)?;
        let totals = self.stream(json, Some(&output_path), &mut handler)?;

        trace_stats!(
            written = totals.written,
            skipped = totals.skipped,
            output = %output_path.display(),
            "scan complete"
        );
        Ok(ScanReport {
            output_path,
            totals,
        })
    }
}

/// Builds `<prefix>_<YYYYMMDD_HHMMSS>.json` for `now`.
#[must_use]
pub fn output_file_name(prefix: &str, now: DateTime<Local>) -> String {
    format!("{prefix}_{}.json", now.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn output_file_name_uses_second_resolution_timestamp() {
        let now = Local
            .with_ymd_and_hms(2024, 3, 9, 7, 5, 1)
            .single()
            .expect("unambiguous local time");
        assert_eq!(output_file_name("files", now), "files_20240309_070501.json");
        assert_eq!(output_file_name("photos", now), "photos_20240309_070501.json");
    }

    #[test]
    fn digest_mode_follows_config() {
        let temp = tempfile::tempdir().expect("tempdir");
        let scanner = Scanner::new(ScanConfig::new(temp.path())).expect("scanner");
        assert_eq!(scanner.digest_mode(), DigestMode::Disabled);

        let scanner =
            Scanner::new(ScanConfig::new(temp.path()).checksum(true).workers(4)).expect("scanner");
        assert_eq!(scanner.digest_mode(), DigestMode::Pooled { workers: 4 });
    }

    #[test]
    fn records_of_empty_tree_are_empty() {
        let temp = tempfile::tempdir().expect("tempdir");
        let scanner = Scanner::new(ScanConfig::new(temp.path())).expect("scanner");
        let (records, skipped) = scanner.records().expect("scan");
        assert!(records.is_empty());
        assert_eq!(skipped, 0);
    }
}
