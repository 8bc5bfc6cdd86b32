//! crates/scan/src/record.rs
//! Mapping from walked files to output records.

use std::path::{Component, Path};
use std::time::SystemTime;

use checksums::FileDigest;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use walk::FileEntry;

/// Separator used in every record path, whatever the platform.
pub const RECORD_SEPARATOR: &str = "/";

/// One scanned file as written to the output array.
///
/// Field order is part of the output format.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ScanRecord {
    /// Parent directory of the file relative to the root; empty at the root.
    pub path: String,
    /// Final path component.
    pub filename: String,
    /// Full root-relative path.
    pub complete_path: String,
    /// Lowercase hex MD5 digest, or empty when digests are disabled.
    pub checksum: String,
    /// Size in bytes.
    pub size: u64,
    /// Local calendar date of the last modification, `YYYY-MM-DD`.
    pub date: String,
}

impl ScanRecord {
    /// Builds a record from its parts.
    ///
    /// Non-UTF-8 name bytes are replaced with U+FFFD.
    #[must_use]
    pub fn from_parts(
        relative: &Path,
        size: u64,
        modified: SystemTime,
        digest: Option<&FileDigest>,
    ) -> Self {
        let mut segments: Vec<String> = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        let filename = segments.pop().unwrap_or_default();
        let path = segments.join(RECORD_SEPARATOR);
        let complete_path = if path.is_empty() {
            filename.clone()
        } else {
            format!("{path}{RECORD_SEPARATOR}{filename}")
        };

        Self {
            path,
            filename,
            complete_path,
            checksum: digest.map(FileDigest::to_hex).unwrap_or_default(),
            size,
            date: local_date(modified),
        }
    }

    /// Builds a record for a walked file.
    #[must_use]
    pub fn from_entry(entry: &FileEntry, digest: Option<&FileDigest>) -> Self {
        Self::from_parts(entry.relative_path(), entry.size(), entry.modified(), digest)
    }
}

/// Formats `time` as a calendar date in the local time zone.
#[must_use]
pub fn local_date(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use checksums::Md5;
    use std::path::PathBuf;

    #[test]
    fn root_level_file_has_empty_path() {
        let record = ScanRecord::from_parts(Path::new("a.txt"), 5, SystemTime::now(), None);
        assert_eq!(record.path, "");
        assert_eq!(record.filename, "a.txt");
        assert_eq!(record.complete_path, "a.txt");
        assert_eq!(record.checksum, "");
        assert_eq!(record.size, 5);
    }

    #[test]
    fn nested_file_splits_parent_and_name() {
        let relative: PathBuf = ["docs", "2024", "report.pdf"].iter().collect();
        let digest = FileDigest::from(Md5::digest(b"hello"));
        let record = ScanRecord::from_parts(&relative, 0, SystemTime::now(), Some(&digest));
        assert_eq!(record.path, "docs/2024");
        assert_eq!(record.filename, "report.pdf");
        assert_eq!(record.complete_path, "docs/2024/report.pdf");
        assert_eq!(record.checksum, "5d41402abc4b2a76b9719d911017c592");
    }

    #[test]
    fn date_uses_local_calendar_day() {
        let now = SystemTime::now();
        let record = ScanRecord::from_parts(Path::new("f"), 0, now, None);
        assert_eq!(record.date, Local::now().format("%Y-%m-%d").to_string());
        assert_eq!(record.date.len(), 10);
    }

    #[test]
    fn serializes_fields_in_fixed_order() {
        let record = ScanRecord {
            path: "sub".into(),
            filename: "b.bin".into(),
            complete_path: "sub/b.bin".into(),
            checksum: String::new(),
            size: 0,
            date: "2024-01-02".into(),
        };
        let json = serde_json::to_string(&record).expect("serialize");
        assert_eq!(
            json,
            r#"{"path":"sub","filename":"b.bin","complete_path":"sub/b.bin","checksum":"","size":0,"date":"2024-01-02"}"#
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_are_rendered_lossily() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let name = OsStr::from_bytes(b"bad\xffname");
        let record = ScanRecord::from_parts(Path::new(name), 1, SystemTime::now(), None);
        assert_eq!(record.filename, "bad\u{fffd}name");
    }
}
