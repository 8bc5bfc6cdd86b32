//! crates/scan/src/error.rs
//! Error taxonomy for scanning.
//!
//! [`ConfigError`] covers everything rejected before the first filesystem
//! read. [`ScanError`] covers the run itself; only its traversal, stat, and
//! digest variants are eligible for the skip policy.

use std::io;
use std::path::{Path, PathBuf};

use filters::FilterError;
use thiserror::Error;
use walk::WalkError;

/// Invalid configuration detected before any scanning starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The input directory does not exist.
    #[error("input directory '{}' does not exist", .0.display())]
    RootMissing(PathBuf),
    /// The input path exists but is not a directory.
    #[error("input path '{}' is not a directory", .0.display())]
    RootNotDirectory(PathBuf),
    /// The input path could not be inspected.
    #[error("cannot access input directory '{}': {source}", path.display())]
    RootInaccessible {
        /// Input path as configured.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        #[source]
        source: io::Error,
    },
    /// The output path exists but is not a directory.
    #[error("output path '{}' is not a directory", .0.display())]
    OutputNotDirectory(PathBuf),
    /// The digest worker count is zero.
    #[error("checksum worker count must be at least 1 (got {0})")]
    InvalidWorkerCount(usize),
    /// The error policy is neither `fail` nor `skip`.
    #[error("invalid error policy '{0}' (expected 'fail' or 'skip')")]
    InvalidPolicy(String),
    /// The output prefix is empty or contains a path separator.
    #[error("invalid output prefix '{0}': must be a non-empty file name")]
    InvalidPrefix(String),
    /// An exclusion pattern was rejected.
    #[error(transparent)]
    InvalidPattern(#[from] FilterError),
    /// An exclude-from file could not be read.
    #[error("failed to read exclude file '{}': {source}", path.display())]
    ExcludeFile {
        /// Path of the pattern list.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        #[source]
        source: io::Error,
    },
}

impl ConfigError {
    /// Reports whether the error concerns the input or output directory
    /// rather than option values.
    #[must_use]
    pub const fn is_path_selection(&self) -> bool {
        matches!(
            self,
            Self::RootMissing(_)
                | Self::RootNotDirectory(_)
                | Self::RootInaccessible { .. }
                | Self::OutputNotDirectory(_)
        )
    }
}

/// Failure during a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A directory could not be listed.
    #[error("failed to read directory '{}': {source}", path.display())]
    Traversal {
        /// Directory being listed.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        #[source]
        source: io::Error,
    },
    /// An entry's metadata could not be read.
    #[error("failed to stat '{}': {source}", path.display())]
    Stat {
        /// Entry being inspected.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        #[source]
        source: io::Error,
    },
    /// A file could not be read while hashing.
    #[error("failed to checksum '{}': {source}", path.display())]
    Digest {
        /// File being hashed.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        #[source]
        source: io::Error,
    },
    /// The output could not be written.
    #[error("failed to write output '{}': {source}", path.display())]
    Write {
        /// Output destination.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The digest worker pool could not be started.
    #[error("failed to start checksum workers: {0}")]
    WorkerPool(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ScanError {
    pub(crate) fn digest(path: &Path, source: io::Error) -> Self {
        Self::Digest {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn write(path: &Path, source: io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Reports whether the skip policy may swallow this error.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Traversal { .. } | Self::Stat { .. } | Self::Digest { .. }
        )
    }

    /// Returns the filesystem path tied to the failure, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Traversal { path, .. }
            | Self::Stat { path, .. }
            | Self::Digest { path, .. }
            | Self::Write { path, .. } => Some(path),
            Self::Config(_) | Self::WorkerPool(_) => None,
        }
    }
}

impl From<WalkError> for ScanError {
    fn from(error: WalkError) -> Self {
        let traversal = error.is_traversal();
        let (path, source) = error.into_parts();
        if traversal {
            Self::Traversal { path, source }
        } else {
            Self::Stat { path, source }
        }
    }
}
