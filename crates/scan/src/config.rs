//! crates/scan/src/config.rs
//! Scan configuration builder and validation.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use filters::{ExcludeSet, parse_exclude_file};

use crate::error::ConfigError;
use crate::policy::ErrorPolicy;

/// Default output file name prefix.
pub const DEFAULT_OUTPUT_PREFIX: &str = "files";

/// Default number of digest workers.
pub const DEFAULT_WORKERS: usize = 1;

/// Options for one scan.
///
/// Values are stored as given; [`Scanner::new`](crate::Scanner::new)
/// validates them.
#[derive(Clone, Debug)]
pub struct ScanConfig {
    pub(crate) root: PathBuf,
    pub(crate) checksum: bool,
    pub(crate) workers: usize,
    pub(crate) policy: ErrorPolicy,
    pub(crate) follow_symlinks: bool,
    pub(crate) recursive: bool,
    pub(crate) excludes: Vec<String>,
    pub(crate) output_dir: PathBuf,
    pub(crate) output_prefix: String,
}

impl ScanConfig {
    /// Creates a configuration scanning `root` with default options.
    ///
    /// Defaults: checksums off, one worker, `fail` policy, symlinks not
    /// followed, recursive, no exclusions, output into `.` with prefix
    /// [`DEFAULT_OUTPUT_PREFIX`].
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            checksum: false,
            workers: DEFAULT_WORKERS,
            policy: ErrorPolicy::Fail,
            follow_symlinks: false,
            recursive: true,
            excludes: Vec::new(),
            output_dir: PathBuf::from("."),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_owned(),
        }
    }

    /// Enables MD5 content digests.
    #[must_use]
    pub const fn checksum(mut self, enabled: bool) -> Self {
        self.checksum = enabled;
        self
    }

    /// Sets the number of digest workers. Must be at least 1.
    #[must_use]
    pub const fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets the error policy.
    #[must_use]
    pub const fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Controls whether symbolic links are resolved.
    #[must_use]
    pub const fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Controls whether subdirectories are scanned.
    #[must_use]
    pub const fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Appends one exclusion pattern.
    #[must_use]
    pub fn exclude<S: Into<String>>(mut self, pattern: S) -> Self {
        self.excludes.push(pattern.into());
        self
    }

    /// Appends exclusion patterns, keeping their order.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the directory the output file is created in.
    #[must_use]
    pub fn output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Sets the output file name prefix.
    #[must_use]
    pub fn output_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.output_prefix = prefix.into();
        self
    }

    /// Returns the input directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the configured error policy.
    #[must_use]
    pub const fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// Returns the directory the output file is created in.
    #[must_use]
    pub fn output_directory(&self) -> &Path {
        &self.output_dir
    }

    /// Checks every option and compiles the exclusion patterns.
    ///
    /// Only metadata of the input and output directories is read.
    pub(crate) fn validate(&self) -> Result<ExcludeSet, ConfigError> {
        match fs::metadata(&self.root) {
            Ok(metadata) if metadata.is_dir() => {}
            Ok(_) => return Err(ConfigError::RootNotDirectory(self.root.clone())),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::RootMissing(self.root.clone()));
            }
            Err(source) => {
                return Err(ConfigError::RootInaccessible {
                    path: self.root.clone(),
                    source,
                });
            }
        }

        if let Ok(metadata) = fs::metadata(&self.output_dir) {
            if !metadata.is_dir() {
                return Err(ConfigError::OutputNotDirectory(self.output_dir.clone()));
            }
        }

        if self.workers == 0 {
            return Err(ConfigError::InvalidWorkerCount(self.workers));
        }

        if self.output_prefix.is_empty()
            || self.output_prefix.contains('/')
            || self.output_prefix.contains(std::path::MAIN_SEPARATOR)
        {
            return Err(ConfigError::InvalidPrefix(self.output_prefix.clone()));
        }

        Ok(ExcludeSet::new(self.excludes.iter().cloned())?)
    }
}

/// Reads exclusion patterns from an `--exclude-from` style file.
pub fn load_exclude_file(path: &Path) -> Result<Vec<String>, ConfigError> {
    let to_error = |source| ConfigError::ExcludeFile {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(to_error)?;
    parse_exclude_file(BufReader::new(file)).map_err(to_error)
}
