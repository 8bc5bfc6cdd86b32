use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A regular file discovered during traversal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileEntry {
    pub(crate) full_path: PathBuf,
    pub(crate) relative_path: PathBuf,
    pub(crate) size: u64,
    pub(crate) modified: SystemTime,
}

impl FileEntry {
    /// Returns the absolute path to the file.
    ///
    /// For files reached through a followed directory symlink this is the
    /// path through the link, not the link target.
    #[must_use]
    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    /// Returns the path relative to the traversal root.
    #[must_use]
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// Returns the final component of the relative path.
    #[must_use]
    pub fn file_name(&self) -> Option<&OsStr> {
        self.relative_path.file_name()
    }

    /// Size in bytes at the time the file was stat'ed.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Last modification time at the time the file was stat'ed.
    #[must_use]
    pub const fn modified(&self) -> SystemTime {
        self.modified
    }
}
