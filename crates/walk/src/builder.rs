use crate::error::WalkError;
use crate::walker::FileWalker;
use filters::ExcludeSet;
use std::path::PathBuf;

/// Configures a traversal rooted at a directory.
#[derive(Clone, Debug)]
pub struct WalkBuilder {
    pub(crate) root: PathBuf,
    pub(crate) recursive: bool,
    pub(crate) follow_symlinks: bool,
    pub(crate) stop_on_error: bool,
    pub(crate) excludes: ExcludeSet,
    pub(crate) skip_file: Option<PathBuf>,
}

impl WalkBuilder {
    /// Creates a new builder that will traverse the provided root directory.
    ///
    /// Defaults: recursive, symlinks not followed, no exclusions, traversal
    /// continues past errors.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            recursive: true,
            follow_symlinks: false,
            stop_on_error: false,
            excludes: ExcludeSet::empty(),
            skip_file: None,
        }
    }

    /// Controls whether subdirectories are entered.
    ///
    /// When disabled only the files directly inside the root are reported.
    #[must_use]
    pub const fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Configures whether linked directories are entered.
    ///
    /// A link to a file is always reported as a file under the link's own
    /// relative path, and a dangling link always surfaces as a stat error.
    /// This flag only decides whether a link to a directory is entered like
    /// a directory; when it is, canonical paths are tracked to prevent
    /// infinite loops.
    #[must_use]
    pub const fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Fuses the walker after the first yielded error.
    #[must_use]
    pub const fn stop_on_error(mut self, stop: bool) -> Self {
        self.stop_on_error = stop;
        self
    }

    /// Sets the exclusion patterns matched against every path segment.
    #[must_use]
    pub fn excludes(mut self, excludes: ExcludeSet) -> Self {
        self.excludes = excludes;
        self
    }

    /// Leaves one existing file out of the walk, wherever it sits in the tree.
    ///
    /// The file is matched by canonical location, so any path spelling
    /// works. A path that cannot be resolved when the walker is built is
    /// ignored.
    #[must_use]
    pub fn skip_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.skip_file = Some(path.into());
        self
    }

    /// Builds a [`FileWalker`] using the configured options.
    ///
    /// Only the root itself is inspected here; no directory is listed until
    /// the walker is first advanced.
    pub fn build(self) -> Result<FileWalker, WalkError> {
        FileWalker::new(self)
    }
}
