use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Step of the traversal that failed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum WalkErrorKind {
    /// The scan root is missing, unreadable, or not a directory.
    Root,
    /// A directory could not be opened or its listing broke off.
    Listing,
    /// An entry's metadata could not be read. Dangling links land here.
    Stat,
}

impl WalkErrorKind {
    /// Reports whether the failure concerns a directory as a whole rather
    /// than a single entry.
    #[must_use]
    pub const fn is_traversal(self) -> bool {
        matches!(self, Self::Root | Self::Listing)
    }

    const fn verb(self) -> &'static str {
        match self {
            Self::Root => "cannot use scan root",
            Self::Listing => "cannot list directory",
            Self::Stat => "cannot stat",
        }
    }
}

/// A traversal failure tied to one path.
///
/// Only [`WalkBuilder::build`](crate::WalkBuilder::build) returns
/// [`WalkErrorKind::Root`]; the walker yields the other kinds in place and
/// moves on.
#[derive(Debug)]
pub struct WalkError {
    kind: WalkErrorKind,
    path: PathBuf,
    source: io::Error,
}

impl WalkError {
    pub(crate) fn root(path: PathBuf, source: io::Error) -> Self {
        Self {
            kind: WalkErrorKind::Root,
            path,
            source,
        }
    }

    pub(crate) fn listing(path: PathBuf, source: io::Error) -> Self {
        Self {
            kind: WalkErrorKind::Listing,
            path,
            source,
        }
    }

    pub(crate) fn stat(path: PathBuf, source: io::Error) -> Self {
        Self {
            kind: WalkErrorKind::Stat,
            path,
            source,
        }
    }

    /// Returns the failed step.
    #[must_use]
    pub const fn kind(&self) -> WalkErrorKind {
        self.kind
    }

    /// Returns the directory or entry the failure concerns.
    ///
    /// # Examples
    ///
    /// ```
    /// use walk::{WalkBuilder, WalkErrorKind};
    ///
    /// let error = match WalkBuilder::new("./no_such_scan_root").build() {
    ///     Ok(_) => panic!("missing root yields error"),
    ///     Err(error) => error,
    /// };
    /// assert_eq!(error.kind(), WalkErrorKind::Root);
    /// assert!(error.path().ends_with("no_such_scan_root"));
    /// ```
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Shorthand for `self.kind().is_traversal()`.
    #[must_use]
    pub const fn is_traversal(&self) -> bool {
        self.kind.is_traversal()
    }

    /// Consumes the error, returning the path and underlying I/O error.
    #[must_use]
    pub fn into_parts(self) -> (PathBuf, io::Error) {
        (self.path, self.source)
    }
}

impl fmt::Display for WalkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}': {}",
            self.kind.verb(),
            self.path.display(),
            self.source
        )
    }
}

impl Error for WalkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}
