use std::fmt;

/// Error produced when an exclusion pattern cannot be used.
#[derive(Debug)]
pub struct FilterError {
    pattern: String,
    kind: FilterErrorKind,
}

/// Reason a pattern was rejected.
#[derive(Debug)]
pub enum FilterErrorKind {
    /// The glob expression failed to compile.
    Compile(globset::Error),
    /// The pattern contains a path separator and can never match one segment.
    PathSeparator,
}

impl FilterError {
    pub(crate) fn compile(pattern: String, source: globset::Error) -> Self {
        Self {
            pattern,
            kind: FilterErrorKind::Compile(source),
        }
    }

    pub(crate) fn separator(pattern: String) -> Self {
        Self {
            pattern,
            kind: FilterErrorKind::PathSeparator,
        }
    }

    /// Returns the offending pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns why the pattern was rejected.
    #[must_use]
    pub const fn kind(&self) -> &FilterErrorKind {
        &self.kind
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FilterErrorKind::Compile(source) => write!(
                f,
                "failed to compile exclude pattern '{}': {}",
                self.pattern, source
            ),
            FilterErrorKind::PathSeparator => write!(
                f,
                "exclude pattern '{}' contains a path separator; patterns match single path segments",
                self.pattern
            ),
        }
    }
}

impl std::error::Error for FilterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            FilterErrorKind::Compile(source) => Some(source),
            FilterErrorKind::PathSeparator => None,
        }
    }
}
