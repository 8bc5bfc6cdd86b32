use std::ffi::OsStr;
use std::path::Path;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::FilterError;

/// Ordered collection of compiled exclusion patterns.
///
/// Matching is performed against one path segment at a time. Callers test
/// each directory entry name as they encounter it, which is what makes a
/// matching directory prune its whole subtree.
#[derive(Clone, Debug)]
pub struct ExcludeSet {
    patterns: Vec<String>,
    matcher: GlobSet,
}

impl ExcludeSet {
    /// Compiles `patterns` in order.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError`] for the first pattern that contains a path
    /// separator or fails to compile.
    pub fn new<I, S>(patterns: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut kept = Vec::new();

        for pattern in patterns {
            let pattern = pattern.into();
            if pattern.contains('/') || (cfg!(windows) && pattern.contains('\\')) {
                return Err(FilterError::separator(pattern));
            }
            let glob = match GlobBuilder::new(&pattern).literal_separator(true).build() {
                Ok(glob) => glob,
                Err(source) => return Err(FilterError::compile(pattern, source)),
            };
            builder.add(glob);
            kept.push(pattern);
        }

        let matcher = builder
            .build()
            .map_err(|source| FilterError::compile(kept.join(" "), source))?;
        Ok(Self {
            patterns: kept,
            matcher,
        })
    }

    /// Returns an empty set that excludes nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            matcher: GlobSet::empty(),
        }
    }

    /// Reports whether the set holds no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns the patterns in the order they were supplied.
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Reports whether the path segment `name` matches any pattern.
    #[must_use]
    pub fn is_excluded(&self, name: &OsStr) -> bool {
        !self.patterns.is_empty() && self.matcher.is_match(Path::new(name))
    }

    /// Returns the first pattern, in supplied order, that matches `name`.
    #[must_use]
    pub fn first_match(&self, name: &OsStr) -> Option<&str> {
        if self.patterns.is_empty() {
            return None;
        }
        self.matcher
            .matches(Path::new(name))
            .into_iter()
            .min()
            .map(|index| self.patterns[index].as_str())
    }
}

impl Default for ExcludeSet {
    fn default() -> Self {
        Self::empty()
    }
}
