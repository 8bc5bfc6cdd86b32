//! Exit codes returned by the treescan binary.
//!
//! Values follow rsync's `errcode.h` numbering so scripts that already
//! interpret rsync statuses read treescan's the same way.

use std::fmt;

/// Process exit status of one treescan invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ExitCode {
    /// The scan completed and every file was recorded.
    Ok = 0,

    /// Syntax or usage error.
    ///
    /// Returned for unknown options, malformed values, a zero worker count,
    /// an unknown error policy, or a rejected exclusion pattern.
    Syntax = 1,

    /// Errors selecting input/output directories.
    ///
    /// Returned when the input directory is missing or not a directory, or
    /// the output path is occupied by a non-directory.
    FileSelect = 3,

    /// Error in file I/O.
    ///
    /// Returned when the scan was aborted: a read failure under the `fail`
    /// policy, or any failure writing the output file.
    FileIo = 11,

    /// The scan completed but some entries were skipped.
    Partial = 23,
}

impl ExitCode {
    /// Returns the numeric exit code value.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Returns a human-readable description of the exit code.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Ok => "success",
            Self::Syntax => "syntax or usage error",
            Self::FileSelect => "errors selecting input/output files, dirs",
            Self::FileIo => "error in file IO",
            Self::Partial => "some files could not be scanned",
        }
    }

    /// Reports whether this code signals success.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.description(), self.as_i32())
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}
