//! crates/scan/src/policy.rs
//! Fail/skip error policy shared by every scanning stage.

use std::fmt;
use std::str::FromStr;

use logging::trace_policy;

use crate::error::{ConfigError, ScanError};

/// How recoverable errors are treated during one scan.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ErrorPolicy {
    /// The first error aborts the scan.
    #[default]
    Fail,
    /// Errors are logged and counted; the scan continues.
    Skip,
}

impl ErrorPolicy {
    /// Returns the command-line spelling of the policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::Skip => "skip",
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorPolicy {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "fail" => Ok(Self::Fail),
            "skip" => Ok(Self::Skip),
            other => Err(ConfigError::InvalidPolicy(other.to_owned())),
        }
    }
}

/// Decides what happens to an error raised while scanning.
///
/// Every stage routes its failures through one handler. Returning `Ok(())`
/// means the offending entry is dropped and scanning continues; returning
/// `Err` aborts the scan with that error.
pub trait ErrorHandler {
    /// Handles one error.
    fn handle(&mut self, error: ScanError) -> Result<(), ScanError>;

    /// Number of errors swallowed so far.
    fn skipped(&self) -> u64;
}

/// [`ErrorHandler`] applying an [`ErrorPolicy`].
///
/// Errors that are not [recoverable](ScanError::is_recoverable) always abort,
/// whatever the policy.
#[derive(Debug, Default)]
pub struct PolicyHandler {
    policy: ErrorPolicy,
    skipped: u64,
}

impl PolicyHandler {
    /// Creates a handler with a zero skip count.
    #[must_use]
    pub const fn new(policy: ErrorPolicy) -> Self {
        Self { policy, skipped: 0 }
    }

    /// Returns the policy being applied.
    #[must_use]
    pub const fn policy(&self) -> ErrorPolicy {
        self.policy
    }
}

impl ErrorHandler for PolicyHandler {
    fn handle(&mut self, error: ScanError) -> Result<(), ScanError> {
        if self.policy == ErrorPolicy::Fail || !error.is_recoverable() {
            return Err(error);
        }
        self.skipped += 1;
        match error.path() {
            Some(path) => trace_policy!(path = %path.display(), error = %error, "skipping entry"),
            None => trace_policy!(error = %error, "skipping entry"),
        }
        Ok(())
    }

    fn skipped(&self) -> u64 {
        self.skipped
    }
}
