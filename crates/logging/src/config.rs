//! crates/logging/src/config.rs
//! Verbosity configuration derived from command-line counters.

use tracing::level_filters::LevelFilter;

/// Verbosity selected on the command line.
///
/// `-v` may be repeated; each occurrence raises the level emitted for
/// `treescan::*` targets by one step. `-q` overrides any `-v` and limits
/// output to errors.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct VerbosityConfig {
    verbose: u8,
    quiet: bool,
}

impl VerbosityConfig {
    /// Creates a configuration from a `-v` count.
    #[must_use]
    pub const fn from_verbose_level(level: u8) -> Self {
        Self {
            verbose: level,
            quiet: false,
        }
    }

    /// Creates a configuration that only reports errors.
    #[must_use]
    pub const fn quiet() -> Self {
        Self {
            verbose: 0,
            quiet: true,
        }
    }

    /// Returns the `-v` count this configuration was built from.
    #[must_use]
    pub const fn verbose_level(self) -> u8 {
        self.verbose
    }

    /// Reports whether `-q` was requested.
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        self.quiet
    }

    /// Level applied to `treescan::*` targets.
    #[must_use]
    pub const fn level_filter(self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::ERROR;
        }
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// Renders the filter directive handed to `EnvFilter`.
    ///
    /// Third-party targets stay at `warn` regardless of `-v`.
    #[must_use]
    pub fn directive(self) -> String {
        let level = self.level_filter();
        if level <= LevelFilter::WARN {
            level.to_string().to_lowercase()
        } else {
            format!(
                "warn,{}={}",
                crate::TARGET_PREFIX,
                level.to_string().to_lowercase()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_reports_warnings() {
        let config = VerbosityConfig::default();
        assert_eq!(config.level_filter(), LevelFilter::WARN);
        assert_eq!(config.directive(), "warn");
    }

    #[test]
    fn repeated_verbose_raises_level() {
        assert_eq!(
            VerbosityConfig::from_verbose_level(1).directive(),
            "warn,treescan=info"
        );
        assert_eq!(
            VerbosityConfig::from_verbose_level(2).directive(),
            "warn,treescan=debug"
        );
        assert_eq!(
            VerbosityConfig::from_verbose_level(3).directive(),
            "warn,treescan=trace"
        );
        assert_eq!(
            VerbosityConfig::from_verbose_level(9).level_filter(),
            LevelFilter::TRACE
        );
    }

    #[test]
    fn quiet_limits_output_to_errors() {
        let config = VerbosityConfig::quiet();
        assert!(config.is_quiet());
        assert_eq!(config.level_filter(), LevelFilter::ERROR);
        assert_eq!(config.directive(), "error");
    }
}
