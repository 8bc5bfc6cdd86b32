#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` is the command-line front-end of the treescan workspace. It parses
//! the argument vector, installs the tracing subscriber, hands a validated
//! [`scan::ScanConfig`] to [`scan::Scanner::run`], and turns the outcome into
//! a short summary plus an rsync-style exit status.
//!
//! # Design
//!
//! [`run`] accepts an iterator of arguments together with handles for
//! standard output and error so the whole front-end can be exercised from
//! tests without spawning a process. Parsing uses a [`clap`] builder command
//! with the automatic help and version flags disabled; `--help` renders a
//! fixed snapshot so the wording stays stable across clap upgrades.
//!
//! # Invariants
//!
//! - `run` never panics; failures surface as non-zero exit codes.
//! - Configuration problems are reported before the input tree is read.
//! - The summary is written to stdout only after the output file is closed.
//!
//! # Errors
//!
//! Every failure is reported on stderr as `treescan: <cause>` followed by a
//! `treescan error: <description> (code N)` line. See [`ExitCode`] for the
//! numbering.
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let status = cli::run(["treescan", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(status, 0);
//! assert!(String::from_utf8_lossy(&stdout).starts_with("treescan "));
//! assert!(stderr.is_empty());
//! ```
//!
//! # See also
//!
//! - [`scan`] for the scanning engine.
//! - `src/bin/treescan.rs` for the binary that wires [`run`] into `main`.

mod args;
mod exit_code;

use std::ffi::OsString;
use std::fmt::Display;
use std::io::Write;
use std::path::PathBuf;

use logging::VerbosityConfig;
use scan::{ConfigError, ErrorPolicy, ScanConfig, ScanError, ScanReport, Scanner};

use crate::args::{ParsedArgs, parse_args, render_help};
pub use crate::exit_code::ExitCode;

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Program name used as the diagnostic prefix.
const PROGRAM_NAME: &str = "treescan";

/// Runs the command-line front-end with the provided arguments and handles.
///
/// The first argument is the program name. Returns the process exit status.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    match parse_args(arguments) {
        Ok(parsed) => execute(parsed, stdout, stderr).as_i32(),
        Err(error) => {
            let rendered = error.to_string();
            let message = rendered
                .trim_end()
                .strip_prefix("error: ")
                .unwrap_or_else(|| rendered.trim_end());
            report(stderr, message, ExitCode::Syntax).as_i32()
        }
    }
}

/// Converts a numeric status into [`std::process::ExitCode`].
///
/// Values outside `0..=255` are clamped.
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(clamped as u8)
}

fn execute<Out, Err>(parsed: ParsedArgs, stdout: &mut Out, stderr: &mut Err) -> ExitCode
where
    Out: Write,
    Err: Write,
{
    if parsed.show_help {
        return match stdout.write_all(render_help().as_bytes()) {
            Ok(()) => ExitCode::Ok,
            Err(_) => ExitCode::FileIo,
        };
    }

    if parsed.show_version {
        return match writeln!(stdout, "{PROGRAM_NAME} {}", env!("CARGO_PKG_VERSION")) {
            Ok(()) => ExitCode::Ok,
            Err(_) => ExitCode::FileIo,
        };
    }

    let verbosity = if parsed.quiet {
        VerbosityConfig::quiet()
    } else {
        VerbosityConfig::from_verbose_level(parsed.verbose)
    };
    logging::init_tracing(verbosity);

    let config = match build_config(parsed) {
        Ok(config) => config,
        Err(Failure::Usage(message)) => return report(stderr, message, ExitCode::Syntax),
        Err(Failure::Config(error)) => {
            let code = config_exit_code(&error);
            return report(stderr, error, code);
        }
    };

    let scanner = match Scanner::new(config) {
        Ok(scanner) => scanner,
        Err(error) => {
            let code = config_exit_code(&error);
            return report(stderr, error, code);
        }
    };

    match scanner.run() {
        Ok(scan_report) => {
            if write_summary(stdout, &scan_report).is_err() {
                return report(stderr, "failed to write summary", ExitCode::FileIo);
            }
            if scan_report.totals.is_complete() {
                ExitCode::Ok
            } else {
                ExitCode::Partial
            }
        }
        Err(error) => {
            let code = scan_exit_code(&error);
            report(stderr, error, code)
        }
    }
}

enum Failure {
    Usage(String),
    Config(ConfigError),
}

impl From<ConfigError> for Failure {
    fn from(error: ConfigError) -> Self {
        Self::Config(error)
    }
}

fn build_config(parsed: ParsedArgs) -> Result<ScanConfig, Failure> {
    let ParsedArgs {
        input_dir,
        output_dir,
        checksum,
        checksum_workers,
        on_error,
        follow_symlinks,
        no_recursive,
        excludes,
        exclude_from,
        output_prefix,
        ..
    } = parsed;

    let input_dir = input_dir
        .ok_or_else(|| Failure::Usage("missing required option --input-dir".to_owned()))?;
    let output_dir = output_dir
        .ok_or_else(|| Failure::Usage("missing required option --output-dir".to_owned()))?;
    let policy = on_error.parse::<ErrorPolicy>()?;

    let mut patterns = excludes;
    for file in exclude_from {
        patterns.extend(scan::load_exclude_file(&PathBuf::from(file))?);
    }

    Ok(ScanConfig::new(input_dir)
        .output_dir(output_dir)
        .checksum(checksum)
        .workers(checksum_workers)
        .error_policy(policy)
        .follow_symlinks(follow_symlinks)
        .recursive(!no_recursive)
        .excludes(patterns)
        .output_prefix(output_prefix))
}

fn config_exit_code(error: &ConfigError) -> ExitCode {
    if error.is_path_selection() {
        ExitCode::FileSelect
    } else {
        ExitCode::Syntax
    }
}

fn scan_exit_code(error: &ScanError) -> ExitCode {
    match error {
        ScanError::Config(config) => config_exit_code(config),
        _ => ExitCode::FileIo,
    }
}

fn write_summary<W: Write>(stdout: &mut W, scan_report: &ScanReport) -> std::io::Result<()> {
    let totals = scan_report.totals;
    writeln!(stdout, "Scanned files (written): {}", totals.written)?;
    if totals.skipped > 0 {
        writeln!(stdout, "Skipped files          : {}", totals.skipped)?;
    }
    writeln!(
        stdout,
        "Output written         : {}",
        scan_report.output_path.display()
    )?;
    stdout.flush()
}

fn report<Err: Write>(stderr: &mut Err, message: impl Display, code: ExitCode) -> ExitCode {
    tracing::debug!(target: "treescan::cli", code = code.as_i32(), "{message}");
    let _ = writeln!(stderr, "{PROGRAM_NAME}: {message}");
    let _ = writeln!(stderr, "{PROGRAM_NAME} error: {code}");
    code
}

/// Parsing entry points for integration tests.
#[doc(hidden)]
pub mod test_utils {
    pub use crate::args::{ParsedArgs, parse_args};
}
