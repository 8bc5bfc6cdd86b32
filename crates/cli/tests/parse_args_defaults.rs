//! Integration tests for the argument parser exposed through `test_utils`.
//!
//! These cover defaults and the order in which repeated options are kept;
//! validation of the values happens later in the scanning crate.

use std::ffi::OsString;

use cli::test_utils::parse_args;

// ============================================================================
// Defaults
// ============================================================================

/// Options left off the command line take their documented defaults.
#[test]
fn omitted_options_take_defaults() {
    let parsed = parse_args(["treescan", "--input-dir", "in", "--output-dir", "out"])
        .expect("parse");

    assert_eq!(parsed.input_dir, Some(OsString::from("in")));
    assert_eq!(parsed.output_dir, Some(OsString::from("out")));
    assert!(!parsed.checksum);
    assert_eq!(parsed.checksum_workers, 1);
    assert_eq!(parsed.on_error, "fail");
    assert!(!parsed.follow_symlinks);
    assert!(!parsed.no_recursive);
    assert!(parsed.excludes.is_empty());
    assert!(parsed.exclude_from.is_empty());
    assert_eq!(parsed.output_prefix, "files");
    assert_eq!(parsed.verbose, 0);
    assert!(!parsed.quiet);
}

/// An empty argument vector parses as a bare invocation.
#[test]
fn empty_arguments_parse_without_directories() {
    let parsed = parse_args(Vec::<OsString>::new()).expect("parse");
    assert!(parsed.input_dir.is_none());
    assert!(parsed.output_dir.is_none());
}

// ============================================================================
// Explicit values
// ============================================================================

/// Every flag is recognised in both `--opt value` and `--opt=value` forms.
#[test]
fn explicit_values_are_recorded() {
    let parsed = parse_args([
        "treescan",
        "--input-dir=src",
        "--output-dir=dst",
        "--checksum",
        "--checksum-workers",
        "8",
        "--on-error=skip",
        "--follow-symlinks",
        "--no-recursive",
        "--output-prefix",
        "photos",
        "-vv",
        "--quiet",
    ])
    .expect("parse");

    assert!(parsed.checksum);
    assert_eq!(parsed.checksum_workers, 8);
    assert_eq!(parsed.on_error, "skip");
    assert!(parsed.follow_symlinks);
    assert!(parsed.no_recursive);
    assert_eq!(parsed.output_prefix, "photos");
    assert_eq!(parsed.verbose, 2);
    assert!(parsed.quiet);
}

/// Repeated excludes keep their command-line order.
#[test]
fn repeated_excludes_keep_order() {
    let parsed = parse_args([
        "treescan",
        "--exclude",
        "*.tmp",
        "--exclude-from",
        "first.list",
        "--exclude",
        ".git",
        "--exclude-from",
        "second.list",
    ])
    .expect("parse");

    assert_eq!(parsed.excludes, ["*.tmp", ".git"]);
    assert_eq!(
        parsed.exclude_from,
        [OsString::from("first.list"), OsString::from("second.list")]
    );
}

/// The error policy is kept as text so the scanner can reject it.
#[test]
fn unknown_policy_text_is_passed_through() {
    let parsed = parse_args(["treescan", "--on-error", "retry"]).expect("parse");
    assert_eq!(parsed.on_error, "retry");
}

// ============================================================================
// Rejections
// ============================================================================

/// A worker count that is not an unsigned integer fails to parse.
#[test]
fn non_numeric_worker_count_is_rejected() {
    let error = parse_args(["treescan", "--checksum-workers", "-3"]).unwrap_err();
    assert_ne!(error.kind(), clap::error::ErrorKind::DisplayHelp);
}

/// Positional arguments are not accepted.
#[test]
fn positional_arguments_are_rejected() {
    let error = parse_args(["treescan", "somewhere"]).unwrap_err();
    assert_eq!(error.kind(), clap::error::ErrorKind::UnknownArgument);
}
