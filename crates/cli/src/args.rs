//! Command-line parsing.

use std::ffi::OsString;

use clap::{Arg, ArgAction, Command, builder::OsStringValueParser, value_parser};

/// Deterministic help text describing the command-line surface.
const HELP_TEXT: &str = concat!(
    "treescan ",
    env!("CARGO_PKG_VERSION"),
    "\n",
    "\n",
    "Usage: treescan --input-dir DIR --output-dir DIR [OPTIONS]\n",
    "\n",
    "Walks DIR in a fixed order and writes one JSON record per file to\n",
    "OUTPUT_DIR/PREFIX_YYYYMMDD_HHMMSS.json. The following options are recognised:\n",
    "  -h, --help                 Show this help message and exit.\n",
    "  -V, --version              Output version information and exit.\n",
    "      --input-dir=DIR        Directory to scan (required).\n",
    "      --output-dir=DIR       Directory receiving the output file (required).\n",
    "      --checksum             Record an MD5 digest of every file.\n",
    "      --checksum-workers=N   Hash on N threads (default 1, must be at least 1).\n",
    "      --on-error=POLICY      'fail' aborts on the first error (default);\n",
    "                             'skip' logs, counts, and continues.\n",
    "      --follow-symlinks      Enter symbolic links to directories.\n",
    "      --no-recursive         Only scan files directly inside DIR.\n",
    "      --exclude=PATTERN      Skip any path segment matching PATTERN (repeatable).\n",
    "      --exclude-from=FILE    Read exclude patterns from FILE.\n",
    "      --output-prefix=NAME   Output file name prefix (default 'files').\n",
    "  -v, --verbose              Increase diagnostic output (repeatable).\n",
    "  -q, --quiet                Only report errors.\n",
    "\n",
    "The environment variable TREESCAN_LOG overrides -v/-q with a tracing\n",
    "filter directive.\n",
);

/// Arguments after parsing, before validation.
#[derive(Debug, Default)]
pub struct ParsedArgs {
    /// `--help` was given.
    pub show_help: bool,
    /// `--version` was given.
    pub show_version: bool,
    /// Directory to scan.
    pub input_dir: Option<OsString>,
    /// Directory receiving the output file.
    pub output_dir: Option<OsString>,
    /// `--checksum` was given.
    pub checksum: bool,
    /// Requested digest worker count.
    pub checksum_workers: usize,
    /// Raw `--on-error` value.
    pub on_error: String,
    /// `--follow-symlinks` was given.
    pub follow_symlinks: bool,
    /// `--no-recursive` was given.
    pub no_recursive: bool,
    /// `--exclude` values in command-line order.
    pub excludes: Vec<String>,
    /// `--exclude-from` files in command-line order.
    pub exclude_from: Vec<OsString>,
    /// Output file name prefix.
    pub output_prefix: String,
    /// Number of `-v` occurrences.
    pub verbose: u8,
    /// `-q` was given.
    pub quiet: bool,
}

/// Builds the `clap` command used for parsing.
pub(crate) fn clap_command() -> Command {
    Command::new("treescan")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .help("Output version information and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("input-dir")
                .long("input-dir")
                .value_name("DIR")
                .help("Directory to scan.")
                .value_parser(OsStringValueParser::new())
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .value_name("DIR")
                .help("Directory receiving the output file.")
                .value_parser(OsStringValueParser::new())
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("checksum")
                .long("checksum")
                .help("Record an MD5 digest of every file.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("checksum-workers")
                .long("checksum-workers")
                .value_name("N")
                .help("Number of digest threads.")
                .value_parser(value_parser!(usize))
                .default_value("1")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("on-error")
                .long("on-error")
                .value_name("POLICY")
                .help("Error policy: fail or skip.")
                .default_value("fail")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("follow-symlinks")
                .long("follow-symlinks")
                .help("Enter symbolic links to directories.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-recursive")
                .long("no-recursive")
                .help("Only scan files directly inside the input directory.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("exclude")
                .long("exclude")
                .value_name("PATTERN")
                .help("Skip path segments matching PATTERN.")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("exclude-from")
                .long("exclude-from")
                .value_name("FILE")
                .help("Read exclude patterns from FILE.")
                .value_parser(OsStringValueParser::new())
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("output-prefix")
                .long("output-prefix")
                .value_name("NAME")
                .help("Output file name prefix.")
                .default_value(scan::DEFAULT_OUTPUT_PREFIX)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase diagnostic output.")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Only report errors.")
                .action(ArgAction::SetTrue),
        )
}

/// Parses command-line arguments into a [`ParsedArgs`] structure.
pub fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from("treescan"));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    let show_help = matches.get_flag("help");
    let show_version = matches.get_flag("version");
    let input_dir = matches.remove_one::<OsString>("input-dir");
    let output_dir = matches.remove_one::<OsString>("output-dir");
    let checksum = matches.get_flag("checksum");
    let checksum_workers = matches
        .remove_one::<usize>("checksum-workers")
        .unwrap_or(scan::DEFAULT_WORKERS);
    let on_error = matches
        .remove_one::<String>("on-error")
        .unwrap_or_else(|| "fail".to_owned());
    let follow_symlinks = matches.get_flag("follow-symlinks");
    let no_recursive = matches.get_flag("no-recursive");
    let excludes = matches
        .remove_many::<String>("exclude")
        .map(|values| values.collect())
        .unwrap_or_default();
    let exclude_from = matches
        .remove_many::<OsString>("exclude-from")
        .map(|values| values.collect())
        .unwrap_or_default();
    let output_prefix = matches
        .remove_one::<String>("output-prefix")
        .unwrap_or_else(|| scan::DEFAULT_OUTPUT_PREFIX.to_owned());
    let verbose = matches.get_count("verbose");
    let quiet = matches.get_flag("quiet");

    Ok(ParsedArgs {
        show_help,
        show_version,
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
        verbose,
        quiet,
    })
}

/// Renders the help text describing the supported options.
pub(crate) fn render_help() -> String {
    HELP_TEXT.to_string()
}
