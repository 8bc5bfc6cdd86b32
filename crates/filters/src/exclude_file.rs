//! Parsing for `--exclude-from` pattern lists.

use std::io::{self, BufRead};

/// Reads one exclusion pattern per line from `reader`.
///
/// Trailing carriage returns are stripped so CRLF files behave like LF files.
/// Empty lines and lines whose first character is `#` or `;` are ignored.
/// Other whitespace is significant, matching rsync's exclude-from handling.
pub fn parse_exclude_file<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut patterns = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        patterns.push(line.to_owned());
    }
    Ok(patterns)
}
