#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the command-line front-end used to inspect a searchmeta
//! filter configuration. It loads a YAML filter file through [`filters`],
//! then lists the configured collections in declaration order, prints the
//! direct containment map, or evaluates individual `relation.field` pairs
//! against the merged retention rules.
//!
//! # Design
//!
//! The crate exposes [`run`] as the primary entry point. The function accepts
//! an iterator of arguments together with handles for standard output and
//! error, so tests drive it with in-memory buffers. A [`clap`] command
//! definition performs the parse; all rendering is plain line-oriented text so
//! the output can be diffed and grepped.
//!
//! # Invariants
//!
//! - `run` never panics; failures surface as non-zero exit codes.
//! - Listing output follows declaration order of the configuration file.
//! - `--verbose` both builds the retention filter verbose and raises the log
//!   level, so every dropped pair produces one `removing filtered` line on
//!   stderr.
//!
//! # Errors
//!
//! Argument errors exit with `1`; configuration files that cannot be read or
//! decoded exit with `2`.
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = cli::run(["searchmeta-filters", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, 0);
//! assert!(String::from_utf8(stdout).unwrap().starts_with("searchmeta-filters "));
//! assert!(stderr.is_empty());
//! ```

mod logging;
mod render;

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, builder::OsStringValueParser};
use filters::{FieldKey, Filters, RetentionFilter};

pub use logging::init_tracing;

/// Name used in usage text and diagnostics.
pub const PROGRAM_NAME: &str = "searchmeta-filters";

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Exit code for argument errors.
const EXIT_USAGE: i32 = 1;

/// Exit code for configuration files that cannot be loaded.
const EXIT_CONFIG: i32 = 2;

/// Deterministic help text describing the CLI surface.
const HELP_TEXT: &str = concat!(
    "searchmeta-filters\n",
    "\n",
    "Usage: searchmeta-filters [-h] [-V] [-v] [--containment] [--check RELATION.FIELD]... FILE\n",
    "\n",
    "Inspect the search filters declared in the YAML configuration FILE.\n",
    "Without a mode option every collection is listed in declaration order.\n",
    "  -h, --help       Show this help message and exit.\n",
    "  -V, --version    Output version information and exit.\n",
    "  -v, --verbose    Report every field dropped by --check on stderr.\n",
    "      --containment  Print the collections that may contain each collection.\n",
    "      --check=RELATION.FIELD  Evaluate the retention rules for one field.\n",
);

const USAGE_LINE: &str =
    "Usage: searchmeta-filters [-h] [-V] [-v] [--containment] [--check RELATION.FIELD]... FILE";

/// Parsed command produced by [`parse_args`].
#[derive(Debug, Default)]
struct ParsedArgs {
    show_help: bool,
    show_version: bool,
    verbose: bool,
    containment: bool,
    checks: Vec<FieldKey>,
    config: Option<PathBuf>,
}

/// Builds the `clap` command used for parsing.
fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg_required_else_help(false)
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
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Report every field dropped by --check on stderr.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("containment")
                .long("containment")
                .help("Print the collections that may contain each collection.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .value_name("RELATION.FIELD")
                .help("Evaluate the retention rules for one field.")
                .value_parser(parse_field_key)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("config")
                .value_name("FILE")
                .help("YAML filter configuration.")
                .value_parser(OsStringValueParser::new())
                .action(ArgAction::Set),
        )
}

/// Splits `relation.field` at the first dot.
fn parse_field_key(value: &str) -> Result<FieldKey, String> {
    match value.split_once('.') {
        Some((relation, field)) if !relation.is_empty() && !field.is_empty() => {
            Ok(FieldKey::new(relation, field))
        }
        _ => Err(format!("expected RELATION.FIELD, found '{value}'")),
    }
}

fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let arguments: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    let mut matches = clap_command().try_get_matches_from(arguments)?;

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        verbose: matches.get_flag("verbose"),
        containment: matches.get_flag("containment"),
        checks: matches
            .remove_many::<FieldKey>("check")
            .map(Iterator::collect)
            .unwrap_or_default(),
        config: matches.remove_one::<OsString>("config").map(PathBuf::from),
    })
}

/// Runs the CLI using the provided argument iterator and output handles.
///
/// The function returns the process exit code that should be used by the
/// caller. On success, `0` is returned.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    match parse_args(arguments) {
        Ok(parsed) => execute(parsed, stdout, stderr),
        Err(error) => {
            let _ = write!(stderr, "{error}");
            EXIT_USAGE
        }
    }
}

fn execute<Out, Err>(parsed: ParsedArgs, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    let ParsedArgs {
        show_help,
        show_version,
        verbose,
        containment,
        checks,
        config,
    } = parsed;

    if show_help {
        return finish(stdout.write_all(HELP_TEXT.as_bytes()), stderr);
    }

    if show_version {
        return finish(
            writeln!(stdout, "{PROGRAM_NAME} {}", env!("CARGO_PKG_VERSION")),
            stderr,
        );
    }

    let Some(config) = config else {
        let _ = writeln!(stderr, "{PROGRAM_NAME}: error: missing FILE operand");
        let _ = writeln!(stderr, "{USAGE_LINE}");
        return EXIT_USAGE;
    };

    init_tracing(verbose);

    let filters = match Filters::load(&config) {
        Ok(filters) => filters,
        Err(error) => {
            let _ = writeln!(stderr, "{PROGRAM_NAME}: error: {error}");
            return EXIT_CONFIG;
        }
    };

    finish(
        report(&filters, containment, &checks, verbose, stdout),
        stderr,
    )
}

fn report<Out: Write>(
    filters: &Filters,
    containment: bool,
    checks: &[FieldKey],
    verbose: bool,
    stdout: &mut Out,
) -> io::Result<()> {
    if !containment && checks.is_empty() {
        return render::filter_listing(filters, stdout);
    }

    if containment {
        render::containment(filters, &filters.containment(), stdout)?;
    }

    if !checks.is_empty() {
        let retention = RetentionFilter::from_filters(filters, verbose);
        render::checks(&retention, checks, stdout)?;
    }

    Ok(())
}

/// Maps the result of writing the primary output onto an exit code.
fn finish<Err: Write>(result: io::Result<()>, stderr: &mut Err) -> i32 {
    match result {
        Ok(()) => 0,
        Err(error) => {
            let _ = writeln!(stderr, "{PROGRAM_NAME}: error: failed to write output: {error}");
            EXIT_USAGE
        }
    }
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(clamped as u8)
}

#[cfg(test)]
mod tests;
