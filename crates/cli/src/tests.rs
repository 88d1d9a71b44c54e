use super::*;

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use tempfile::TempDir;

const CONFIG: &str = "
article:
  Searchable: [title, body]
  SearchableConfig:
    title:
      Analyzer: english
    body:
      Type: text
  Additional: [slug]
  Relations:
    author:
      Collection: user
      Field: id
comment:
  Searchable: [text]
  Contains: [article]
user:
  Searchable: [name]
";

fn run_with_args<I, S>(args: I) -> (i32, Vec<u8>, Vec<u8>)
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = run(args, &mut stdout, &mut stderr);
    (code, stdout, stderr)
}

fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("filters.yaml");
    fs::write(&path, contents).expect("write config");
    path
}

fn run_on_config<'a>(path: &'a Path, extra: &[&'a str]) -> (i32, String, String) {
    let mut args: Vec<&OsStr> = vec![OsStr::new(PROGRAM_NAME)];
    args.extend(extra.iter().map(OsStr::new));
    args.push(path.as_os_str());

    let (code, stdout, stderr) = run_with_args(args);
    (
        code,
        String::from_utf8(stdout).expect("valid UTF-8"),
        String::from_utf8(stderr).expect("valid UTF-8"),
    )
}

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn help_flag_renders_static_help() {
    let (code, stdout, stderr) = run_with_args([PROGRAM_NAME, "--help"]);

    assert_eq!(code, 0);
    assert!(stderr.is_empty());
    assert_eq!(stdout, HELP_TEXT.as_bytes());
}

#[test]
fn short_help_wins_over_missing_operand() {
    let (code, stdout, _) = run_with_args([PROGRAM_NAME, "-h"]);

    assert_eq!(code, 0);
    assert!(String::from_utf8(stdout).unwrap().contains(USAGE_LINE));
}

#[test]
fn version_flag_reports_package_version() {
    let (code, stdout, stderr) = run_with_args([PROGRAM_NAME, "-V"]);

    assert_eq!(code, 0);
    assert!(stderr.is_empty());
    assert_eq!(
        String::from_utf8(stdout).unwrap(),
        format!("{PROGRAM_NAME} {}\n", env!("CARGO_PKG_VERSION"))
    );
}

// ============================================================================
// Usage errors
// ============================================================================

#[test]
fn missing_operand_is_a_usage_error() {
    let (code, stdout, stderr) = run_with_args([PROGRAM_NAME]);

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    let rendered = String::from_utf8(stderr).unwrap();
    assert!(rendered.contains("missing FILE operand"));
    assert!(rendered.contains(USAGE_LINE));
}

#[test]
fn unknown_option_is_a_usage_error() {
    let (code, stdout, stderr) = run_with_args([PROGRAM_NAME, "--frobnicate", "filters.yaml"]);

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(!stderr.is_empty());
}

#[test]
fn check_without_dot_is_rejected() {
    let error = match parse_args([PROGRAM_NAME, "--check", "title", "filters.yaml"]) {
        Ok(_) => panic!("parse should fail"),
        Err(error) => error,
    };

    assert_eq!(error.kind(), clap::error::ErrorKind::ValueValidation);
    assert!(
        error
            .to_string()
            .contains("expected RELATION.FIELD, found 'title'")
    );
}

#[test]
fn check_with_empty_half_is_rejected() {
    assert!(parse_field_key(".title").is_err());
    assert!(parse_field_key("article.").is_err());
}

#[test]
fn check_splits_at_first_dot() {
    let key = parse_field_key("article.meta.title").unwrap();
    assert_eq!(key.relation(), "article");
    assert_eq!(key.field(), "meta.title");
}

#[test]
fn parse_args_collects_repeated_checks() {
    let parsed = parse_args([
        PROGRAM_NAME,
        "-v",
        "--check",
        "article.title",
        "--check=comment.text",
        "filters.yaml",
    ])
    .unwrap();

    assert!(parsed.verbose);
    assert!(!parsed.containment);
    assert_eq!(
        parsed.checks,
        [
            FieldKey::new("article", "title"),
            FieldKey::new("comment", "text"),
        ]
    );
    assert_eq!(parsed.config, Some(PathBuf::from("filters.yaml")));
}

// ============================================================================
// Listing
// ============================================================================

#[test]
fn listing_follows_declaration_order() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, CONFIG);

    let (code, stdout, stderr) = run_on_config(&path, &[]);

    assert_eq!(code, 0, "stderr: {stderr}");
    assert_eq!(
        stdout,
        "article searchable=2 additional=1 config=2 relations=1 contains=-\n\
         comment searchable=1 additional=0 config=0 relations=0 contains=article\n\
         user searchable=1 additional=0 config=0 relations=0 contains=-\n"
    );
}

#[test]
fn empty_configuration_lists_nothing() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "{}\n");

    let (code, stdout, _) = run_on_config(&path, &[]);

    assert_eq!(code, 0);
    assert!(stdout.is_empty());
}

// ============================================================================
// Containment
// ============================================================================

#[test]
fn containment_lists_sorted_containers() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, CONFIG);

    let (code, stdout, _) = run_on_config(&path, &["--containment"]);

    assert_eq!(code, 0);
    assert_eq!(
        stdout,
        "article: article comment\ncomment: comment\nuser: user\n"
    );
}

// ============================================================================
// Checks
// ============================================================================

#[test]
fn checks_report_each_pair_in_argument_order() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, CONFIG);

    let (code, stdout, _) = run_on_config(
        &path,
        &[
            "--check",
            "article.title",
            "--check",
            "article.slug",
            "--check",
            "article.author",
            "--check",
            "article.body",
            "--check",
            "ghost.field",
        ],
    );

    assert_eq!(code, 0);
    assert_eq!(
        stdout,
        "article.title retained searchable=true type=- analyzer=english relation=-\n\
         article.slug retained searchable=false type=- analyzer=- relation=-\n\
         article.author dropped\n\
         article.body retained searchable=true type=text analyzer=- relation=-\n\
         ghost.field dropped\n"
    );
}

#[test]
fn containment_and_checks_combine() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, CONFIG);

    let (code, stdout, _) = run_on_config(&path, &["--containment", "--check", "user.name"]);

    assert_eq!(code, 0);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[3],
        "user.name retained searchable=true type=- analyzer=- relation=-"
    );
}

// ============================================================================
// Load failures
// ============================================================================

#[test]
fn missing_file_exits_with_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.yaml");

    let (code, stdout, stderr) = run_on_config(&path, &[]);

    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.starts_with("searchmeta-filters: error: failed to read filters from"));
}

#[test]
fn malformed_body_exits_with_config_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "article:\n  Searchable: 7\n");

    let (code, stdout, stderr) = run_on_config(&path, &[]);

    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("invalid filter 'article'"), "stderr: {stderr}");
}

#[test]
fn duplicate_filter_exits_with_config_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "article: {}\narticle: {}\n");

    let (code, stdout, stderr) = run_on_config(&path, &["--containment"]);

    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("duplicate"), "stderr: {stderr}");
}

// ============================================================================
// Exit codes
// ============================================================================

#[test]
fn exit_code_from_clamps_out_of_range_values() {
    use std::process::ExitCode;

    assert_eq!(exit_code_from(0), ExitCode::SUCCESS);
    assert_eq!(exit_code_from(-4), ExitCode::from(0));
    assert_eq!(exit_code_from(2), ExitCode::from(2));
    assert_eq!(exit_code_from(1024), ExitCode::from(255));
}
