// src/main.rs
mod extractors;
mod github;
mod sinks;
mod utils;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use extractors::section::SectionExtractor;
use github::input::{GITHUB_ENV_VAR, ISSUE_BODY_VAR};
use github::{Args, Input};
use sinks::EnvFileSink;
use utils::AppError;

/// What a run did with the extracted fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub fields: usize,
    /// Lines appended to the env file, `None` when no env file was configured.
    pub env_lines: Option<usize>,
}

/// Extracts the fields and writes every runner-facing line to `out`.
///
/// A missing env file only degrades to a status message; the JSON step output
/// is written either way.
fn run<W: Write>(input: &Input, out: &mut W) -> Result<RunReport, AppError> {
    let fields = SectionExtractor::new().extract(&input.document);
    if fields.is_empty() {
        tracing::info!("No usable '### NAME' sections found in issue body");
    } else {
        tracing::debug!("Parsed field names: {:?}", fields.names().collect::<Vec<_>>());
    }

    let env_lines = match &input.env_file {
        Some(path) => {
            let written = EnvFileSink::new(path).append(&fields)?;
            writeln!(out, "Successfully injected parsed variables into {}.", GITHUB_ENV_VAR)?;
            Some(written)
        }
        None => {
            tracing::warn!("{} is not set; skipping env file injection", GITHUB_ENV_VAR);
            writeln!(
                out,
                "{} environment variable not found. Cannot inject variables.",
                GITHUB_ENV_VAR
            )?;
            None
        }
    };

    sinks::write_step_output(out, &fields)?;

    Ok(RunReport {
        fields: fields.len(),
        env_lines,
    })
}

/// Process exit status for a successful run, including "no fields found".
const EXIT_SUCCESS: u8 = 0;
/// Process exit status for missing input or a failed env-file write.
const EXIT_FAILURE: u8 = 1;

/// Validates the configuration, runs the extraction and maps the outcome to an exit status.
/// Every diagnostic meant for the workflow log is written to `out`.
fn execute<W: Write>(args: Args, out: &mut W) -> u8 {
    let input = match Input::from_args(args) {
        Ok(input) => input,
        Err(e) => {
            tracing::error!("{}", e);
            let _ = writeln!(
                out,
                "Error: {} environment variable is not set or empty.",
                ISSUE_BODY_VAR
            );
            return EXIT_FAILURE;
        }
    };

    match run(&input, out) {
        Ok(report) => {
            tracing::info!(
                "Processing finished. Fields: {}, env lines: {:?}",
                report.fields,
                report.env_lines
            );
            EXIT_SUCCESS
        }
        Err(e) => {
            tracing::error!("Failed to publish parsed fields: {}", e);
            let _ = writeln!(out, "Error: {}", e);
            EXIT_FAILURE
        }
    }
}

fn main() -> ExitCode {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Read configuration from the environment
    let args = Args::parse();

    // 3. Extract and publish
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    ExitCode::from(execute(args, &mut out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn execute_to_string(args: Args) -> (u8, String) {
        let mut out = Vec::new();
        let status = execute(args, &mut out);
        (status, String::from_utf8(out).unwrap())
    }

    fn run_to_string(input: &Input) -> (Result<RunReport, AppError>, String) {
        let mut out = Vec::new();
        let result = run(input, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_run_with_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("github_env");
        let input = Input {
            document: "### A\nline1\nline2\n### B\nval".to_string(),
            env_file: Some(path.clone()),
        };

        let (result, stdout) = run_to_string(&input);

        assert_eq!(
            result.unwrap(),
            RunReport {
                fields: 2,
                env_lines: Some(2)
            }
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "A=line1 line2\nB=val\n");
        // Compact serde_json encoding, no spaces after separators and no ASCII escaping.
        assert_eq!(
            stdout,
            "Successfully injected parsed variables into GITHUB_ENV.\n\
             ::set-output name=parsed_json::{\"A\":\"line1\\nline2\",\"B\":\"val\"}\n"
        );
    }

    #[test]
    fn test_run_without_env_file_still_prints_json() {
        let input = Input {
            document: "### A\nx".to_string(),
            env_file: None,
        };

        let (result, stdout) = run_to_string(&input);

        assert_eq!(result.unwrap().env_lines, None);
        assert_eq!(
            stdout,
            "GITHUB_ENV environment variable not found. Cannot inject variables.\n\
             ::set-output name=parsed_json::{\"A\":\"x\"}\n"
        );
    }

    #[test]
    fn test_run_without_headings_succeeds_with_empty_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("github_env");
        let input = Input {
            document: "no headings here".to_string(),
            env_file: Some(path.clone()),
        };

        let (result, stdout) = run_to_string(&input);

        let report = result.unwrap();
        assert_eq!(report.fields, 0);
        assert_eq!(report.env_lines, Some(0));
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
        assert!(stdout.ends_with("::set-output name=parsed_json::{}\n"), "stdout was: {}", stdout);
    }

    #[test]
    fn test_run_reports_unwritable_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = Input {
            document: "### A\nx".to_string(),
            env_file: Some(PathBuf::from(dir.path()).join("missing").join("env")),
        };

        let (result, _) = run_to_string(&input);

        assert!(matches!(result, Err(AppError::Sink(_))));
    }

    #[test]
    fn test_execute_missing_input_prints_diagnostic_and_fails() {
        let (status, stdout) = execute_to_string(Args::default());

        assert_eq!(status, EXIT_FAILURE);
        assert_eq!(stdout, "Error: ISSUE_BODY environment variable is not set or empty.\n");
    }

    #[test]
    fn test_execute_empty_env_file_is_not_fatal() {
        let args = Args::try_parse_from([
            "issue_body_parser",
            "--issue-body",
            "### A\nx",
            "--github-env",
            "",
        ])
        .unwrap();

        let (status, stdout) = execute_to_string(args);

        assert_eq!(status, EXIT_SUCCESS);
        assert_eq!(
            stdout,
            "GITHUB_ENV environment variable not found. Cannot inject variables.\n\
             ::set-output name=parsed_json::{\"A\":\"x\"}\n"
        );
    }

    #[test]
    fn test_execute_sink_failure_exits_non_zero() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args {
            issue_body: Some("### A\nx".to_string()),
            github_env: Some(dir.path().join("missing").join("env").into_os_string()),
        };

        let (status, stdout) = execute_to_string(args);

        assert_eq!(status, EXIT_FAILURE);
        assert!(stdout.starts_with("Error: Output sink failed:"), "stdout was: {}", stdout);
    }

    #[test]
    fn test_execute_success_exits_zero() {
        let args = Args {
            issue_body: Some("no headings".to_string()),
            github_env: None,
        };

        let (status, _) = execute_to_string(args);

        assert_eq!(status, EXIT_SUCCESS);
    }
}
