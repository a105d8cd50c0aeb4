// src/github/input.rs
use crate::utils::AppError;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Variable holding the Markdown issue body.
pub const ISSUE_BODY_VAR: &str = "ISSUE_BODY";
/// Variable naming the workflow environment file.
pub const GITHUB_ENV_VAR: &str = "GITHUB_ENV";

/// Parses `### NAME` sections of a GitHub issue body into workflow variables.
///
/// Every option is read from the environment; the flags only mirror it for local runs.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Markdown issue body to parse
    #[arg(long, env = ISSUE_BODY_VAR, hide_env_values = true)]
    pub issue_body: Option<String>,

    /// Workflow environment file to append NAME=VALUE lines to
    // Raw OsString: an empty value must reach `Input::from_args` and mean "absent".
    #[arg(long, env = GITHUB_ENV_VAR)]
    pub github_env: Option<OsString>,
}

/// Validated input for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub document: String,
    pub env_file: Option<PathBuf>,
}

impl Input {
    /// Rejects a missing or empty issue body; an empty env-file path counts as absent.
    pub fn from_args(args: Args) -> Result<Self, AppError> {
        let document = args
            .issue_body
            .filter(|body| !body.is_empty())
            .ok_or_else(|| AppError::MissingInput(ISSUE_BODY_VAR.to_string()))?;

        let env_file = args
            .github_env
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        tracing::debug!(
            "Input: {} byte issue body, env file {:?}",
            document.len(),
            env_file
        );
        Ok(Self { document, env_file })
    }
}
