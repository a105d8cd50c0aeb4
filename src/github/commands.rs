// src/github/commands.rs
//! Line formats understood by the GitHub Actions runner.

/// Step output name carrying the JSON encoding of all fields.
pub const PARSED_JSON_OUTPUT: &str = "parsed_json";

/// Formats one `NAME=VALUE` line for the workflow environment file.
///
/// The env file is line based: `\n` becomes a space and `\r` is dropped, so a
/// CRLF break also collapses to one space. Nothing else is escaped; a value
/// containing `=` or other markup is written as is.
pub fn format_env_line(name: &str, value: &str) -> String {
    let flattened: String = value
        .chars()
        .filter(|&c| c != '\r')
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();
    format!("{}={}", name, flattened)
}

/// Formats the legacy `::set-output` workflow command.
pub fn format_set_output(name: &str, value: &str) -> String {
    format!("::set-output name={}::{}", name, value)
}
