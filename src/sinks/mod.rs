// src/sinks/mod.rs
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::extractors::section::ParsedFields;
use crate::github::commands::{format_env_line, format_set_output, PARSED_JSON_OUTPUT};
use crate::utils::error::SinkError;

/// Appends parsed fields to the workflow environment file.
pub struct EnvFileSink {
    path: PathBuf,
}

impl EnvFileSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Appends one `NAME=VALUE` line per field, in mapping order.
    /// The file is created if it does not exist yet. Returns the number of lines written.
    pub fn append(&self, fields: &ParsedFields) -> Result<usize, SinkError> {
        let io_err = |source| SinkError::Io {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;

        // Build everything first so the file receives a single write.
        let mut buf = String::new();
        for (name, value) in fields {
            buf.push_str(&format_env_line(name, value));
            buf.push('\n');
        }
        file.write_all(buf.as_bytes()).map_err(io_err)?;
        file.flush().map_err(io_err)?;

        tracing::info!("Appended {} variable(s) to {}", fields.len(), self.path.display());
        Ok(fields.len())
    }
}

/// Writes the `parsed_json` step output line carrying every field as JSON.
pub fn write_step_output<W: Write>(out: &mut W, fields: &ParsedFields) -> Result<(), SinkError> {
    let json = serde_json::to_string(fields)?;
    writeln!(out, "{}", format_set_output(PARSED_JSON_OUTPUT, &json)).map_err(|source| {
        SinkError::Io {
            path: PathBuf::from("<stdout>"),
            source,
        }
    })?;
    Ok(())
}
