// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

// Errors raised while writing to the runner-facing outputs
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    /// The named input variable is absent or empty.
    #[error("Missing input: {0} environment variable is not set or empty")]
    MissingInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // stdout write failures

    #[error("Output sink failed: {0}")]
    Sink(#[from] SinkError),
}
