//! Errors for the probe and the command-line tool
//!
//! The decider itself cannot fail. Everything here comes from reading input, loading
//! configuration or formatting output.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] asi_config::ConfigError),

    #[error("invalid included range '{0}': expected START..END with START <= END")]
    InvalidRange(String),

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ProbeError> for String {
    fn from(err: ProbeError) -> Self {
        err.to_string()
    }
}
