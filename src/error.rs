use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("command #{index}: {reason}")]
    InvalidCommand { index: usize, reason: String },

    #[error("duplicate command id `{0}`")]
    DuplicateId(String),

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
