use std::path::PathBuf;
use thiserror::Error;

use crate::types::FieldErrors;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("User not found")]
    NotFound(u64),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Validation failed")]
    ValidationFailed,

    #[error("Unexpected response status {0}")]
    Status(u16),

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Invalid base URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("{0}")]
    ActionFailed(String),

    #[error("Submission rejected ({0} field error(s))")]
    Rejected(usize),
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
