use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DilemmaError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("CSV error in {path:?} line {line}: {message}")]
    Csv {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, DilemmaError>;
