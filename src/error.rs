use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConversionError>;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid {field} coordinate '{value}' in {} at line {line}", path.display())]
    InvalidCoordinate {
        path: PathBuf,
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("Session root not found or not a directory: {}", path.display())]
    MissingRoot { path: PathBuf },

    #[error("Fixed point error: {0}")]
    FixedPoints(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
}

impl ConversionError {
    pub fn is_invalid_coordinate(&self) -> bool {
        matches!(self, ConversionError::InvalidCoordinate { .. })
    }
}
