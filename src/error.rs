//! Run-level errors. Anything in here ends the run without writing results.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot access '{}': {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Non-numeric value '{value}' in column '{column}' at line {line}")]
    Parse { line: u64, column: String, value: String },
    #[error("Dataset has {found} columns, at least {required} are needed")]
    TooFewColumns { found: usize, required: usize },
    #[error("Duplicate variable name '{0}'")]
    DuplicateVariable(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("Failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to replace '{}': {source}", path.display())]
    Persist { path: PathBuf, source: std::io::Error },
}

impl ScanError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScanError::Io { path: path.into(), source }
    }
}
