//! Error types for runstat

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while processing run logs
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("The file or directory does not exist: {}", .0.display())]
    MissingPath(PathBuf),

    #[error("Weight must be a positive number of kilograms, got {0}")]
    InvalidWeight(f64),

    #[error("No saved report named {0}")]
    UnknownReport(String),
}
