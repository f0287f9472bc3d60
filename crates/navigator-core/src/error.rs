//! Error types for the navigator core.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for plan generation.
///
/// Missing reference tables and failed enrichment are not errors: they degrade
/// to placeholder text and never reach this type.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The student data file does not exist
    #[error("Data file {} not found.", .0.display())]
    DataFileNotFound(PathBuf),

    /// The student data file is not valid JSON of the expected shape
    #[error("Invalid student data: {0}")]
    InvalidStudentData(#[from] serde_json::Error),

    /// A reference document could not be turned into text
    #[error("Failed to extract text from {}: {reason}", .path.display())]
    TableExtraction {
        /// Document path
        path: PathBuf,
        /// Reason for the failure
        reason: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Orchestration errors
    #[error(transparent)]
    Orchestration(#[from] navigator_orchestrator::OrchestrationError),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

impl From<CoreError> for navigator_orchestrator::OrchestrationError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Orchestration(inner) => inner,
            CoreError::Io(io) => Self::Io(io),
            CoreError::InvalidStudentData(json) => Self::Json(json),
            other => Self::TaskFailed(other.to_string()),
        }
    }
}
