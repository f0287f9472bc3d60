// Error types for orchestration

use thiserror::Error;

/// Result type for orchestration operations
pub type Result<T> = std::result::Result<T, OrchestrationError>;

/// Orchestration errors
///
/// Errors raised by a capability handler or a primary task travel through
/// `Agent::execute` and `Runner::run` untouched.
#[derive(Debug, Error)]
pub enum OrchestrationError {
    /// Capability execution failed
    #[error("Capability '{capability}' failed: {reason}")]
    CapabilityFailed {
        /// Capability name
        capability: String,
        /// Reason for the failure
        reason: String,
    },

    /// Primary task failed
    #[error("Task failed: {0}")]
    TaskFailed(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other error
    #[error("Orchestration error: {0}")]
    Other(String),
}
