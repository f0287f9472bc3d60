//! Collaborator abstraction layer for the Goal Navigator.
//!
//! This crate defines the narrow interfaces the planning core consumes from the
//! outside world: reference documents that hold RIT range tables, and short
//! search snippets used to enrich a finished plan.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Represents an error that can occur when talking to an external service.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceError {
    /// An error occurred while sending the request (e.g., network issues, timeout).
    #[error("Request Error: {0}")]
    RequestError(String),

    /// The service answered with a non-success status or an unusable body.
    #[error("Service Response Error: {0}")]
    ResponseError(String),

    /// An error occurred during serialization or deserialization.
    #[error("Serialization Error: {0}")]
    SerializationError(String),

    /// Credentials required by the service are not configured.
    #[error("Missing Credentials: {0}")]
    MissingCredentials(String),

    /// Other unexpected errors.
    #[error("Other Service Error: {0}")]
    Other(String),
}

/// Represents a message in a conversation with a chat service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the message sender (e.g., "user", "assistant", "system").
    pub role: String,
    /// The content of the message.
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

/// Outcome of loading a reference document.
///
/// Every way a document can fail to load (not found, unreadable, extraction
/// failed) is folded into `Unavailable`; callers never learn which one it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableDocument {
    /// The document was found and its text extracted.
    Available(String),
    /// No text could be obtained for the requested identifier.
    Unavailable,
}

impl TableDocument {
    /// Returns the extracted text if the document is available.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Available(text) => Some(text),
            Self::Unavailable => None,
        }
    }

    /// Returns `true` if the document could be loaded.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

/// A source of reference documents keyed by a filename-shaped identifier.
///
/// Implementations are read-only and are consulted once per lookup.
pub trait TableSource: Send + Sync {
    /// Loads the document for `identifier`.
    fn load(&self, identifier: &str) -> TableDocument;
}

/// A trait for services that return short text snippets for a query.
#[async_trait]
pub trait SnippetSource: Send + Sync {
    /// Fetches snippets relevant to `query`.
    ///
    /// # Errors
    /// Returns a `ServiceError` if credentials are missing or the request fails.
    async fn fetch(&self, query: &str) -> Result<Vec<String>, ServiceError>;
}
