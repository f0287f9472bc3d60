//! Hosted goal-setting assistant client.
//!
//! Sends a raw student record to a chat-completions endpoint and returns the
//! plan the assistant drafts. Unlike the local renderer this path has no
//! fallback: every failure is returned to the caller.

use navigator_abstraction::{ChatMessage, ServiceError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

/// Default base URL of the chat-completions API.
pub const DEFAULT_ASSISTANT_URL: &str = "https://api.openai.com/v1";

/// Default model used by the assistant.
pub const DEFAULT_ASSISTANT_MODEL: &str = "gpt-4o-mini";

/// System prompt that pins the assistant to plan output.
pub const ASSISTANT_SYSTEM_PROMPT: &str =
    "You are the MAP goal-setting assistant—produce only structured learning plans.";

/// Default request timeout in seconds.
pub const DEFAULT_ASSISTANT_TIMEOUT_SECS: u64 = 60;

/// Settings for the assistant client, usually read from the `[assistant]` config table.
///
/// Unset fields fall back to their defaults when the client is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantSettings {
    /// API key used as a bearer token.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model id.
    #[serde(default)]
    pub model: Option<String>,

    /// Optional hosted assistant id forwarded with every request.
    #[serde(default)]
    pub assistant_id: Option<String>,

    /// Base URL of the API.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl AssistantSettings {
    /// Merge another settings block into this one.
    pub fn merge(&mut self, other: &Self) {
        if let Some(ref key) = other.api_key {
            self.api_key = Some(key.clone());
        }
        if let Some(ref id) = other.assistant_id {
            self.assistant_id = Some(id.clone());
        }
        if let Some(ref model) = other.model {
            self.model = Some(model.clone());
        }
        if let Some(ref url) = other.base_url {
            self.base_url = Some(url.clone());
        }
        if let Some(timeout) = other.timeout_secs {
            self.timeout_secs = Some(timeout);
        }
    }

    /// Model id, defaulting to [`DEFAULT_ASSISTANT_MODEL`].
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_ASSISTANT_MODEL)
    }

    /// Base URL, defaulting to [`DEFAULT_ASSISTANT_URL`].
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_ASSISTANT_URL)
    }

    /// Request timeout in seconds.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_ASSISTANT_TIMEOUT_SECS)
    }
}

/// Client for the hosted goal-setting assistant.
#[derive(Debug, Clone)]
pub struct AssistantClient {
    api_key: String,
    settings: AssistantSettings,
    client: Client,
}

impl AssistantClient {
    /// Creates a new client from explicit settings.
    ///
    /// # Errors
    /// Returns `ServiceError::MissingCredentials` if no API key is configured.
    pub fn new(settings: AssistantSettings) -> Result<Self, ServiceError> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                ServiceError::MissingCredentials("assistant api_key is not set".to_string())
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs()))
            .build()
            .map_err(|e| ServiceError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { api_key, settings, client })
    }

    /// Returns the model id requests are sent with.
    pub fn model(&self) -> &str {
        self.settings.model()
    }

    /// Asks the assistant for a plan for one student record.
    ///
    /// # Arguments
    /// * `record` - The student record exactly as it was read from the data file
    ///
    /// # Errors
    /// Returns a `ServiceError` if the request fails or the reply has no content.
    pub async fn draft_plan(&self, record: &serde_json::Value) -> Result<String, ServiceError> {
        let payload = serde_json::to_string(record)
            .map_err(|e| ServiceError::SerializationError(e.to_string()))?;

        let messages = vec![ChatMessage::system(ASSISTANT_SYSTEM_PROMPT), ChatMessage::user(payload)];

        debug!(
            model = %self.settings.model(),
            message_count = messages.len(),
            "Requesting plan from assistant"
        );

        let url = format!("{}/chat/completions", self.settings.base_url().trim_end_matches('/'));
        let request_body = CompletionRequest {
            model: self.settings.model().to_string(),
            assistant_id: self.settings.assistant_id.clone(),
            messages,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to send request to assistant API");
                ServiceError::RequestError(format!("Network error: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %error_text, "Assistant API returned error status");
            return Err(ServiceError::ResponseError(format!(
                "API error ({}): {}",
                status, error_text
            )));
        }

        let body: CompletionResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to parse assistant API response");
            ServiceError::SerializationError(format!("Failed to parse response: {}", e))
        })?;

        body.choices.into_iter().next().map(|c| c.message.content).ok_or_else(|| {
            error!("No content in assistant API response");
            ServiceError::ResponseError("No content in API response".to_string())
        })
    }
}

// Chat-completions request/response structures

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    assistant_id: Option<String>,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ChatMessage,
}
