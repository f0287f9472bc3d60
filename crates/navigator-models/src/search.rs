//! Google Custom Search snippet client.
//!
//! This module provides an implementation of the `SnippetSource` trait backed by
//! the Custom Search JSON API.

use async_trait::async_trait;
use navigator_abstraction::{ServiceError, SnippetSource};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

/// Default endpoint of the Custom Search JSON API.
pub const DEFAULT_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// The API never returns more than ten results per page.
const MAX_RESULTS_PER_PAGE: usize = 10;

/// Default request timeout in seconds.
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 10;

/// Default number of snippets kept from a response.
pub const DEFAULT_MAX_SNIPPETS: usize = 3;

/// Settings for the search client, usually read from the `[search]` config table.
///
/// Every field is optional so that a later config file can set any of them,
/// including back to its default. Defaults apply at the point of use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// API key for the Custom Search JSON API.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Programmable search engine id (`cx`).
    #[serde(default)]
    pub engine_id: Option<String>,

    /// Endpoint URL.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Maximum number of snippets kept from a response.
    #[serde(default)]
    pub max_snippets: Option<usize>,
}

impl SearchSettings {
    /// Merge another settings block into this one.
    ///
    /// Values from `other` override values in `self` if they are set.
    pub fn merge(&mut self, other: &Self) {
        if let Some(ref key) = other.api_key {
            self.api_key = Some(key.clone());
        }
        if let Some(ref engine) = other.engine_id {
            self.engine_id = Some(engine.clone());
        }
        if let Some(ref url) = other.base_url {
            self.base_url = Some(url.clone());
        }
        if let Some(timeout) = other.timeout_secs {
            self.timeout_secs = Some(timeout);
        }
        if let Some(max) = other.max_snippets {
            self.max_snippets = Some(max);
        }
    }

    /// Endpoint URL, defaulting to [`DEFAULT_SEARCH_URL`].
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_SEARCH_URL)
    }

    /// Request timeout in seconds.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_SEARCH_TIMEOUT_SECS)
    }

    /// Maximum number of snippets kept from a response.
    pub fn max_snippets(&self) -> usize {
        self.max_snippets.unwrap_or(DEFAULT_MAX_SNIPPETS)
    }

    /// Returns `true` when both the API key and the engine id are present.
    pub fn has_credentials(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
            && self.engine_id.as_deref().is_some_and(|e| !e.is_empty())
    }
}

/// Snippet source backed by Google Custom Search.
#[derive(Debug, Clone)]
pub struct GoogleSearchClient {
    settings: SearchSettings,
    client: Client,
}

impl GoogleSearchClient {
    /// Creates a new client from explicit settings.
    ///
    /// Missing credentials are not an error here; they surface on `fetch`.
    ///
    /// # Errors
    /// Returns a `ServiceError` if the HTTP client cannot be built.
    pub fn new(settings: SearchSettings) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs()))
            .build()
            .map_err(|e| ServiceError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { settings, client })
    }

    /// Returns the settings this client was built with.
    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }
}

#[async_trait]
impl SnippetSource for GoogleSearchClient {
    async fn fetch(&self, query: &str) -> Result<Vec<String>, ServiceError> {
        let api_key = self.settings.api_key.as_deref().filter(|k| !k.is_empty());
        let engine_id = self.settings.engine_id.as_deref().filter(|e| !e.is_empty());
        let (Some(api_key), Some(engine_id)) = (api_key, engine_id) else {
            return Err(ServiceError::MissingCredentials(
                "search api_key and engine_id must both be set".to_string(),
            ));
        };

        let num = self.settings.max_snippets().clamp(1, MAX_RESULTS_PER_PAGE).to_string();

        debug!(query = %query, num = %num, "Fetching search snippets");

        let response = self
            .client
            .get(self.settings.base_url())
            .query(&[("key", api_key), ("cx", engine_id), ("q", query), ("num", num.as_str())])
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to send request to search API");
                ServiceError::RequestError(format!("Network error: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %error_text, "Search API returned error status");
            return Err(ServiceError::ResponseError(format!(
                "API error ({}): {}",
                status, error_text
            )));
        }

        let body: SearchResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to parse search API response");
            ServiceError::SerializationError(format!("Failed to parse response: {}", e))
        })?;

        let snippets: Vec<String> = body
            .items
            .into_iter()
            .filter_map(|item| item.snippet)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .take(self.settings.max_snippets())
            .collect();

        debug!(count = snippets.len(), "Search snippets received");

        Ok(snippets)
    }
}

// Custom Search API response structures

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    snippet: Option<String>,
}
