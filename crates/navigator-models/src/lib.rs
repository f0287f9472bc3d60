//! HTTP-backed collaborators for the Goal Navigator.
//!
//! # Supported Services
//!
//! - **Google Custom Search**: short snippets used to enrich a plan (API key and engine id required)
//! - **Hosted assistant**: a chat-completions endpoint that drafts a plan from raw student data (API key required)

pub mod assistant;
pub mod search;

pub use assistant::{AssistantClient, AssistantSettings};
pub use search::{GoogleSearchClient, SearchSettings};
