//! Agent runner.
//!
//! The runner is the uniform entry point used by every caller: it executes an
//! agent once and wraps the single value it returns into an [`ExecutionResult`].

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::agent::Agent;
use crate::error::Result;

/// A message produced by an agent run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducedMessage {
    /// The message content.
    pub content: String,
}

/// Execution result for an agent run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Messages produced by the run, in order. A run currently produces exactly one.
    pub produced_messages: Vec<ProducedMessage>,
}

impl ExecutionResult {
    /// Creates a result holding a single message.
    pub fn single(content: impl Into<String>) -> Self {
        Self { produced_messages: vec![ProducedMessage { content: content.into() }] }
    }

    /// Returns the content of the last produced message.
    pub fn final_output(&self) -> Option<&str> {
        self.produced_messages.last().map(|m| m.content.as_str())
    }
}

/// Runs agents and normalizes their output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Runner;

impl Runner {
    /// Executes `agent` with `message`.
    ///
    /// # Errors
    /// Returns the agent's error unchanged; there is no retry.
    pub async fn run(agent: &Agent, message: &str) -> Result<ExecutionResult> {
        info!(agent = %agent.name(), "Running agent");

        let content = agent.execute(message).await?;

        Ok(ExecutionResult::single(content))
    }
}
