//! Agent implementation.
//!
//! An agent either runs its own primary task or delegates to the first
//! capability registered on it. Agents compose only by wrapping: an agent is
//! exposed as a capability of another agent through [`Agent::as_capability`].

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error};

use crate::capability::{Capability, CapabilityHandler, handler_fn};
use crate::error::Result;

/// The path `Agent::execute` takes for a given agent configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionRoute {
    /// The agent's own primary task runs.
    PrimaryTask,
    /// The capability with this name (always the first registered one) runs.
    Capability(String),
    /// Nothing is configured; the instructions are echoed back with the message.
    Fallback,
}

/// A named agent with optional primary task and ordered capabilities.
#[derive(Clone)]
pub struct Agent {
    /// The agent's name.
    name: String,
    /// Instructions describing what the agent is for.
    instructions: String,
    /// Registered capabilities, in registration order.
    capabilities: Vec<Capability>,
    /// Task that runs instead of any capability when set.
    primary_task: Option<Arc<dyn CapabilityHandler>>,
}

impl Agent {
    /// Creates a new agent with no primary task and no capabilities.
    ///
    /// # Arguments
    /// * `name` - The agent name
    /// * `instructions` - The agent instructions
    pub fn new(name: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            capabilities: Vec::new(),
            primary_task: None,
        }
    }

    /// Registers a capability after the ones already present.
    #[must_use]
    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.push(capability);
        self
    }

    /// Registers several capabilities in order.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: impl IntoIterator<Item = Capability>) -> Self {
        self.capabilities.extend(capabilities);
        self
    }

    /// Sets the primary task.
    #[must_use]
    pub fn with_primary_task(mut self, task: Arc<dyn CapabilityHandler>) -> Self {
        self.primary_task = Some(task);
        self
    }

    /// Sets the primary task from an async closure.
    #[must_use]
    pub fn with_task_fn<F, Fut>(self, func: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String>> + Send + 'static,
    {
        self.with_primary_task(handler_fn(func))
    }

    /// Returns the agent name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the agent instructions.
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Returns the registered capabilities.
    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    /// Returns `true` if a primary task is set.
    pub fn has_primary_task(&self) -> bool {
        self.primary_task.is_some()
    }

    /// Returns the route `execute` will take.
    ///
    /// Only the first capability is ever reachable; later ones are registered
    /// but never selected.
    pub fn route(&self) -> ExecutionRoute {
        if self.primary_task.is_some() {
            ExecutionRoute::PrimaryTask
        } else if let Some(first) = self.capabilities.first() {
            ExecutionRoute::Capability(first.name().to_string())
        } else {
            ExecutionRoute::Fallback
        }
    }

    /// Builds the response returned when neither a task nor a capability is set.
    pub fn fallback_response(&self, message: &str) -> String {
        format!("{}\nUser message: {}", self.instructions, message)
    }

    /// Executes the agent with the given message.
    ///
    /// The primary task wins over capabilities; otherwise the first capability
    /// runs; otherwise the fallback response is returned. Errors from the
    /// chosen handler are returned unchanged.
    pub async fn execute(&self, message: &str) -> Result<String> {
        debug!(
            agent = %self.name,
            route = ?self.route(),
            input_len = message.len(),
            "Agent executing"
        );

        let result = if let Some(task) = &self.primary_task {
            task.call(message).await
        } else if let Some(capability) = self.capabilities.first() {
            capability.invoke(message).await
        } else {
            Ok(self.fallback_response(message))
        };

        match &result {
            Ok(output) => debug!(agent = %self.name, output_len = output.len(), "Agent completed"),
            Err(e) => error!(agent = %self.name, error = %e, "Agent execution failed"),
        }

        result
    }

    /// Exposes this agent as a capability of another agent.
    ///
    /// The capability's handler calls [`Agent::execute`] on a snapshot of this
    /// agent and returns its result unchanged.
    pub fn as_capability(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Capability {
        Capability::new(name, description, Arc::new(AgentCapabilityHandler { agent: Arc::new(self.clone()) }))
    }
}

// Implement Debug manually since the primary task is a trait object
impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("instructions", &self.instructions)
            .field("capabilities", &self.capabilities)
            .field("primary_task", &self.primary_task.as_ref().map(|_| "<task>"))
            .finish()
    }
}

/// Handler backing `Agent::as_capability`
struct AgentCapabilityHandler {
    agent: Arc<Agent>,
}

#[async_trait]
impl CapabilityHandler for AgentCapabilityHandler {
    async fn call(&self, message: &str) -> Result<String> {
        self.agent.execute(message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OrchestrationError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_capability(name: &str, counter: Arc<AtomicUsize>) -> Capability {
        let label = name.to_string();
        Capability::from_fn(name, "counts calls", move |message| {
            let counter = Arc::clone(&counter);
            let label = label.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(format!("{}:{}", label, message))
            }
        })
    }

    #[tokio::test]
    async fn test_primary_task_takes_priority() {
        let calls = Arc::new(AtomicUsize::new(0));
        let agent = Agent::new("planner", "Plan things")
            .with_capability(counting_capability("tool", Arc::clone(&calls)))
            .with_task_fn(|message| async move { Ok(format!("task:{}", message)) });

        assert_eq!(agent.route(), ExecutionRoute::PrimaryTask);
        assert_eq!(agent.execute("go").await.unwrap(), "task:go");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_delegates_to_first_capability_only() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let agent = Agent::new("manager", "Use the tools")
            .with_capability(counting_capability("first", Arc::clone(&first)))
            .with_capability(counting_capability("second", Arc::clone(&second)));

        assert_eq!(agent.route(), ExecutionRoute::Capability("first".to_string()));
        assert_eq!(agent.execute("go").await.unwrap(), "first:go");
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fallback_response() {
        let agent = Agent::new("idle", "You are the NWEA Goal Navigator.");

        assert_eq!(agent.route(), ExecutionRoute::Fallback);
        assert_eq!(
            agent.execute("hello").await.unwrap(),
            "You are the NWEA Goal Navigator.\nUser message: hello"
        );
    }

    #[tokio::test]
    async fn test_fallback_with_empty_message() {
        let agent = Agent::new("idle", "Instructions");
        assert_eq!(agent.execute("").await.unwrap(), "Instructions\nUser message: ");
    }

    #[tokio::test]
    async fn test_as_capability_returns_execute_result() {
        let inner = Agent::new("inner", "unused").with_task_fn(|message| async move { Ok(message.repeat(2)) });
        let capability = inner.as_capability("double", "Doubles the message");

        assert_eq!(capability.name(), "double");
        assert_eq!(capability.description(), "Doubles the message");
        assert_eq!(capability.invoke("ab").await.unwrap(), "abab");
    }

    #[tokio::test]
    async fn test_wrapped_fallback_agent() {
        let inner = Agent::new("inner", "Inner instructions");
        let outer = Agent::new("outer", "Outer instructions")
            .with_capability(inner.as_capability("inner_tool", "Inner agent"));

        assert_eq!(outer.execute("msg").await.unwrap(), "Inner instructions\nUser message: msg");
    }

    #[tokio::test]
    async fn test_task_error_propagates_unchanged() {
        let agent = Agent::new("broken", "fails").with_task_fn(|_message| async {
            Err(OrchestrationError::CapabilityFailed {
                capability: "collector".to_string(),
                reason: "input closed".to_string(),
            })
        });

        let err = agent.execute("go").await.unwrap_err();
        match err {
            OrchestrationError::CapabilityFailed { capability, reason } => {
                assert_eq!(capability, "collector");
                assert_eq!(reason, "input closed");
            }
            other => panic!("Expected CapabilityFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_builder_accessors() {
        let agent = Agent::new("a", "b").with_capabilities(vec![
            Capability::from_fn("x", "first", |m| async move { Ok(m) }),
            Capability::from_fn("y", "second", |m| async move { Ok(m) }),
        ]);

        assert_eq!(agent.name(), "a");
        assert_eq!(agent.instructions(), "b");
        assert_eq!(agent.capabilities().len(), 2);
        assert!(!agent.has_primary_task());
    }
}
