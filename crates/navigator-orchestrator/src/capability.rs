// Capability abstractions for orchestration
//
// A capability is a named, described unit of asynchronous work that an agent
// can delegate to. Agents themselves become capabilities by wrapping
// (see `Agent::as_capability`).

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

use crate::error::Result;

/// Handler for capability execution
#[async_trait]
pub trait CapabilityHandler: Send + Sync {
    /// Handle a message
    ///
    /// # Arguments
    /// * `message` - The input message
    ///
    /// # Returns
    /// The text produced by the handler
    async fn call(&self, message: &str) -> Result<String>;
}

/// Adapter that turns an async closure into a `CapabilityHandler`
pub struct FnHandler<F> {
    func: F,
}

#[async_trait]
impl<F, Fut> CapabilityHandler for FnHandler<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String>> + Send,
{
    async fn call(&self, message: &str) -> Result<String> {
        (self.func)(message.to_string()).await
    }
}

/// Wrap an async closure as a shareable handler
pub fn handler_fn<F, Fut>(func: F) -> Arc<dyn CapabilityHandler>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<String>> + Send + 'static,
{
    Arc::new(FnHandler { func })
}

/// Capability definition
///
/// Immutable once constructed; cloning shares the handler.
#[derive(Clone)]
pub struct Capability {
    name: String,
    description: String,
    handler: Arc<dyn CapabilityHandler>,
}

impl Capability {
    /// Create a new capability
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: Arc<dyn CapabilityHandler>,
    ) -> Self {
        Self { name: name.into(), description: description.into(), handler }
    }

    /// Create a capability from an async closure
    pub fn from_fn<F, Fut>(name: impl Into<String>, description: impl Into<String>, func: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String>> + Send + 'static,
    {
        Self::new(name, description, handler_fn(func))
    }

    /// Capability name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Capability description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Invoke this capability with a message
    pub async fn invoke(&self, message: &str) -> Result<String> {
        self.handler.call(message).await
    }
}

// Implement Debug manually since Arc<dyn CapabilityHandler> doesn't implement Debug
impl std::fmt::Debug for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capability")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("handler", &"<handler>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OrchestrationError;

    struct UppercaseHandler;

    #[async_trait]
    impl CapabilityHandler for UppercaseHandler {
        async fn call(&self, message: &str) -> Result<String> {
            Ok(message.to_uppercase())
        }
    }

    #[tokio::test]
    async fn test_capability_invoke() {
        let capability = Capability::new("shout", "Uppercases input", Arc::new(UppercaseHandler));

        assert_eq!(capability.name(), "shout");
        assert_eq!(capability.description(), "Uppercases input");
        assert_eq!(capability.invoke("plan").await.unwrap(), "PLAN");
    }

    #[tokio::test]
    async fn test_capability_from_fn() {
        let capability =
            Capability::from_fn("echo", "Echoes input", |message| async move { Ok(format!("echo: {}", message)) });

        assert_eq!(capability.invoke("hi").await.unwrap(), "echo: hi");
    }

    #[tokio::test]
    async fn test_capability_error_passes_through() {
        let capability = Capability::from_fn("broken", "Always fails", |_message| async {
            Err(OrchestrationError::TaskFailed("boom".to_string()))
        });

        let err = capability.invoke("hi").await.unwrap_err();
        assert!(matches!(err, OrchestrationError::TaskFailed(ref m) if m == "boom"));
    }

    #[test]
    fn test_capability_debug_hides_handler() {
        let capability = Capability::new("shout", "Uppercases input", Arc::new(UppercaseHandler));
        let debug = format!("{:?}", capability);
        assert!(debug.contains("shout"));
        assert!(debug.contains("<handler>"));
    }
}
