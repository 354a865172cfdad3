//! Executor abstraction layer
//!
//! The coordinator dispatches through these traits and knows nothing about
//! how an answer gets produced: the local executor may load and run an
//! on-device model, the cloud executor may make a network call. Inference
//! mechanics, timeouts, and cancellation all live behind the trait.

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by an executor.
///
/// Opaque to routing: the coordinator only decides whether to consume its
/// single fallback retry, never inspects the cause.
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// Executor cannot accept work right now (model unloaded, endpoint down)
    #[error("Executor unavailable: {0}")]
    Unavailable(String),

    /// Execution started but failed
    #[error("Execution failed: {0}")]
    Failed(String),

    /// Executor-enforced deadline elapsed
    #[error("Execution timed out after {0}ms")]
    Timeout(u64),
}

/// On-device execution seam.
///
/// # Object Safety
///
/// Object-safe and designed to be used as `Arc<dyn LocalExecutor>`.
///
/// # Cancellation Safety
///
/// Dropping the returned future must abort the in-flight inference;
/// timeout enforcement is the implementation's responsibility.
#[async_trait]
pub trait LocalExecutor: Send + Sync + 'static {
    /// Run the prompt on the named local model and return the response text.
    async fn execute_local(&self, prompt: &str, model: &str) -> Result<String, ExecutorError>;
}

/// Cloud execution seam.
///
/// Same contract as [`LocalExecutor`]; the network call and its
/// authentication are entirely the implementation's concern.
#[async_trait]
pub trait CloudExecutor: Send + Sync + 'static {
    /// Run the prompt on the named cloud model and return the response text.
    async fn execute_cloud(&self, prompt: &str, model: &str) -> Result<String, ExecutorError>;
}
