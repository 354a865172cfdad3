//! Coordinator error types

use crate::executor::ExecutorError;
use crate::policy::PolicyViolation;
use crate::routing::{RouteTarget, RoutingError};
use thiserror::Error;

/// Errors surfaced by query execution.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// A policy rule blocked the question before routing
    #[error(transparent)]
    Policy(#[from] PolicyViolation),

    /// Routing could not produce a viable decision
    #[error(transparent)]
    Routing(#[from] RoutingError),

    /// The decision required confirmation and the configured policy denies
    #[error("Execution requires confirmation and the confirmation policy is set to deny")]
    ConfirmationRequired,

    /// Execution failed with no fallback available
    #[error("{target} execution failed: {source}")]
    Execution {
        target: RouteTarget,
        #[source]
        source: ExecutorError,
    },

    /// Both the primary target and the fallback target failed
    #[error("Fallback to {fallback_target} failed: {source} (primary {primary_target} error: {primary_error})")]
    FallbackFailed {
        primary_target: RouteTarget,
        primary_error: ExecutorError,
        fallback_target: RouteTarget,
        #[source]
        source: ExecutorError,
    },
}
