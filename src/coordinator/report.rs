//! Execution outcome type

use crate::routing::{RouteRule, RouteTarget};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of a successfully executed query.
///
/// Carries the response text together with enough routing metadata for a
/// caller to display where the answer came from and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Identifier of the question that was executed
    pub question_id: Uuid,
    /// Response text from the executor
    pub response: String,
    /// Target that actually produced the response
    pub route_target: RouteTarget,
    /// Model that actually produced the response
    pub model: String,
    /// Routing arm that made the original decision
    pub rule: RouteRule,
    /// True when the response came from the fallback target
    pub fallback_used: bool,
    /// Warnings accumulated during policy evaluation
    pub warnings: Vec<String>,
    /// True when the decision required confirmation before dispatch
    pub requires_confirmation: bool,
}
