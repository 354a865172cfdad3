//! Policy evaluation error type

use thiserror::Error;

/// A matched `Block` rule refused the question.
///
/// Fatal to the request: never retried, never downgraded to a warning. The
/// `reason` is the rule author's message and is surfaced to the user
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Blocked by policy rule '{rule_id}': {reason}")]
pub struct PolicyViolation {
    /// Id of the blocking rule
    pub rule_id: String,
    /// Human-readable name of the blocking rule
    pub rule_name: String,
    /// Operator-configured reason shown to the user
    pub reason: String,
}
