//! Rule store error types

use thiserror::Error;

/// Errors from programmatic rule store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Rule already exists: {0}")]
    DuplicateRule(String),

    #[error("Rule not found: {0}")]
    RuleNotFound(String),

    #[error("Invalid rule: {0}")]
    InvalidRule(String),
}
