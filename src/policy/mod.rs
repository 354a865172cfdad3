//! Policy engine: deterministic constraint evaluation
//!
//! Rules are data (see [`rule`]), evaluation is a pure function (see
//! [`engine::evaluate`]), and the outcome is a value the router consumes
//! unchanged. Blocking is an error, never a result.

pub mod engine;
pub mod error;
pub mod result;
pub mod rule;

pub use engine::evaluate;
pub use error::PolicyViolation;
pub use result::{EffectiveAction, PolicyEvaluationResult};
pub use rule::{
    Condition, ConditionField, ConditionOperator, ConstraintAction, PolicyRule, RuleKind,
};
