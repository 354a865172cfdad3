//! Policy evaluation output types

use serde::{Deserialize, Serialize};

/// The single winning action after conflict resolution.
///
/// `evaluate` never produces `Block` — a blocking rule fails the whole call
/// instead. The variant exists so a hand-built value reaching the router is
/// still rejected rather than silently routed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectiveAction {
    /// No force applied; the router decides
    #[default]
    Allow,
    /// Route must stay local
    ForceLocal,
    /// Route must go to the cloud
    ForceCloud,
    /// Refusal carried as data; never produced by `evaluate`
    Block { reason: String },
}

/// Outcome of evaluating a rule set against one question.
///
/// `applied_constraint_ids` and `warnings` are ordered by the canonical rule
/// order `(priority ascending, id ascending)`, so identical inputs always
/// produce byte-identical results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PolicyEvaluationResult {
    /// Winning action after conflict resolution
    pub effective_action: EffectiveAction,
    /// Ids of every matched rule, in evaluation order
    pub applied_constraint_ids: Vec<String>,
    /// Advisory messages from matched `Warn` rules, in evaluation order
    pub warnings: Vec<String>,
    /// True when any matched rule requires confirmation before dispatch
    pub requires_confirmation: bool,
}

impl PolicyEvaluationResult {
    /// An unconstrained result: `Allow`, nothing applied.
    pub fn allow() -> Self {
        Self::default()
    }
}
