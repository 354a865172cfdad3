//! Policy rule types and condition matching
//!
//! Rules are operator-authored data: loaded from config or a rule store,
//! validated once, then evaluated read-only against each question. Matching
//! is pure string/number comparison over the question value — no I/O and no
//! runtime probes, so a rule set always matches the same question the same
//! way.

use crate::model::Question;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Why a rule exists. Informational; evaluation treats all kinds alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Keeps sensitive content on-device
    Privacy,
    /// Limits spend on cloud execution
    Cost,
    /// Encodes regulatory or organizational policy
    Compliance,
    /// Blocks or gates risky content
    Safety,
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RuleKind::Privacy => "privacy",
            RuleKind::Cost => "cost",
            RuleKind::Compliance => "compliance",
            RuleKind::Safety => "safety",
        };
        write!(f, "{}", name)
    }
}

/// Question attribute a condition inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionField {
    /// Raw query text
    Content,
    /// Deterministic token estimate of the content
    TokenCount,
    /// Classified intent name (unclassified questions have none)
    Intent,
    /// Privacy level name
    PrivacyLevel,
}

/// Comparison applied to the inspected attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    /// Substring test; the value may be a pipe-delimited OR-group
    Contains,
    /// Negated substring test over the whole OR-group
    NotContains,
    /// Full equality
    Equals,
    /// Negated full equality
    NotEquals,
    /// Numeric greater-than (token count only)
    Exceeds,
    /// Numeric less-than (token count only)
    LessThan,
}

/// A single predicate over one question attribute.
///
/// String comparisons are case-insensitive. `Contains`/`NotContains` treat
/// the value as a pipe-delimited OR-group: `"ssn|password"` matches content
/// containing either term, and its negation matches content containing
/// neither. Enum fields (`Intent`, `PrivacyLevel`) compare against the
/// lowercase variant name with the same text operators.
///
/// Nonsensical pairings never match: ordering operators on text fields,
/// substring operators on `TokenCount`, and numeric values that fail to
/// parse all yield `false` rather than an error, so one malformed rule can
/// only ever fail closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub field: ConditionField,
    pub operator: ConditionOperator,
    pub value: String,
}

impl Condition {
    pub fn new(field: ConditionField, operator: ConditionOperator, value: impl Into<String>) -> Self {
        Self {
            field,
            operator,
            value: value.into(),
        }
    }

    /// Whether this condition holds for the given question.
    pub fn matches(&self, question: &Question) -> bool {
        match self.field {
            ConditionField::Content => self.match_text(&question.content),
            ConditionField::TokenCount => self.match_numeric(u64::from(question.token_estimate())),
            ConditionField::Intent => match question.intent {
                Some(intent) => self.match_text(intent.as_str()),
                // Absent intent: only negated operators hold
                None => matches!(
                    self.operator,
                    ConditionOperator::NotEquals | ConditionOperator::NotContains
                ),
            },
            ConditionField::PrivacyLevel => self.match_text(question.privacy_level.as_str()),
        }
    }

    fn match_text(&self, text: &str) -> bool {
        let haystack = text.to_lowercase();
        match self.operator {
            ConditionOperator::Contains => self.any_alternative(&haystack),
            ConditionOperator::NotContains => !self.any_alternative(&haystack),
            ConditionOperator::Equals => haystack == self.value.to_lowercase(),
            ConditionOperator::NotEquals => haystack != self.value.to_lowercase(),
            ConditionOperator::Exceeds | ConditionOperator::LessThan => false,
        }
    }

    /// True when any pipe-delimited alternative is a substring of the haystack.
    fn any_alternative(&self, haystack: &str) -> bool {
        self.value
            .to_lowercase()
            .split('|')
            .any(|alternative| haystack.contains(alternative))
    }

    fn match_numeric(&self, actual: u64) -> bool {
        let expected = match self.value.trim().parse::<u64>() {
            Ok(n) => n,
            Err(_) => return false,
        };
        match self.operator {
            ConditionOperator::Equals => actual == expected,
            ConditionOperator::NotEquals => actual != expected,
            ConditionOperator::Exceeds => actual > expected,
            ConditionOperator::LessThan => actual < expected,
            ConditionOperator::Contains | ConditionOperator::NotContains => false,
        }
    }
}

/// What a matched rule does to the routing outcome.
///
/// Declared in TOML as an inline table, e.g.
/// `action = { type = "block", reason = "sensitive identifier" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConstraintAction {
    /// Refuse the question outright with a user-visible reason
    Block { reason: String },
    /// Pin execution to the local model
    ForceLocal,
    /// Pin execution to the cloud model
    ForceCloud,
    /// Require external approval before dispatch
    RequireConfirmation { prompt: String },
    /// Attach an advisory message without changing the route
    Warn { message: String },
}

/// A named, prioritized condition-action pair.
///
/// A rule matches a question iff **all** of its conditions match (a rule
/// with no conditions matches every question). Lower `priority` evaluates
/// first; ties break on ascending `id`, which makes evaluation order a total
/// order over any rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRule {
    /// Stable identifier, unique within a rule set
    pub id: String,
    /// Human-readable name for operator-facing messages
    pub name: String,
    /// Why the rule exists
    pub kind: RuleKind,
    /// Disabled rules are skipped entirely
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Evaluation order; lower runs first
    #[serde(default)]
    pub priority: i32,
    /// Predicates combined with AND semantics
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Effect when the rule matches
    pub action: ConstraintAction,
}

fn default_enabled() -> bool {
    true
}

impl PolicyRule {
    /// Create an enabled rule with no conditions.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: RuleKind,
        priority: i32,
        action: ConstraintAction,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            enabled: true,
            priority,
            conditions: Vec::new(),
            action,
        }
    }

    /// Append a condition (consuming builder style).
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// True when every condition matches the question.
    pub fn matches(&self, question: &Question) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition.matches(question))
    }

    /// Check structural validity: non-empty id, name, condition values, and
    /// block reason.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("rule id cannot be empty".to_string());
        }
        if self.name.trim().is_empty() {
            return Err(format!("rule '{}' has an empty name", self.id));
        }
        for (i, condition) in self.conditions.iter().enumerate() {
            if condition.value.trim().is_empty() {
                return Err(format!(
                    "rule '{}' condition {} has an empty value",
                    self.id, i
                ));
            }
        }
        if let ConstraintAction::Block { reason } = &self.action {
            if reason.trim().is_empty() {
                return Err(format!("rule '{}' block action has an empty reason", self.id));
            }
        }
        Ok(())
    }
}

impl FromStr for RuleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "privacy" => Ok(RuleKind::Privacy),
            "cost" => Ok(RuleKind::Cost),
            "compliance" => Ok(RuleKind::Compliance),
            "safety" => Ok(RuleKind::Safety),
            _ => Err(format!("Unknown rule kind: {}", s)),
        }
    }
}
