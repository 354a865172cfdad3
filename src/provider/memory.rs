//! In-memory policy rule store

use super::{RuleProvider, StoreError};
use crate::policy::PolicyRule;
use dashmap::DashMap;

/// Thread-safe in-memory rule store.
///
/// Backing store for deployments that manage rules programmatically, e.g.
/// from a settings UI. Uses a lock-free concurrent map; reads return value
/// copies. Iteration order is irrelevant — the policy engine canonicalizes
/// evaluation order by `(priority, id)`.
///
/// # Examples
///
/// ```
/// use aegis::policy::{ConstraintAction, PolicyRule, RuleKind};
/// use aegis::provider::{MemoryRuleStore, RuleProvider};
///
/// let store = MemoryRuleStore::new();
/// store
///     .add_rule(PolicyRule::new(
///         "keep-local",
///         "Keep everything local",
///         RuleKind::Privacy,
///         10,
///         ConstraintAction::ForceLocal,
///     ))
///     .unwrap();
///
/// assert_eq!(store.rule_count(), 1);
/// assert_eq!(store.get_policy_rules().len(), 1);
/// ```
pub struct MemoryRuleStore {
    rules: DashMap<String, PolicyRule>,
}

impl MemoryRuleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            rules: DashMap::new(),
        }
    }

    /// Add a rule.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidRule` if the rule fails structural
    /// validation, or `StoreError::DuplicateRule` if a rule with the same
    /// id already exists.
    pub fn add_rule(&self, rule: PolicyRule) -> Result<(), StoreError> {
        rule.validate().map_err(StoreError::InvalidRule)?;
        if self.rules.contains_key(&rule.id) {
            return Err(StoreError::DuplicateRule(rule.id));
        }
        self.rules.insert(rule.id.clone(), rule);
        Ok(())
    }

    /// Remove a rule, returning it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::RuleNotFound` if no rule with the given id exists.
    pub fn remove_rule(&self, id: &str) -> Result<PolicyRule, StoreError> {
        self.rules
            .remove(id)
            .map(|(_, rule)| rule)
            .ok_or_else(|| StoreError::RuleNotFound(id.to_string()))
    }

    /// Enable or disable a rule in place.
    pub fn set_enabled(&self, id: &str, enabled: bool) -> Result<(), StoreError> {
        match self.rules.get_mut(id) {
            Some(mut entry) => {
                entry.enabled = enabled;
                Ok(())
            }
            None => Err(StoreError::RuleNotFound(id.to_string())),
        }
    }

    /// Get a rule by id as a value copy.
    pub fn get_rule(&self, id: &str) -> Option<PolicyRule> {
        self.rules.get(id).map(|entry| entry.value().clone())
    }

    /// Number of stored rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// True when the store holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for MemoryRuleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleProvider for MemoryRuleStore {
    fn get_policy_rules(&self) -> Vec<PolicyRule> {
        self.rules.iter().map(|entry| entry.value().clone()).collect()
    }
}
