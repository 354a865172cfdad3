//! Deterministic rule evaluation and conflict resolution
//!
//! `evaluate` is a pure function: no I/O, no logging, no clock, no shared
//! state. Calling it once or a thousand times with identical arguments
//! produces bit-identical results, which is what makes routing decisions
//! auditable after the fact.

use super::error::PolicyViolation;
use super::result::{EffectiveAction, PolicyEvaluationResult};
use super::rule::{ConstraintAction, PolicyRule};
use crate::model::{Question, RuntimeState};

/// Evaluate a rule set against a question.
///
/// Enabled rules are ordered by `(priority ascending, id ascending)` and
/// each matching rule's action is folded into the result:
///
/// - `Block` aborts immediately and fails the call with the rule's reason;
///   rules after it are not evaluated at all.
/// - `ForceLocal` wins over `ForceCloud` regardless of which matched first.
/// - `RequireConfirmation` sets the confirmation flag (idempotent).
/// - `Warn` appends its message in evaluation order.
///
/// The runtime snapshot is part of the evaluation contract; the built-in
/// condition fields all derive from the question itself.
///
/// # Examples
///
/// ```
/// use aegis::model::{LocalCapability, NetworkState, Question, RuntimeState};
/// use aegis::policy::{evaluate, ConstraintAction, PolicyRule, RuleKind};
///
/// let question = Question::new("hello");
/// let state = RuntimeState {
///     local_capability: LocalCapability::default(),
///     network_state: NetworkState::Offline,
///     token_threshold: 4096,
///     cloud_model_name: "gpt-4o".to_string(),
/// };
/// let rules = vec![PolicyRule::new(
///     "keep-local",
///     "Keep everything local",
///     RuleKind::Privacy,
///     10,
///     ConstraintAction::ForceLocal,
/// )];
///
/// let result = evaluate(&question, &state, &rules).unwrap();
/// assert_eq!(result.applied_constraint_ids, vec!["keep-local"]);
/// ```
pub fn evaluate(
    question: &Question,
    _state: &RuntimeState,
    rules: &[PolicyRule],
) -> Result<PolicyEvaluationResult, PolicyViolation> {
    let mut ordered: Vec<&PolicyRule> = rules.iter().filter(|rule| rule.enabled).collect();
    ordered.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.id.cmp(&b.id)));

    let mut result = PolicyEvaluationResult::allow();

    for rule in ordered {
        if !rule.matches(question) {
            continue;
        }

        result.applied_constraint_ids.push(rule.id.clone());

        match &rule.action {
            ConstraintAction::Block { reason } => {
                return Err(PolicyViolation {
                    rule_id: rule.id.clone(),
                    rule_name: rule.name.clone(),
                    reason: reason.clone(),
                });
            }
            ConstraintAction::ForceLocal => {
                result.effective_action = EffectiveAction::ForceLocal;
            }
            ConstraintAction::ForceCloud => {
                // ForceLocal always outranks ForceCloud
                if result.effective_action == EffectiveAction::Allow {
                    result.effective_action = EffectiveAction::ForceCloud;
                }
            }
            ConstraintAction::RequireConfirmation { .. } => {
                result.requires_confirmation = true;
            }
            ConstraintAction::Warn { message } => {
                result.warnings.push(message.clone());
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::rule::{Condition, ConditionField, ConditionOperator, RuleKind};

    fn state() -> RuntimeState {
        RuntimeState {
            local_capability: Default::default(),
            network_state: Default::default(),
            token_threshold: 4096,
            cloud_model_name: "gpt-4o".to_string(),
        }
    }

    fn rule(id: &str, priority: i32, action: ConstraintAction) -> PolicyRule {
        PolicyRule::new(id, format!("rule {}", id), RuleKind::Compliance, priority, action)
    }

    fn warn(id: &str, priority: i32, message: &str) -> PolicyRule {
        rule(id, priority, ConstraintAction::Warn { message: message.to_string() })
    }

    #[test]
    fn empty_rule_set_allows() {
        let result = evaluate(&Question::new("hi"), &state(), &[]).unwrap();
        assert_eq!(result, PolicyEvaluationResult::allow());
    }

    #[test]
    fn block_aborts_with_rule_reason() {
        let rules = vec![
            warn("a-warn", 0, "first"),
            rule("b-block", 5, ConstraintAction::Block { reason: "not allowed".to_string() }),
            rule("c-force", 10, ConstraintAction::ForceLocal),
        ];

        let err = evaluate(&Question::new("hi"), &state(), &rules).unwrap_err();
        assert_eq!(err.rule_id, "b-block");
        assert_eq!(err.reason, "not allowed");
    }

    #[test]
    fn block_wins_even_at_lowest_precedence() {
        // Forces evaluated before it do not rescue the request
        let rules = vec![
            rule("a-force", 0, ConstraintAction::ForceLocal),
            rule("z-block", 99, ConstraintAction::Block { reason: "still blocked".to_string() }),
        ];

        let err = evaluate(&Question::new("hi"), &state(), &rules).unwrap_err();
        assert_eq!(err.rule_id, "z-block");
    }

    #[test]
    fn force_local_beats_force_cloud_when_local_first() {
        let rules = vec![
            rule("a", 0, ConstraintAction::ForceLocal),
            rule("b", 10, ConstraintAction::ForceCloud),
        ];
        let result = evaluate(&Question::new("hi"), &state(), &rules).unwrap();
        assert_eq!(result.effective_action, EffectiveAction::ForceLocal);
    }

    #[test]
    fn force_local_beats_force_cloud_when_cloud_first() {
        let rules = vec![
            rule("a", 0, ConstraintAction::ForceCloud),
            rule("b", 10, ConstraintAction::ForceLocal),
        ];
        let result = evaluate(&Question::new("hi"), &state(), &rules).unwrap();
        assert_eq!(result.effective_action, EffectiveAction::ForceLocal);
    }

    #[test]
    fn force_cloud_applies_when_unopposed() {
        let rules = vec![rule("a", 0, ConstraintAction::ForceCloud)];
        let result = evaluate(&Question::new("hi"), &state(), &rules).unwrap();
        assert_eq!(result.effective_action, EffectiveAction::ForceCloud);
    }

    #[test]
    fn warnings_collected_in_priority_order() {
        let rules = vec![
            warn("c", 30, "third"),
            warn("a", 10, "first"),
            warn("b", 20, "second"),
        ];
        let result = evaluate(&Question::new("hi"), &state(), &rules).unwrap();
        assert_eq!(result.warnings, vec!["first", "second", "third"]);
        assert_eq!(result.applied_constraint_ids, vec!["a", "b", "c"]);
        assert_eq!(result.effective_action, EffectiveAction::Allow);
    }

    #[test]
    fn equal_priority_breaks_ties_by_id() {
        let rules = vec![warn("beta", 5, "from beta"), warn("alpha", 5, "from alpha")];
        let result = evaluate(&Question::new("hi"), &state(), &rules).unwrap();
        assert_eq!(result.warnings, vec!["from alpha", "from beta"]);
    }

    #[test]
    fn disabled_rules_are_skipped() {
        let mut blocked = rule("a", 0, ConstraintAction::Block { reason: "off".to_string() });
        blocked.enabled = false;
        let rules = vec![blocked, warn("b", 1, "still here")];

        let result = evaluate(&Question::new("hi"), &state(), &rules).unwrap();
        assert_eq!(result.applied_constraint_ids, vec!["b"]);
    }

    #[test]
    fn non_matching_rules_are_not_applied() {
        let gated = rule("a", 0, ConstraintAction::ForceLocal).with_condition(Condition::new(
            ConditionField::Content,
            ConditionOperator::Contains,
            "ssn",
        ));
        let rules = vec![gated];

        let result = evaluate(&Question::new("weather today"), &state(), &rules).unwrap();
        assert!(result.applied_constraint_ids.is_empty());
        assert_eq!(result.effective_action, EffectiveAction::Allow);
    }

    #[test]
    fn confirmation_flag_is_idempotent() {
        let rules = vec![
            rule("a", 0, ConstraintAction::RequireConfirmation { prompt: "sure?".to_string() }),
            rule("b", 1, ConstraintAction::RequireConfirmation { prompt: "really?".to_string() }),
        ];
        let result = evaluate(&Question::new("hi"), &state(), &rules).unwrap();
        assert!(result.requires_confirmation);
        assert_eq!(result.applied_constraint_ids, vec!["a", "b"]);
    }

    #[test]
    fn repeated_evaluation_is_identical() {
        let rules = vec![
            warn("w1", 1, "message one"),
            rule("f1", 2, ConstraintAction::ForceLocal),
            rule("c1", 3, ConstraintAction::RequireConfirmation { prompt: "ok?".to_string() }),
        ];
        let question = Question::new("some question text");
        let runtime = state();

        let first = evaluate(&question, &runtime, &rules).unwrap();
        for _ in 0..10 {
            assert_eq!(evaluate(&question, &runtime, &rules).unwrap(), first);
        }
    }

    mod proptests {
        use super::*;
        use crate::model::{Intent, PrivacyLevel};
        use proptest::prelude::*;
        use std::collections::HashMap;

        fn arb_action() -> impl Strategy<Value = ConstraintAction> {
            prop_oneof![
                Just(ConstraintAction::ForceLocal),
                Just(ConstraintAction::ForceCloud),
                "[a-z ]{1,12}".prop_map(|message| ConstraintAction::Warn { message }),
                "[a-z ]{1,12}".prop_map(|prompt| ConstraintAction::RequireConfirmation { prompt }),
                "[a-z ]{1,12}".prop_map(|reason| ConstraintAction::Block { reason }),
            ]
        }

        fn arb_condition() -> impl Strategy<Value = Condition> {
            let field = prop_oneof![
                Just(ConditionField::Content),
                Just(ConditionField::TokenCount),
                Just(ConditionField::Intent),
                Just(ConditionField::PrivacyLevel),
            ];
            let operator = prop_oneof![
                Just(ConditionOperator::Contains),
                Just(ConditionOperator::NotContains),
                Just(ConditionOperator::Equals),
                Just(ConditionOperator::NotEquals),
                Just(ConditionOperator::Exceeds),
                Just(ConditionOperator::LessThan),
            ];
            let value = prop_oneof![
                "[a-z]{1,6}",
                (0u32..50).prop_map(|n| n.to_string()),
            ];
            (field, operator, value)
                .prop_map(|(field, operator, value)| Condition { field, operator, value })
        }

        fn arb_rules() -> impl Strategy<Value = Vec<PolicyRule>> {
            prop::collection::hash_set("[a-z]{1,8}", 0..8).prop_flat_map(|ids| {
                let ids: Vec<String> = ids.into_iter().collect();
                let n = ids.len();
                let parts = prop::collection::vec(
                    (
                        -20i32..20,
                        any::<bool>(),
                        prop::collection::vec(arb_condition(), 0..3),
                        arb_action(),
                    ),
                    n..=n,
                );
                (Just(ids), parts).prop_map(|(ids, parts)| {
                    ids.into_iter()
                        .zip(parts)
                        .map(|(id, (priority, enabled, conditions, action))| PolicyRule {
                            id: id.clone(),
                            name: id,
                            kind: RuleKind::Compliance,
                            enabled,
                            priority,
                            conditions,
                            action,
                        })
                        .collect()
                })
            })
        }

        fn arb_question() -> impl Strategy<Value = Question> {
            let privacy = prop_oneof![
                Just(PrivacyLevel::Local),
                Just(PrivacyLevel::Cloud),
                Just(PrivacyLevel::Auto),
            ];
            let intent = prop::option::of(prop_oneof![
                Just(Intent::Informational),
                Just(Intent::Analytical),
                Just(Intent::Retrieval),
            ]);
            ("[ -~]{0,64}", privacy, intent).prop_map(|(content, privacy, intent)| {
                let mut question = Question::new(content).with_privacy_level(privacy);
                question.intent = intent;
                question
            })
        }

        proptest! {
            #[test]
            fn prop_evaluate_is_deterministic(
                question in arb_question(),
                rules in arb_rules(),
            ) {
                let runtime = state();
                let first = evaluate(&question, &runtime, &rules);
                let second = evaluate(&question, &runtime, &rules);
                prop_assert_eq!(first, second);
            }

            #[test]
            fn prop_applied_ids_follow_canonical_order(
                question in arb_question(),
                rules in arb_rules(),
            ) {
                let runtime = state();
                if let Ok(result) = evaluate(&question, &runtime, &rules) {
                    let priority_of: HashMap<&str, i32> =
                        rules.iter().map(|r| (r.id.as_str(), r.priority)).collect();
                    let keys: Vec<(i32, &String)> = result
                        .applied_constraint_ids
                        .iter()
                        .map(|id| (priority_of[id.as_str()], id))
                        .collect();
                    let mut sorted = keys.clone();
                    sorted.sort();
                    prop_assert_eq!(keys, sorted);
                }
            }

            #[test]
            fn prop_block_never_appears_in_result(
                question in arb_question(),
                rules in arb_rules(),
            ) {
                if let Ok(result) = evaluate(&question, &state(), &rules) {
                    prop_assert!(!matches!(
                        result.effective_action,
                        EffectiveAction::Block { .. }
                    ));
                }
            }
        }
    }
}
