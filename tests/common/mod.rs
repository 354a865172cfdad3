//! Shared test utilities for integration tests.
//!
//! Provides reusable builders for questions, runtime snapshots, policy
//! rules, and scripted executors to reduce duplication across test files.

#![allow(dead_code)]

use aegis::config::RoutingSettings;
use aegis::executor::{CloudExecutor, ExecutorError, LocalExecutor};
use aegis::model::{LocalCapability, NetworkState, Question, RuntimeState};
use aegis::policy::{Condition, ConditionField, ConditionOperator, ConstraintAction, PolicyRule, RuleKind};
use aegis::provider::{MemoryRuleStore, StaticCapability, StaticNetwork};
use aegis::Coordinator;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const LOCAL_MODEL: &str = "llama-3.2-3b";
pub const CLOUD_MODEL: &str = "gpt-4o-mini";

// =============================================================================
// Domain Builders
// =============================================================================

/// Create a question with default (auto) privacy.
pub fn make_question(content: &str) -> Question {
    Question::new(content)
}

/// Create an available local capability with no intent restrictions.
pub fn make_capability() -> LocalCapability {
    LocalCapability {
        model_name: LOCAL_MODEL.to_string(),
        max_tokens: 8192,
        supported_intents: HashSet::new(),
        available: true,
    }
}

/// Create a runtime snapshot with an available local model.
pub fn make_state(network: NetworkState, token_threshold: u32) -> RuntimeState {
    RuntimeState {
        local_capability: make_capability(),
        network_state: network,
        token_threshold,
        cloud_model_name: CLOUD_MODEL.to_string(),
    }
}

/// Create an enabled rule with no conditions.
pub fn make_rule(id: &str, priority: i32, action: ConstraintAction) -> PolicyRule {
    PolicyRule::new(id, format!("rule {}", id), RuleKind::Compliance, priority, action)
}

/// Create a rule matching questions whose content contains `needle`.
pub fn make_content_rule(
    id: &str,
    priority: i32,
    needle: &str,
    action: ConstraintAction,
) -> PolicyRule {
    make_rule(id, priority, action).with_condition(Condition::new(
        ConditionField::Content,
        ConditionOperator::Contains,
        needle,
    ))
}

// =============================================================================
// Scripted Executors
// =============================================================================

pub struct ScriptedLocal {
    pub calls: Arc<AtomicUsize>,
    pub fail: bool,
}

#[async_trait]
impl LocalExecutor for ScriptedLocal {
    async fn execute_local(&self, _prompt: &str, model: &str) -> Result<String, ExecutorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(ExecutorError::Unavailable("local model unloaded".to_string()))
        } else {
            Ok(format!("local:{}", model))
        }
    }
}

pub struct ScriptedCloud {
    pub calls: Arc<AtomicUsize>,
    pub fail: bool,
}

#[async_trait]
impl CloudExecutor for ScriptedCloud {
    async fn execute_cloud(&self, _prompt: &str, model: &str) -> Result<String, ExecutorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(ExecutorError::Failed("upstream returned 502".to_string()))
        } else {
            Ok(format!("cloud:{}", model))
        }
    }
}

// =============================================================================
// Coordinator Harness
// =============================================================================

pub struct CoordinatorHarness {
    pub coordinator: Coordinator,
    pub network: Arc<StaticNetwork>,
    pub capability: Arc<StaticCapability>,
    pub local_calls: Arc<AtomicUsize>,
    pub cloud_calls: Arc<AtomicUsize>,
}

/// Wire a coordinator with scripted executors and settable state providers.
pub fn make_coordinator(
    store: Arc<MemoryRuleStore>,
    network_state: NetworkState,
    settings: RoutingSettings,
    local_fails: bool,
    cloud_fails: bool,
) -> CoordinatorHarness {
    let local_calls = Arc::new(AtomicUsize::new(0));
    let cloud_calls = Arc::new(AtomicUsize::new(0));
    let network = Arc::new(StaticNetwork::new(network_state));
    let capability = Arc::new(StaticCapability::new(make_capability()));

    let coordinator = Coordinator::new(
        store,
        capability.clone(),
        network.clone(),
        Arc::new(ScriptedLocal {
            calls: local_calls.clone(),
            fail: local_fails,
        }),
        Arc::new(ScriptedCloud {
            calls: cloud_calls.clone(),
            fail: cloud_fails,
        }),
        settings,
    );

    CoordinatorHarness {
        coordinator,
        network,
        capability,
        local_calls,
        cloud_calls,
    }
}

/// Routing settings with a configured cloud model.
pub fn make_settings() -> RoutingSettings {
    RoutingSettings {
        cloud_model: CLOUD_MODEL.to_string(),
        ..RoutingSettings::default()
    }
}
