//! Execution coordination
//!
//! The coordinator is the impure shell around the pure policy and routing
//! stages. For each query it snapshots runtime state, evaluates policy,
//! routes, resolves the confirmation gate, dispatches to an executor, and
//! retries the opposite target at most once when the decision allows it.

pub mod error;
pub mod report;

pub use error::ExecutionError;
pub use report::ExecutionReport;

use crate::config::{ConfirmationPolicy, RoutingSettings};
use crate::executor::{CloudExecutor, ExecutorError, LocalExecutor};
use crate::model::{Intent, PrivacyLevel, Question, RuntimeState};
use crate::policy::{self, PolicyEvaluationResult};
use crate::provider::{CapabilityProvider, NetworkStateProvider, RuleProvider};
use crate::routing::{self, RouteTarget, RoutingDecision};
use std::sync::Arc;
use std::time::Instant;

/// A query as submitted by a caller.
///
/// Only the text is required. A missing privacy level falls back to the
/// configured default at execution time.
#[derive(Debug, Clone, Default)]
pub struct QueryRequest {
    pub text: String,
    pub session_id: Option<String>,
    pub privacy_level: Option<PrivacyLevel>,
    pub intent: Option<Intent>,
}

impl QueryRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            session_id: None,
            privacy_level: None,
            intent: None,
        }
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_privacy_level(mut self, privacy_level: PrivacyLevel) -> Self {
        self.privacy_level = Some(privacy_level);
        self
    }

    pub fn with_intent(mut self, intent: Intent) -> Self {
        self.intent = Some(intent);
        self
    }
}

/// Coordinates policy evaluation, routing, and execution for queries.
///
/// Rules and runtime state are read through providers at the start of each
/// request, so changes become visible on the next query. The two pure
/// stages run on that single snapshot; state observed mid-request never
/// changes a decision already made.
pub struct Coordinator {
    rules: Arc<dyn RuleProvider>,
    capability: Arc<dyn CapabilityProvider>,
    network: Arc<dyn NetworkStateProvider>,
    local: Arc<dyn LocalExecutor>,
    cloud: Arc<dyn CloudExecutor>,
    settings: RoutingSettings,
}

impl Coordinator {
    pub fn new(
        rules: Arc<dyn RuleProvider>,
        capability: Arc<dyn CapabilityProvider>,
        network: Arc<dyn NetworkStateProvider>,
        local: Arc<dyn LocalExecutor>,
        cloud: Arc<dyn CloudExecutor>,
        settings: RoutingSettings,
    ) -> Self {
        Self {
            rules,
            capability,
            network,
            local,
            cloud,
            settings,
        }
    }

    /// Submit plain query text for execution.
    ///
    /// Convenience wrapper over [`Coordinator::execute`] for callers that
    /// have no request metadata beyond an optional session id.
    pub async fn submit(
        &self,
        query_text: &str,
        session_id: Option<&str>,
    ) -> Result<ExecutionReport, ExecutionError> {
        let mut request = QueryRequest::new(query_text);
        if let Some(session) = session_id {
            request = request.with_session_id(session);
        }
        self.execute(request).await
    }

    /// Execute a query end to end.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError::Policy`] when a rule blocks the question,
    /// [`ExecutionError::Routing`] when no viable decision exists,
    /// [`ExecutionError::ConfirmationRequired`] when the decision needs
    /// confirmation and the configured policy denies, and the execution
    /// variants when dispatch (and any permitted fallback) fails.
    pub async fn execute(&self, request: QueryRequest) -> Result<ExecutionReport, ExecutionError> {
        let mut question = Question::new(request.text).with_privacy_level(
            request
                .privacy_level
                .unwrap_or(self.settings.default_privacy),
        );
        if let Some(intent) = request.intent {
            question = question.with_intent(intent);
        }
        if let Some(session) = request.session_id {
            question = question.with_session_id(session);
        }

        let state = self.snapshot();
        let rules = self.rules.get_policy_rules();

        let policy = match policy::evaluate(&question, &state, &rules) {
            Ok(result) => result,
            Err(violation) => {
                metrics::counter!("aegis_blocked_total").increment(1);
                tracing::warn!(
                    question_id = %question.id,
                    rule_id = %violation.rule_id,
                    rule_name = %violation.rule_name,
                    "Query blocked by policy"
                );
                return Err(ExecutionError::Policy(violation));
            }
        };

        let decision = routing::route(&question, &state, &policy)?;

        if decision.requires_confirmation {
            match self.settings.confirmation {
                ConfirmationPolicy::Proceed => {
                    tracing::info!(
                        question_id = %question.id,
                        target = %decision.route_target,
                        "Confirmation required, proceeding per configured policy"
                    );
                }
                ConfirmationPolicy::Deny => {
                    tracing::warn!(
                        question_id = %question.id,
                        target = %decision.route_target,
                        "Confirmation required, denying per configured policy"
                    );
                    return Err(ExecutionError::ConfirmationRequired);
                }
            }
        }

        tracing::info!(
            question_id = %question.id,
            target = %decision.route_target,
            model = %decision.model,
            rule = %decision.rule,
            content_chars = question.content.chars().count(),
            warnings = policy.warnings.len(),
            "Dispatching query"
        );

        match self
            .dispatch(decision.route_target, &question.content, &decision.model)
            .await
        {
            Ok(response) => Ok(self.build_report(
                &question,
                &policy,
                &decision,
                decision.route_target,
                decision.model.clone(),
                response,
                false,
            )),
            Err(primary_error) if decision.fallback_allowed => {
                self.try_fallback(&question, &policy, &decision, &state, primary_error)
                    .await
            }
            Err(source) => Err(ExecutionError::Execution {
                target: decision.route_target,
                source,
            }),
        }
    }

    /// Retry once on the opposite target.
    ///
    /// The fallback reuses the snapshot taken at the start of the request
    /// and does not probe network state again; an unreachable fallback
    /// target surfaces as its executor's error.
    async fn try_fallback(
        &self,
        question: &Question,
        policy: &PolicyEvaluationResult,
        decision: &RoutingDecision,
        state: &RuntimeState,
        primary_error: ExecutorError,
    ) -> Result<ExecutionReport, ExecutionError> {
        let fallback_target = decision.route_target.opposite();
        let fallback_model = match fallback_target {
            RouteTarget::Local => state.local_capability.model_name.clone(),
            RouteTarget::Cloud => state.cloud_model_name.clone(),
        };

        if fallback_model.is_empty() {
            return Err(ExecutionError::Execution {
                target: decision.route_target,
                source: primary_error,
            });
        }

        metrics::counter!("aegis_fallbacks_total").increment(1);
        tracing::warn!(
            question_id = %question.id,
            from = %decision.route_target,
            to = %fallback_target,
            error = %primary_error,
            "Primary execution failed, attempting fallback"
        );

        match self
            .dispatch(fallback_target, &question.content, &fallback_model)
            .await
        {
            Ok(response) => Ok(self.build_report(
                question,
                policy,
                decision,
                fallback_target,
                fallback_model,
                response,
                true,
            )),
            Err(source) => Err(ExecutionError::FallbackFailed {
                primary_target: decision.route_target,
                primary_error,
                fallback_target,
                source,
            }),
        }
    }

    async fn dispatch(
        &self,
        target: RouteTarget,
        prompt: &str,
        model: &str,
    ) -> Result<String, ExecutorError> {
        metrics::counter!("aegis_requests_total", "target" => target.to_string()).increment(1);

        let start = Instant::now();
        let result = match target {
            RouteTarget::Local => self.local.execute_local(prompt, model).await,
            RouteTarget::Cloud => self.cloud.execute_cloud(prompt, model).await,
        };

        metrics::histogram!("aegis_dispatch_duration_seconds", "target" => target.to_string())
            .record(start.elapsed().as_secs_f64());

        result
    }

    fn snapshot(&self) -> RuntimeState {
        RuntimeState {
            local_capability: self.capability.get_local_capability(),
            network_state: self.network.get_network_state(),
            token_threshold: self.settings.token_threshold,
            cloud_model_name: self.settings.cloud_model.clone(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn build_report(
        &self,
        question: &Question,
        policy: &PolicyEvaluationResult,
        decision: &RoutingDecision,
        route_target: RouteTarget,
        model: String,
        response: String,
        fallback_used: bool,
    ) -> ExecutionReport {
        ExecutionReport {
            question_id: question.id,
            response,
            route_target,
            model,
            rule: decision.rule,
            fallback_used,
            warnings: policy.warnings.clone(),
            requires_confirmation: decision.requires_confirmation,
        }
    }
}
