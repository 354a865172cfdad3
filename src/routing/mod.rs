//! Deterministic routing of policy-evaluated questions
//!
//! `route` is the second pure stage of the pipeline: it turns a question,
//! a runtime snapshot, and a policy evaluation result into a complete
//! [`RoutingDecision`] or a typed error. Like the policy engine it performs
//! no I/O, reads no clock, and holds no state — identical inputs always
//! yield identical decisions.
//!
//! Evaluation order is strict and each arm returns immediately:
//!
//! 1. **Policy override** — a forced action from the rule set wins outright.
//! 2. **Privacy guarantee** — an explicit `Local` privacy level pins the
//!    route to the local model without consulting network or availability;
//!    an explicit `Cloud` level requires the network to be online.
//! 3. **Automatic mode** — keep the question local when it fits the token
//!    threshold, the local model is available, and the intent is supported;
//!    otherwise go to the cloud if the network allows it.

pub mod decision;
pub mod error;

pub use decision::{RouteRule, RouteTarget, RoutingDecision};
pub use error::RoutingError;

use crate::model::{estimate_tokens, NetworkState, PrivacyLevel, Question, RuntimeState};
use crate::policy::{EffectiveAction, PolicyEvaluationResult};

const REASON_POLICY_LOCAL: &str = "Policy constraint forced local execution";
const REASON_POLICY_CLOUD: &str = "Policy constraint forced cloud execution";
const REASON_PRIVACY_LOCAL: &str = "Privacy level restricts execution to the local model";
const REASON_PRIVACY_CLOUD: &str = "Privacy level requests cloud execution";

/// Decide where a question executes.
///
/// `requires_confirmation` on the returned decision mirrors the policy
/// result verbatim; the router neither sets nor clears it on its own.
///
/// # Errors
///
/// - [`RoutingError::PolicyViolation`] — a `Block` action arrived as data
///   (the engine normally converts blocks into evaluation failures; the
///   router refuses them all the same rather than routing around them).
/// - [`RoutingError::NetworkUnavailable`] — a cloud route was required but
///   the snapshot says the network is offline or degraded.
/// - [`RoutingError::InvalidConfiguration`] — the chosen target has no
///   model name in the snapshot; a decision naming no model is never
///   produced.
pub fn route(
    question: &Question,
    state: &RuntimeState,
    policy: &PolicyEvaluationResult,
) -> Result<RoutingDecision, RoutingError> {
    let decision = match &policy.effective_action {
        EffectiveAction::Block { reason } => {
            return Err(RoutingError::PolicyViolation {
                reason: reason.clone(),
            });
        }
        EffectiveAction::ForceLocal => local_decision(
            state,
            RouteRule::PolicyForceLocal,
            REASON_POLICY_LOCAL.to_string(),
            false,
        )?,
        EffectiveAction::ForceCloud => {
            require_online(state)?;
            cloud_decision(state, RouteRule::PolicyForceCloud, REASON_POLICY_CLOUD.to_string())?
        }
        EffectiveAction::Allow => match question.privacy_level {
            // No network or availability probe on this arm: an explicit
            // local choice must stay local unconditionally.
            PrivacyLevel::Local => local_decision(
                state,
                RouteRule::PrivacyLocal,
                REASON_PRIVACY_LOCAL.to_string(),
                false,
            )?,
            PrivacyLevel::Cloud => {
                require_online(state)?;
                cloud_decision(state, RouteRule::PrivacyCloud, REASON_PRIVACY_CLOUD.to_string())?
            }
            PrivacyLevel::Auto => route_auto(question, state)?,
        },
    };

    Ok(RoutingDecision {
        requires_confirmation: policy.requires_confirmation,
        ..decision
    })
}

fn route_auto(question: &Question, state: &RuntimeState) -> Result<RoutingDecision, RoutingError> {
    let token_count = estimate_tokens(&question.content);
    let fits_threshold = token_count <= state.token_threshold;
    let intent_supported = state.local_capability.supports_intent(question.intent);

    if fits_threshold && state.local_capability.available && intent_supported {
        let reason = format!(
            "Automatic mode kept execution local: {} estimated tokens within threshold {}",
            token_count, state.token_threshold
        );
        return local_decision(state, RouteRule::AutoLocal, reason, true);
    }

    require_online(state)?;

    let mut causes: Vec<String> = Vec::new();
    if !fits_threshold {
        causes.push(format!(
            "estimated {} tokens exceeds local threshold {}",
            token_count, state.token_threshold
        ));
    }
    if !state.local_capability.available {
        causes.push("local model unavailable".to_string());
    }
    if !intent_supported {
        if let Some(intent) = question.intent {
            causes.push(format!("intent '{}' unsupported locally", intent));
        }
    }
    let reason = format!("Automatic mode routed to cloud: {}", causes.join(", "));
    cloud_decision(state, RouteRule::AutoCloud, reason)
}

fn local_decision(
    state: &RuntimeState,
    rule: RouteRule,
    reason: String,
    fallback_allowed: bool,
) -> Result<RoutingDecision, RoutingError> {
    if state.local_capability.model_name.is_empty() {
        return Err(RoutingError::InvalidConfiguration {
            reason: "local capability has no model name".to_string(),
        });
    }
    Ok(RoutingDecision {
        route_target: RouteTarget::Local,
        model: state.local_capability.model_name.clone(),
        reason,
        rule,
        fallback_allowed,
        requires_confirmation: false,
    })
}

fn cloud_decision(
    state: &RuntimeState,
    rule: RouteRule,
    reason: String,
) -> Result<RoutingDecision, RoutingError> {
    if state.cloud_model_name.is_empty() {
        return Err(RoutingError::InvalidConfiguration {
            reason: "no cloud model configured".to_string(),
        });
    }
    Ok(RoutingDecision {
        route_target: RouteTarget::Cloud,
        model: state.cloud_model_name.clone(),
        reason,
        rule,
        fallback_allowed: false,
        requires_confirmation: false,
    })
}

fn require_online(state: &RuntimeState) -> Result<(), RoutingError> {
    if state.network_state == NetworkState::Online {
        Ok(())
    } else {
        Err(RoutingError::NetworkUnavailable)
    }
}
