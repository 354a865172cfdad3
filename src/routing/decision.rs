//! Routing decision types

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Execution substrate for a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteTarget {
    /// On-device model; content never leaves the machine
    Local,
    /// Remote model behind a network call
    Cloud,
}

impl RouteTarget {
    /// The other target, used by the coordinator's single-retry fallback.
    pub fn opposite(&self) -> RouteTarget {
        match self {
            RouteTarget::Local => RouteTarget::Cloud,
            RouteTarget::Cloud => RouteTarget::Local,
        }
    }
}

impl std::fmt::Display for RouteTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RouteTarget::Local => "local",
            RouteTarget::Cloud => "cloud",
        };
        write!(f, "{}", name)
    }
}

/// Which routing arm produced a decision.
///
/// Serialized and displayed as the canonical uppercase token
/// (`POLICY_FORCE_LOCAL`, `AUTO_CLOUD`, ...) so logs and reports use the
/// same vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteRule {
    /// A policy rule forced local execution
    PolicyForceLocal,
    /// A policy rule forced cloud execution
    PolicyForceCloud,
    /// The question's privacy level pinned it to the local model
    PrivacyLocal,
    /// The question's privacy level requested the cloud model
    PrivacyCloud,
    /// Automatic mode kept the question local
    AutoLocal,
    /// Automatic mode sent the question to the cloud
    AutoCloud,
}

impl RouteRule {
    /// Canonical uppercase token.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteRule::PolicyForceLocal => "POLICY_FORCE_LOCAL",
            RouteRule::PolicyForceCloud => "POLICY_FORCE_CLOUD",
            RouteRule::PrivacyLocal => "PRIVACY_LOCAL",
            RouteRule::PrivacyCloud => "PRIVACY_CLOUD",
            RouteRule::AutoLocal => "AUTO_LOCAL",
            RouteRule::AutoCloud => "AUTO_CLOUD",
        }
    }
}

impl FromStr for RouteRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "POLICY_FORCE_LOCAL" => Ok(RouteRule::PolicyForceLocal),
            "POLICY_FORCE_CLOUD" => Ok(RouteRule::PolicyForceCloud),
            "PRIVACY_LOCAL" => Ok(RouteRule::PrivacyLocal),
            "PRIVACY_CLOUD" => Ok(RouteRule::PrivacyCloud),
            "AUTO_LOCAL" => Ok(RouteRule::AutoLocal),
            "AUTO_CLOUD" => Ok(RouteRule::AutoCloud),
            _ => Err(format!("Unknown route rule: {}", s)),
        }
    }
}

impl std::fmt::Display for RouteRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where and how a question will execute.
///
/// A decision is complete: it names the target, the exact model, the arm
/// that produced it, and whether the coordinator may retry the opposite
/// target on executor failure. `fallback_allowed` is true only for
/// `AUTO_LOCAL` — forced and privacy-pinned routes never silently migrate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// Chosen execution substrate
    pub route_target: RouteTarget,
    /// Model identifier on that substrate
    pub model: String,
    /// Human-readable explanation, deterministic for identical inputs
    pub reason: String,
    /// Routing arm that made the call
    pub rule: RouteRule,
    /// Whether one retry against the opposite target is permitted
    pub fallback_allowed: bool,
    /// Mirrors the policy result's confirmation flag verbatim
    pub requires_confirmation: bool,
}
