//! Routing configuration

use crate::model::PrivacyLevel;
use serde::{Deserialize, Serialize};

/// How the coordinator resolves a decision that requires confirmation.
///
/// The router only flags confirmation; actually pausing for user input is
/// an interface concern. Embedders without an interactive surface pick one
/// of these resolutions up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationPolicy {
    /// Log the confirmation request and continue with the decision
    #[default]
    Proceed,
    /// Refuse execution whenever confirmation would be required
    Deny,
}

impl ConfirmationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfirmationPolicy::Proceed => "proceed",
            ConfirmationPolicy::Deny => "deny",
        }
    }
}

impl std::str::FromStr for ConfirmationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "proceed" => Ok(ConfirmationPolicy::Proceed),
            "deny" => Ok(ConfirmationPolicy::Deny),
            _ => Err(format!("Unknown confirmation policy: {}", s)),
        }
    }
}

impl std::fmt::Display for ConfirmationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingSettings {
    /// Token estimate at or below which automatic routing stays local
    pub token_threshold: u32,
    /// Model name used for cloud execution
    pub cloud_model: String,
    /// Privacy level assumed when a query does not carry one
    pub default_privacy: PrivacyLevel,
    /// Resolution for decisions that require confirmation
    pub confirmation: ConfirmationPolicy,
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            token_threshold: 4096,
            cloud_model: String::new(),
            default_privacy: PrivacyLevel::Auto,
            confirmation: ConfirmationPolicy::Proceed,
        }
    }
}
