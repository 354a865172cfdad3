//! Runtime state snapshot consumed by routing decisions

use super::question::Intent;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// Network reachability at snapshot time.
///
/// Cloud routes require `Online` exactly; a `Degraded` link is not
/// cloud-capable, so a degraded request fails fast instead of stalling
/// mid-flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NetworkState {
    /// Cloud endpoints reachable
    Online,
    /// No connectivity
    #[default]
    Offline,
    /// Connectivity present but unreliable
    Degraded,
}

impl FromStr for NetworkState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "online" => Ok(NetworkState::Online),
            "offline" => Ok(NetworkState::Offline),
            "degraded" => Ok(NetworkState::Degraded),
            _ => Err(format!("Invalid network state: {}", s)),
        }
    }
}

impl std::fmt::Display for NetworkState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NetworkState::Online => "online",
            NetworkState::Offline => "offline",
            NetworkState::Degraded => "degraded",
        };
        write!(f, "{}", name)
    }
}

/// What the on-device model can currently serve.
///
/// A point-in-time read from the capability provider; the router treats it
/// as an immutable snapshot and never probes the live model behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LocalCapability {
    /// Identifier of the loaded local model (empty when none is loaded)
    pub model_name: String,
    /// Context window of the local model in tokens
    pub max_tokens: u32,
    /// Intents the local model is considered competent for
    pub supported_intents: HashSet<Intent>,
    /// Whether the local model is loaded and accepting work
    pub available: bool,
}

impl LocalCapability {
    /// True when the local model can serve the given intent.
    ///
    /// An unclassified question (`None`) is always considered supported.
    pub fn supports_intent(&self, intent: Option<Intent>) -> bool {
        match intent {
            Some(intent) => self.supported_intents.contains(&intent),
            None => true,
        }
    }
}

/// Immutable snapshot of everything a routing decision depends on.
///
/// Rebuilt fresh by the coordinator for every submission from the capability
/// and network providers plus its own settings. Never shared or mutated
/// across requests, so concurrent submissions cannot observe each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeState {
    /// Local model capability at snapshot time
    pub local_capability: LocalCapability,
    /// Network reachability at snapshot time
    pub network_state: NetworkState,
    /// Maximum estimated tokens automatic mode will keep on-device
    pub token_threshold: u32,
    /// Model identifier used for cloud routes
    pub cloud_model_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capability(intents: &[Intent]) -> LocalCapability {
        LocalCapability {
            model_name: "llama-3-8b".to_string(),
            max_tokens: 8192,
            supported_intents: intents.iter().copied().collect(),
            available: true,
        }
    }

    #[test]
    fn supports_intent_checks_membership() {
        let cap = capability(&[Intent::Informational]);
        assert!(cap.supports_intent(Some(Intent::Informational)));
        assert!(!cap.supports_intent(Some(Intent::Analytical)));
    }

    #[test]
    fn unclassified_intent_is_always_supported() {
        let cap = capability(&[]);
        assert!(cap.supports_intent(None));
    }

    #[test]
    fn network_state_defaults_to_offline() {
        assert_eq!(NetworkState::default(), NetworkState::Offline);
    }

    #[test]
    fn network_state_from_str_is_case_insensitive() {
        assert_eq!(NetworkState::from_str("ONLINE").unwrap(), NetworkState::Online);
        assert_eq!(NetworkState::from_str("Degraded").unwrap(), NetworkState::Degraded);
        assert!(NetworkState::from_str("flaky").is_err());
    }

    #[test]
    fn local_capability_deserializes_with_defaults() {
        let cap: LocalCapability = serde_json::from_str("{}").unwrap();
        assert!(cap.model_name.is_empty());
        assert!(!cap.available);
        assert!(cap.supported_intents.is_empty());
    }
}
