//! Question value type and its classification enums

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Privacy level attached to a question.
///
/// Controls which execution targets the router may consider. `Local` is a
/// hard guarantee: the router will never select a cloud target for it, no
/// matter what the network or capability snapshot says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PrivacyLevel {
    /// Must execute on the local model; never leaves the device
    Local,
    /// Explicitly requests cloud execution
    Cloud,
    /// Let the router pick based on capability and thresholds
    #[default]
    Auto,
}

impl PrivacyLevel {
    /// Canonical lowercase name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrivacyLevel::Local => "local",
            PrivacyLevel::Cloud => "cloud",
            PrivacyLevel::Auto => "auto",
        }
    }
}

impl FromStr for PrivacyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(PrivacyLevel::Local),
            "cloud" => Ok(PrivacyLevel::Cloud),
            "auto" => Ok(PrivacyLevel::Auto),
            _ => Err(format!("Invalid privacy level: {}", s)),
        }
    }
}

impl std::fmt::Display for PrivacyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse classification of what a question is asking for.
///
/// Used by `Intent` rule conditions and by the automatic-mode capability
/// check (a local model advertises the intents it can serve).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Factual lookup or explanation
    Informational,
    /// Reasoning, synthesis, or multi-step analysis
    Analytical,
    /// Retrieval over user documents
    Retrieval,
}

impl Intent {
    /// Canonical lowercase name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Informational => "informational",
            Intent::Analytical => "analytical",
            Intent::Retrieval => "retrieval",
        }
    }
}

impl FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "informational" => Ok(Intent::Informational),
            "analytical" => Ok(Intent::Analytical),
            "retrieval" => Ok(Intent::Retrieval),
            _ => Err(format!("Invalid intent: {}", s)),
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user query as seen by the policy engine and router.
///
/// Immutable once built: the coordinator constructs one per submission and
/// every downstream component reads the same value.
///
/// # Examples
///
/// ```
/// use aegis::model::{PrivacyLevel, Question};
///
/// let question = Question::new("What is the capital of France?")
///     .with_privacy_level(PrivacyLevel::Local);
/// assert_eq!(question.privacy_level, PrivacyLevel::Local);
/// assert!(question.intent.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier for this submission
    pub id: Uuid,
    /// Raw query text
    pub content: String,
    /// Privacy level governing target selection
    pub privacy_level: PrivacyLevel,
    /// Classified intent, if the caller provided one
    pub intent: Option<Intent>,
    /// Opaque session identifier supplied by the caller
    pub session_id: Option<String>,
}

impl Question {
    /// Create a question with a fresh id, `Auto` privacy, and no intent.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            privacy_level: PrivacyLevel::Auto,
            intent: None,
            session_id: None,
        }
    }

    /// Set the privacy level (consuming builder style).
    pub fn with_privacy_level(mut self, privacy_level: PrivacyLevel) -> Self {
        self.privacy_level = privacy_level;
        self
    }

    /// Set the classified intent.
    pub fn with_intent(mut self, intent: Intent) -> Self {
        self.intent = Some(intent);
        self
    }

    /// Attach a session identifier.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Deterministic token estimate for this question's content.
    pub fn token_estimate(&self) -> u32 {
        super::tokens::estimate_tokens(&self.content)
    }
}
