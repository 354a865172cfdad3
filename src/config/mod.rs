//! Configuration module for the execution router
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. Environment variables (`AEGIS_*`) (highest priority)
//! 2. Configuration file (TOML)
//! 3. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use aegis::config::RouterConfig;
//!
//! // Load defaults
//! let config = RouterConfig::default();
//! assert_eq!(config.routing.token_threshold, 4096);
//!
//! // Parse from TOML
//! let toml = r#"
//! [routing]
//! token_threshold = 2048
//! "#;
//! let config: RouterConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.routing.token_threshold, 2048);
//! ```

pub mod error;
pub mod logging;
pub mod routing;

pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use routing::{ConfirmationPolicy, RoutingSettings};

use crate::policy::PolicyRule;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Unified configuration for the execution router.
///
/// Aggregates routing settings, logging, and an optional inline policy
/// rule set. Rule sets can also live in their own file via
/// `provider::FileRuleStore`; both use the same `[[rules]]` table shape.
///
/// # Example
///
/// ```rust
/// use aegis::config::RouterConfig;
///
/// let config = RouterConfig::default();
/// assert_eq!(config.routing.token_threshold, 4096);
/// assert!(config.rules.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Routing thresholds and policies
    pub routing: RoutingSettings,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Inline policy rule definitions
    pub rules: Vec<PolicyRule>,
}

impl RouterConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports AEGIS_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        // Routing settings
        if let Ok(threshold) = std::env::var("AEGIS_TOKEN_THRESHOLD") {
            if let Ok(t) = threshold.parse() {
                self.routing.token_threshold = t;
            }
        }
        if let Ok(model) = std::env::var("AEGIS_CLOUD_MODEL") {
            self.routing.cloud_model = model;
        }
        if let Ok(privacy) = std::env::var("AEGIS_DEFAULT_PRIVACY") {
            if let Ok(p) = privacy.parse() {
                self.routing.default_privacy = p;
            }
        }
        if let Ok(confirmation) = std::env::var("AEGIS_CONFIRMATION") {
            if let Ok(c) = confirmation.parse() {
                self.routing.confirmation = c;
            }
        }

        // Logging settings
        if let Ok(level) = std::env::var("AEGIS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("AEGIS_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.routing.token_threshold == 0 {
            return Err(ConfigError::Validation {
                field: "routing.token_threshold".to_string(),
                message: "threshold must be non-zero".to_string(),
            });
        }

        validate_rule_set(&self.rules)?;

        Ok(())
    }
}

/// Validate a policy rule set as a whole
///
/// Each rule must pass structural validation and rule ids must be unique.
pub fn validate_rule_set(rules: &[PolicyRule]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for (i, rule) in rules.iter().enumerate() {
        rule.validate().map_err(|message| ConfigError::Validation {
            field: format!("rules[{}]", i),
            message,
        })?;
        if !seen.insert(rule.id.as_str()) {
            return Err(ConfigError::Validation {
                field: format!("rules[{}].id", i),
                message: format!("duplicate rule id '{}'", rule.id),
            });
        }
    }
    Ok(())
}
