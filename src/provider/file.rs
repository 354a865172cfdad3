//! TOML-file-backed policy rule store

use super::RuleProvider;
use crate::config::{validate_rule_set, ConfigError};
use crate::policy::PolicyRule;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::info;

#[derive(Debug, Deserialize)]
struct RuleDocument {
    #[serde(default)]
    rules: Vec<PolicyRule>,
}

/// Rule store backed by a TOML file on disk.
///
/// The file holds an array of `[[rules]]` tables. Rules are loaded eagerly
/// and validated as a set; `reload` re-reads the file in place so that rule
/// edits take effect without restarting the process.
pub struct FileRuleStore {
    path: PathBuf,
    rules: RwLock<Vec<PolicyRule>>,
}

impl FileRuleStore {
    /// Load rules from the given TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist,
    /// `ConfigError::Parse` if it is not valid TOML, or
    /// `ConfigError::Validation` if any rule fails structural validation.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let rules = read_rules(&path)?;
        info!(path = %path.display(), count = rules.len(), "Loaded policy rules");
        Ok(Self {
            path,
            rules: RwLock::new(rules),
        })
    }

    /// Re-read the rule file, replacing the in-memory set.
    ///
    /// On error the previously loaded rules remain in effect.
    pub fn reload(&self) -> Result<usize, ConfigError> {
        let rules = read_rules(&self.path)?;
        let count = rules.len();
        match self.rules.write() {
            Ok(mut guard) => *guard = rules,
            Err(poisoned) => *poisoned.into_inner() = rules,
        }
        info!(path = %self.path.display(), count, "Reloaded policy rules");
        Ok(count)
    }

    /// Path this store reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of currently loaded rules.
    pub fn rule_count(&self) -> usize {
        match self.rules.read() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }
}

impl RuleProvider for FileRuleStore {
    fn get_policy_rules(&self) -> Vec<PolicyRule> {
        match self.rules.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

fn read_rules(path: &Path) -> Result<Vec<PolicyRule>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    let document: RuleDocument =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate_rule_set(&document.rules)?;
    Ok(document.rules)
}
