//! Sources for policy rules and runtime state
//!
//! The coordinator never owns rules or capability data directly. It reads
//! them through the provider traits at the start of each request, so a rule
//! edit or a connectivity change is visible to the very next query without
//! any coordination.
//!
//! Two rule stores ship with the crate: [`MemoryRuleStore`] for
//! programmatic management and [`FileRuleStore`] for TOML files on disk.
//! [`StaticCapability`] and [`StaticNetwork`] are settable snapshots for
//! deployments (and tests) that update state from the outside.

mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::FileRuleStore;
pub use memory::MemoryRuleStore;

use crate::model::{LocalCapability, NetworkState};
use crate::policy::PolicyRule;
use std::sync::RwLock;

/// Source of the current policy rule set.
pub trait RuleProvider: Send + Sync {
    /// Return the full rule set as value copies.
    ///
    /// Order is not significant; the policy engine sorts rules into its
    /// canonical `(priority, id)` order before evaluating.
    fn get_policy_rules(&self) -> Vec<PolicyRule>;
}

/// Source of the local model's current capability profile.
pub trait CapabilityProvider: Send + Sync {
    fn get_local_capability(&self) -> LocalCapability;
}

/// Source of the current network connectivity state.
pub trait NetworkStateProvider: Send + Sync {
    fn get_network_state(&self) -> NetworkState;
}

/// Capability provider holding an externally settable snapshot.
pub struct StaticCapability {
    inner: RwLock<LocalCapability>,
}

impl StaticCapability {
    pub fn new(capability: LocalCapability) -> Self {
        Self {
            inner: RwLock::new(capability),
        }
    }

    /// Replace the current snapshot.
    pub fn set(&self, capability: LocalCapability) {
        match self.inner.write() {
            Ok(mut guard) => *guard = capability,
            Err(poisoned) => *poisoned.into_inner() = capability,
        }
    }
}

impl Default for StaticCapability {
    fn default() -> Self {
        Self::new(LocalCapability::default())
    }
}

impl CapabilityProvider for StaticCapability {
    fn get_local_capability(&self) -> LocalCapability {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

/// Network provider holding an externally settable snapshot.
pub struct StaticNetwork {
    inner: RwLock<NetworkState>,
}

impl StaticNetwork {
    pub fn new(state: NetworkState) -> Self {
        Self {
            inner: RwLock::new(state),
        }
    }

    /// Replace the current state.
    pub fn set(&self, state: NetworkState) {
        match self.inner.write() {
            Ok(mut guard) => *guard = state,
            Err(poisoned) => *poisoned.into_inner() = state,
        }
    }
}

impl Default for StaticNetwork {
    fn default() -> Self {
        Self::new(NetworkState::default())
    }
}

impl NetworkStateProvider for StaticNetwork {
    fn get_network_state(&self) -> NetworkState {
        match self.inner.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
