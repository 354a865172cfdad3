//! Aegis - Policy-based execution router for local-first LLM applications
//!
//! This library decides where a question executes (on-device or cloud) by
//! evaluating configurable policy rules and deterministic routing logic,
//! then coordinates execution with a single bounded fallback.
//!
//! The pipeline has three stages:
//!
//! 1. [`policy::evaluate`] folds matching rules into an effective action.
//! 2. [`routing::route`] turns that action, the question, and a runtime
//!    snapshot into a [`routing::RoutingDecision`].
//! 3. [`coordinator::Coordinator`] dispatches to an executor and applies
//!    the confirmation and fallback policies.
//!
//! The first two stages are pure functions: no I/O, no clock, no logging.
//! Identical inputs always produce identical decisions.

pub mod config;
pub mod coordinator;
pub mod executor;
pub mod logging;
pub mod model;
pub mod policy;
pub mod provider;
pub mod routing;

pub use config::{ConfirmationPolicy, RouterConfig, RoutingSettings};
pub use coordinator::{Coordinator, ExecutionError, ExecutionReport, QueryRequest};
pub use executor::{CloudExecutor, ExecutorError, LocalExecutor};
pub use model::{Intent, LocalCapability, NetworkState, PrivacyLevel, Question, RuntimeState};
pub use policy::{PolicyEvaluationResult, PolicyRule, PolicyViolation};
pub use routing::{RouteRule, RouteTarget, RoutingDecision, RoutingError};
