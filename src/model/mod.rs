//! Core data model shared by the policy engine, router, and coordinator
//!
//! Everything here is an immutable value record: constructed once per
//! submission, passed by reference through evaluation and routing, and never
//! mutated in place.

pub mod question;
pub mod runtime;
pub mod tokens;

pub use question::{Intent, PrivacyLevel, Question};
pub use runtime::{LocalCapability, NetworkState, RuntimeState};
pub use tokens::estimate_tokens;
