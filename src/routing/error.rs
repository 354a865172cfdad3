//! Error types for routing failures

use thiserror::Error;

/// Why no routing decision could be produced.
///
/// Every failure is typed — the router never substitutes a default route.
/// `NetworkUnavailable` is deliberately distinct from a policy block so a
/// caller can distinguish "refused" from "can't reach the cloud right now".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// A block action reached the router as data
    #[error("Blocked by policy: {reason}")]
    PolicyViolation { reason: String },

    /// A cloud route was required but the network is not online
    #[error("Cloud execution required but network is unavailable")]
    NetworkUnavailable,

    /// The runtime snapshot cannot support the chosen route
    #[error("Invalid routing configuration: {reason}")]
    InvalidConfiguration { reason: String },
}
