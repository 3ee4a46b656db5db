//! Error taxonomy for the matching pass.
//!
//! Almost everything here is recovered locally: a candidate that cannot be
//! evaluated is skipped and logged, never allowed to abort the batch. The
//! only variant that propagates out of a pass is `Sink`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchError {
    /// Transport-level failure reaching the route provider.
    #[error("route provider unavailable: {reason}")]
    ProviderUnavailable { reason: String },

    /// Provider responded but found no viable road route.
    #[error("provider returned no route")]
    EmptyRoute,

    /// A route request carried malformed coordinates.
    #[error("invalid route request from {user_id}")]
    InvalidRequest { user_id: String },

    /// Persisting an accepted match failed.
    #[error("match sink write failed: {reason}")]
    Sink { reason: String },
}
