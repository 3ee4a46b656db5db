//! Boundary types for the matching core.
//!
//! SDK/database response shapes are converted into these records at ingress;
//! nothing loosely typed travels past this module.

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// Which side of a trip an actor is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Rider,
    Driver,
}

impl Role {
    /// The role a candidate must have to be matched against this one.
    pub fn opposite(self) -> Role {
        match self {
            Role::Rider => Role::Driver,
            Role::Driver => Role::Rider,
        }
    }
}

/// A pending trip intent: one actor's declared start and end point.
///
/// Created when an actor publishes or requests a ride; read-only for the
/// matching core. Expiry and deletion are handled by whoever owns the pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub user_id: String,
    pub role: Role,
    pub start: GeoPoint,
    pub end: GeoPoint,
    /// Creation time (epoch ms). Used for ordering only, never for matching.
    pub requested_at_ms: u64,
}

impl RouteRequest {
    /// Both endpoints are well-formed coordinates. `start != end` is assumed
    /// upstream and not enforced here.
    pub fn is_valid(&self) -> bool {
        self.start.is_valid() && self.end.is_valid()
    }
}

/// Outcome of testing one rider/driver pair in a matching pass.
///
/// `entry_index`/`exit_index` are the polyline positions closest to the
/// rider's start/end when those fell within tolerance; kept for diagnostics.
/// Ephemeral: produced and consumed within a single pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub rider_id: String,
    pub driver_id: String,
    pub accepted: bool,
    pub entry_index: Option<usize>,
    pub exit_index: Option<usize>,
}

/// The persisted-match contract handed to a [`MatchSink`](crate::sink::MatchSink).
///
/// Downstream features (map display, acceptance flow, chat) depend on this
/// exact field set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub rider_id: String,
    pub driver_id: String,
    pub driver_start: GeoPoint,
    pub driver_end: GeoPoint,
    pub rider_start: GeoPoint,
    pub rider_end: GeoPoint,
    pub matched_at_ms: u64,
}

impl MatchRecord {
    /// Build the record for an accepted pair. `rider` and `driver` may be
    /// passed in either order; roles decide which endpoints go where.
    pub fn from_pair(a: &RouteRequest, b: &RouteRequest, matched_at_ms: u64) -> Self {
        let (rider, driver) = match a.role {
            Role::Rider => (a, b),
            Role::Driver => (b, a),
        };
        Self {
            rider_id: rider.user_id.clone(),
            driver_id: driver.user_id.clone(),
            driver_start: driver.start,
            driver_end: driver.end,
            rider_start: rider.start,
            rider_end: rider.end,
            matched_at_ms,
        }
    }
}
