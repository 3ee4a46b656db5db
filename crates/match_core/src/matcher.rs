//! Route-proximity matching: decide which candidate routes are compatible
//! with a query actor's start and end points.
//!
//! The driver side always owns the sampled route. When the query actor is a
//! driver, their geometry is fetched once and every rider candidate is
//! tested against it; when the query actor is a rider, each driver
//! candidate's geometry is fetched in turn and the rider's fixed endpoints
//! are tested against it. Both orientations share one evaluation path.

use rayon::prelude::*;

use crate::error::MatchError;
use crate::geo::closest_vertex;
use crate::model::{MatchCandidate, Role, RouteRequest};
use crate::routing::{RouteGeometry, RouteProvider};
use crate::tolerance::ToleranceConfig;

/// Knobs for one matcher instance.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct MatcherConfig {
    pub tolerance: ToleranceConfig,
    /// Fan per-candidate provider lookups out across the rayon pool. Only
    /// relevant for rider-side queries, where each candidate needs its own
    /// network-bound geometry fetch.
    pub parallel: bool,
}

impl MatcherConfig {
    pub fn with_tolerance(mut self, tolerance: ToleranceConfig) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Stateless pairwise matcher over a route provider.
pub struct RouteMatcher {
    provider: Box<dyn RouteProvider>,
    config: MatcherConfig,
}

impl RouteMatcher {
    pub fn new(provider: Box<dyn RouteProvider>) -> Self {
        Self::with_config(provider, MatcherConfig::default().with_parallel(true))
    }

    pub fn with_config(provider: Box<dyn RouteProvider>, config: MatcherConfig) -> Self {
        Self { provider, config }
    }

    /// Evaluate every candidate against the query actor and return one
    /// [`MatchCandidate`] per pair, in candidate order.
    ///
    /// Callers filter for `accepted == true`; rejected entries are returned
    /// for diagnostics. Per-candidate failures (no route, malformed
    /// coordinates) reject that candidate only and are logged, never raised.
    /// An unreadable query-side geometry degrades to an all-rejected result.
    ///
    /// Known limitation, kept as documented behavior: acceptance only checks
    /// that the pickup's polyline index precedes the drop-off's within
    /// tolerance. The detour from the route owner's own endpoints to the
    /// rider's is not bounded.
    pub fn find_matches(
        &self,
        query: &RouteRequest,
        candidates: &[RouteRequest],
    ) -> Vec<MatchCandidate> {
        if candidates.is_empty() {
            return Vec::new();
        }

        if !query.is_valid() {
            log::warn!(
                "{}; rejecting all candidates",
                MatchError::InvalidRequest {
                    user_id: query.user_id.clone(),
                }
            );
            return candidates
                .iter()
                .map(|candidate| rejected(query, candidate))
                .collect();
        }

        match query.role {
            Role::Driver => {
                // Query owns the route: one fetch, shared by every candidate.
                let geometry = self.provider.route(query.start, query.end);
                if geometry.is_empty() {
                    log::debug!(
                        "no route for driver {}; pass yields no matches",
                        query.user_id
                    );
                    return candidates
                        .iter()
                        .map(|candidate| rejected(query, candidate))
                        .collect();
                }
                self.evaluate_all(candidates, |rider| {
                    if !rider.is_valid() {
                        log::warn!(
                            "skipping candidate: {}",
                            MatchError::InvalidRequest {
                                user_id: rider.user_id.clone(),
                            }
                        );
                        return rejected(query, rider);
                    }
                    evaluate_pair(query, rider, rider, &geometry, &self.config.tolerance)
                })
            }
            Role::Rider => {
                // Each driver candidate owns its route: one fetch per candidate.
                self.evaluate_all(candidates, |driver| {
                    if !driver.is_valid() {
                        log::warn!(
                            "skipping candidate: {}",
                            MatchError::InvalidRequest {
                                user_id: driver.user_id.clone(),
                            }
                        );
                        return rejected(query, driver);
                    }
                    let geometry = self.provider.route(driver.start, driver.end);
                    if geometry.is_empty() {
                        log::debug!("skipping candidate {}: no route", driver.user_id);
                        return rejected(query, driver);
                    }
                    evaluate_pair(query, driver, query, &geometry, &self.config.tolerance)
                })
            }
        }
    }

    fn evaluate_all<F>(&self, candidates: &[RouteRequest], evaluate: F) -> Vec<MatchCandidate>
    where
        F: Fn(&RouteRequest) -> MatchCandidate + Sync,
    {
        if self.config.parallel && candidates.len() > 1 {
            candidates.par_iter().map(&evaluate).collect()
        } else {
            candidates.iter().map(&evaluate).collect()
        }
    }
}

/// Test the rider's endpoints against the route owner's polyline.
///
/// Entry/exit are the closest polyline vertices to the rider's start/end,
/// each gated by the length-scaled tolerance. Accepted iff both are found
/// and the entry strictly precedes the exit along the direction of travel.
fn evaluate_pair(
    query: &RouteRequest,
    candidate: &RouteRequest,
    rider: &RouteRequest,
    geometry: &RouteGeometry,
    tolerance: &ToleranceConfig,
) -> MatchCandidate {
    let tolerance_m = tolerance.tolerance_m(geometry.length_km);

    let entry_index = closest_vertex(&geometry.polyline, rider.start)
        .filter(|(_, dist_m)| *dist_m <= tolerance_m)
        .map(|(index, _)| index);
    let exit_index = closest_vertex(&geometry.polyline, rider.end)
        .filter(|(_, dist_m)| *dist_m <= tolerance_m)
        .map(|(index, _)| index);

    let accepted = matches!((entry_index, exit_index), (Some(entry), Some(exit)) if entry < exit);

    let (rider_id, driver_id) = pair_ids(query, candidate);
    MatchCandidate {
        rider_id,
        driver_id,
        accepted,
        entry_index,
        exit_index,
    }
}

fn rejected(query: &RouteRequest, candidate: &RouteRequest) -> MatchCandidate {
    let (rider_id, driver_id) = pair_ids(query, candidate);
    MatchCandidate {
        rider_id,
        driver_id,
        accepted: false,
        entry_index: None,
        exit_index: None,
    }
}

fn pair_ids(query: &RouteRequest, candidate: &RouteRequest) -> (String, String) {
    match query.role {
        Role::Rider => (query.user_id.clone(), candidate.user_id.clone()),
        Role::Driver => (candidate.user_id.clone(), query.user_id.clone()),
    }
}
