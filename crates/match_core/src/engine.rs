//! One matching pass: pool snapshot, pairwise evaluation, first accepted
//! pair persisted.
//!
//! Invoked synchronously per submission event (an actor publishing or
//! requesting a route), not as a background loop. The pass itself performs
//! no mutation beyond the sink write; marking requests matched and guarding
//! against concurrent double-booking stay with the caller.

use crate::matcher::RouteMatcher;
use crate::model::{MatchRecord, RouteRequest};
use crate::pool::CandidatePool;
use crate::sink::MatchSink;
use crate::MatchError;

/// Run a single matching pass for `query` against the pool's pending
/// opposite-role requests.
///
/// Among multiple accepted candidates the first in pool order wins; with
/// the in-memory pool that is the oldest request. Returns the persisted
/// record, `Ok(None)` when nothing matched (including the empty-pool case),
/// and an error only when the sink write fails.
pub fn run_matching_pass(
    query: &RouteRequest,
    pool: &dyn CandidatePool,
    matcher: &RouteMatcher,
    sink: &dyn MatchSink,
    now_ms: u64,
) -> Result<Option<MatchRecord>, MatchError> {
    let candidates = pool.list_pending(query.role.opposite());
    if candidates.is_empty() {
        return Ok(None);
    }

    let evaluated = matcher.find_matches(query, &candidates);
    let Some(winner) = evaluated
        .iter()
        .position(|candidate| candidate.accepted)
        .map(|index| &candidates[index])
    else {
        log::debug!(
            "no match for {} among {} candidates",
            query.user_id,
            candidates.len()
        );
        return Ok(None);
    };

    let record = MatchRecord::from_pair(query, winner, now_ms);
    sink.record(&record)?;
    log::debug!(
        "matched rider {} with driver {}",
        record.rider_id,
        record.driver_id
    );
    Ok(Some(record))
}
