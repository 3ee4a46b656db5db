//! Candidate pool: snapshot source of pending route requests.
//!
//! The matching pass works on a point-in-time snapshot, the same way the
//! batch matcher collects waiting riders and idle drivers before running.
//! Expiring matched or abandoned requests is the pool owner's job.

use crate::model::{Role, RouteRequest};

/// Source of currently pending opposite-role requests.
pub trait CandidatePool: Send + Sync {
    /// Snapshot of pending requests with the given role. Listing order is
    /// implementation-defined; deterministic ordering is recommended so that
    /// the pass's first-accepted tie-break is reproducible.
    fn list_pending(&self, role: Role) -> Vec<RouteRequest>;
}

/// Vec-backed pool for tests, demos and single-process deployments.
///
/// `list_pending` returns requests ordered by `requested_at_ms`, then
/// `user_id`, so iteration order is stable across runs.
#[derive(Debug, Default)]
pub struct InMemoryCandidatePool {
    requests: Vec<RouteRequest>,
}

impl InMemoryCandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, request: RouteRequest) {
        self.requests.push(request);
    }

    /// Drop a request once it has been matched or abandoned.
    pub fn remove(&mut self, user_id: &str) {
        self.requests.retain(|r| r.user_id != user_id);
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

impl CandidatePool for InMemoryCandidatePool {
    fn list_pending(&self, role: Role) -> Vec<RouteRequest> {
        let mut pending: Vec<RouteRequest> = self
            .requests
            .iter()
            .filter(|r| r.role == role)
            .cloned()
            .collect();
        pending.sort_by(|a, b| {
            a.requested_at_ms
                .cmp(&b.requested_at_ms)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        pending
    }
}
