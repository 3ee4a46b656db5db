//! Match sink: downstream persistence boundary for confirmed matches.
//!
//! The core never writes matched state itself; whoever runs the pass
//! supplies a sink, and exclusivity (at most one active match per actor)
//! must be enforced at persistence time, e.g. with a unique constraint.

use std::sync::Mutex;

use crate::error::MatchError;
use crate::model::MatchRecord;

/// Destination for accepted matches.
pub trait MatchSink: Send + Sync {
    fn record(&self, record: &MatchRecord) -> Result<(), MatchError>;
}

/// Mutex-guarded vec sink for tests and demos.
#[derive(Debug, Default)]
pub struct InMemoryMatchSink {
    records: Mutex<Vec<MatchRecord>>,
}

impl InMemoryMatchSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn records(&self) -> Vec<MatchRecord> {
        self.records
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl MatchSink for InMemoryMatchSink {
    fn record(&self, record: &MatchRecord) -> Result<(), MatchError> {
        let mut records = self.records.lock().map_err(|_| MatchError::Sink {
            reason: "sink mutex poisoned".to_string(),
        })?;
        records.push(record.clone());
        Ok(())
    }
}
