//! Completed Guess Who session records.
//!
//! Records are produced by the game flow and read here on demand;
//! persistence lives outside this crate. [`SessionStore`] is the seam,
//! [`InMemorySessionStore`] backs tests and previews.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed memory-game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub total_rounds: u32,
    pub correct_count: u32,
    pub total_attempts: u32,
}

impl SessionRecord {
    /// A record is well formed when it finished no earlier than it started.
    /// Malformed records are excluded from aggregates rather than raising.
    pub fn is_well_formed(&self) -> bool {
        self.finished_at >= self.started_at
    }

    /// Session length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }

    /// Fraction of rounds answered correctly, `None` for zero-round sessions
    /// (kept out of ratio means to avoid division by zero).
    pub fn score_ratio(&self) -> Option<f64> {
        if self.total_rounds == 0 {
            None
        } else {
            Some(f64::from(self.correct_count) / f64::from(self.total_rounds))
        }
    }
}

/// Read-only source of completed sessions.
///
/// Implementations return records in store order; analytics sorts by its own
/// anchor where ordering matters.
pub trait SessionStore: Send + Sync {
    fn read_all(&self) -> Vec<SessionRecord>;
}

/// In-memory session store for tests and previews.
#[derive(Default)]
pub struct InMemorySessionStore {
    records: Mutex<Vec<SessionRecord>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, record: SessionRecord) {
        self.records.lock().unwrap().push(record);
    }
}

impl SessionStore for InMemorySessionStore {
    fn read_all(&self) -> Vec<SessionRecord> {
        self.records.lock().unwrap().clone()
    }
}
