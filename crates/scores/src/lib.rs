//! Leaderboard storage.
//!
//! The engine only reports a final score. This crate keeps the top ten
//! results, sorted by score (highest first), and persists them as a small
//! JSON document:
//!
//! ```json
//! {"records":[{"name":"ada","score":1200,"timestamp":1760000000}]}
//! ```

pub mod keeper;
pub mod store;

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use blockfall_types::LEADERBOARD_CAPACITY;

pub use keeper::ScoreKeeper;
pub use store::{JsonFileStore, MemoryStore, ScoreStore};

/// One finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub score: u32,
    /// Unix seconds
    pub timestamp: u64,
}

impl ScoreRecord {
    /// Record stamped with the current wall-clock time
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self {
            name: name.into(),
            score,
            timestamp,
        }
    }
}

/// Top scores, highest first, at most [`LEADERBOARD_CAPACITY`] entries.
///
/// Equal scores keep insertion order, so an older record outranks a newer
/// one with the same score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    records: Vec<ScoreRecord>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from arbitrary records, sorting and trimming them
    pub fn from_records(mut records: Vec<ScoreRecord>) -> Self {
        // Stable sort keeps insertion order among equal scores.
        records.sort_by(|a, b| b.score.cmp(&a.score));
        records.truncate(LEADERBOARD_CAPACITY);
        Self { records }
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn best(&self) -> Option<&ScoreRecord> {
        self.records.first()
    }

    /// Whether `score` would make it onto the board
    pub fn qualifies(&self, score: u32) -> bool {
        self.records.len() < LEADERBOARD_CAPACITY
            || self.records.last().is_some_and(|r| score > r.score)
    }

    /// Insert a record, returning its rank (0-based) if it was kept
    pub fn insert(&mut self, record: ScoreRecord) -> Option<usize> {
        if !self.qualifies(record.score) {
            return None;
        }
        let rank = self
            .records
            .iter()
            .position(|r| record.score > r.score)
            .unwrap_or(self.records.len());
        self.records.insert(rank, record);
        self.records.truncate(LEADERBOARD_CAPACITY);
        Some(rank)
    }
}
