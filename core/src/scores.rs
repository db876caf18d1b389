//! Score persistence.
//!
//! A session never writes storage directly. It talks to a [`ScoreStore`] handed in by the host,
//! which keeps a [`ScoreRecord`]: the best score ever reached and a short [`Leaderboard`].

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Number of entries kept on the leaderboard.
pub const LEADERBOARD_SIZE: usize = 5;

/// Top scores, highest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    top: Vec<Score>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `score`, keeping the best [`LEADERBOARD_SIZE`] entries.
    ///
    /// Returns the 1-based rank of the new entry, or `None` if it did not make the board.
    pub fn insert(&mut self, score: Score) -> Option<usize> {
        // ties rank the newcomer below the existing entries
        let position = self.top.partition_point(|&entry| entry >= score);
        if position >= LEADERBOARD_SIZE {
            return None;
        }
        self.top.insert(position, score);
        self.top.truncate(LEADERBOARD_SIZE);
        Some(position + 1)
    }

    pub fn entries(&self) -> &[Score] {
        &self.top
    }

    pub fn best(&self) -> Option<Score> {
        self.top.first().copied()
    }

    pub fn len(&self) -> usize {
        self.top.len()
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_empty()
    }

    /// Restores the ordering and size invariants after decoding untrusted data.
    fn normalize(&mut self) {
        self.top.sort_unstable_by(|a, b| b.cmp(a));
        self.top.truncate(LEADERBOARD_SIZE);
    }
}

/// Everything that survives between sessions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    #[serde(default)]
    pub high_score: Score,
    #[serde(default)]
    pub leaderboard: Leaderboard,
}

impl ScoreRecord {
    /// Records a finished session's score. Returns whether the high score went up.
    pub fn submit(&mut self, score: Score) -> bool {
        if let Some(rank) = self.leaderboard.insert(score) {
            log::debug!("Score {} entered the leaderboard at rank {}", score, rank);
        }
        if score > self.high_score {
            self.high_score = score;
            true
        } else {
            false
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|err| {
            log::warn!("Could not encode score record: {}", err);
            GameError::MalformedRecord
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let mut record: Self = serde_json::from_str(json).map_err(|err| {
            log::warn!("Discarding malformed score record: {}", err);
            GameError::MalformedRecord
        })?;
        record.leaderboard.normalize();
        if let Some(best) = record.leaderboard.best() {
            record.high_score = record.high_score.max(best);
        }
        Ok(record)
    }
}

/// Persistence port for scores, implemented by the host (browser storage, a file, memory).
pub trait ScoreStore {
    fn load(&self) -> ScoreRecord;
    fn save(&mut self, record: &ScoreRecord);
}

impl<S: ScoreStore + ?Sized> ScoreStore for &mut S {
    fn load(&self) -> ScoreRecord {
        (**self).load()
    }

    fn save(&mut self, record: &ScoreRecord) {
        (**self).save(record)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryScoreStore {
    record: ScoreRecord,
    saves: usize,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: ScoreRecord) -> Self {
        Self { record, saves: 0 }
    }

    pub fn record(&self) -> &ScoreRecord {
        &self.record
    }

    /// How many times a record was written.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> ScoreRecord {
        self.record.clone()
    }

    fn save(&mut self, record: &ScoreRecord) {
        self.record = record.clone();
        self.saves += 1;
    }
}
