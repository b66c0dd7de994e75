//! Score History Log
//!
//! Newest-first list of past scores, capped at the most recent
//! [`HISTORY_CAPACITY`] entries. Older entries fall off the end (count based,
//! not time based). Stored as one JSON array under `neuro_scores`, rewritten
//! whole on every append.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::kv::{KeyValueStore, StorageError};
use crate::constants::KEY_SCORE_HISTORY;
use crate::logic::risk::RiskScore;

/// Maximum number of kept records
pub const HISTORY_CAPACITY: usize = 10;

/// One completed analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub score: RiskScore,
    /// Epoch millis
    #[serde(rename = "ts")]
    pub timestamp: i64,
}

/// Bounded append log over a key-value store
#[derive(Clone)]
pub struct HistoryLog {
    store: Arc<dyn KeyValueStore>,
}

impl HistoryLog {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Record `score` now
    pub fn append(&self, score: RiskScore) -> Result<ScoreRecord, StorageError> {
        self.append_at(score, Utc::now().timestamp_millis())
    }

    /// Record `score` with an explicit timestamp
    pub fn append_at(&self, score: RiskScore, timestamp: i64) -> Result<ScoreRecord, StorageError> {
        let record = ScoreRecord { score, timestamp };

        let mut records = Vec::with_capacity(HISTORY_CAPACITY);
        records.push(record);
        records.extend(self.read_all().into_iter().take(HISTORY_CAPACITY - 1));

        let json = serde_json::to_string(&records)?;
        self.store.set(KEY_SCORE_HISTORY, &json)?;

        log::debug!("History append: score={} ({} records)", score.value(), records.len());
        Ok(record)
    }

    /// Snapshot, newest first. Unreadable history reads as empty and invalid
    /// entries are skipped.
    pub fn read_all(&self) -> Vec<ScoreRecord> {
        let raw = match self.store.get(KEY_SCORE_HISTORY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("Failed to read score history: {}", e);
                return Vec::new();
            }
        };

        let items: Vec<Value> = match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                log::warn!("Score history is not a JSON array ({}), ignoring it", e);
                return Vec::new();
            }
        };

        items
            .into_iter()
            .filter_map(|item| serde_json::from_value::<ScoreRecord>(item).ok())
            .take(HISTORY_CAPACITY)
            .collect()
    }

    pub fn latest(&self) -> Option<ScoreRecord> {
        self.read_all().into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::storage::kv::{FileStore, MemoryStore};

    fn score(v: u8) -> RiskScore {
        RiskScore::try_from(v).unwrap()
    }

    fn memory_log() -> (Arc<MemoryStore>, HistoryLog) {
        let store = Arc::new(MemoryStore::new());
        let log = HistoryLog::new(store.clone());
        (store, log)
    }

    #[test]
    fn test_empty_history() {
        let (_, log) = memory_log();
        assert!(log.read_all().is_empty());
        assert!(log.latest().is_none());
    }

    #[test]
    fn test_newest_first() {
        let (_, log) = memory_log();
        log.append_at(score(2), 1_000).unwrap();
        log.append_at(score(8), 2_000).unwrap();

        let all = log.read_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], ScoreRecord { score: score(8), timestamp: 2_000 });
        assert_eq!(all[1].score, score(2));
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let (_, log) = memory_log();
        for i in 0..25u8 {
            log.append_at(score(i % 10 + 1), i as i64).unwrap();
            let all = log.read_all();
            assert!(all.len() <= HISTORY_CAPACITY);
            assert_eq!(all[0].timestamp, i as i64);
        }

        let all = log.read_all();
        assert_eq!(all.len(), HISTORY_CAPACITY);
        // oldest kept is the 16th append
        assert_eq!(all.last().unwrap().timestamp, 15);
    }

    #[test]
    fn test_wire_format() {
        let (store, log) = memory_log();
        log.append_at(score(6), 1_700_000_000_000).unwrap();

        let raw = store.get(KEY_SCORE_HISTORY).unwrap().unwrap();
        assert_eq!(raw, r#"[{"score":6,"ts":1700000000000}]"#);
    }

    #[test]
    fn test_corrupt_and_invalid_entries_are_skipped() {
        let (store, log) = memory_log();
        store.set(KEY_SCORE_HISTORY, "definitely not json").unwrap();
        assert!(log.read_all().is_empty());

        store
            .set(
                KEY_SCORE_HISTORY,
                r#"[{"score":3,"ts":5},{"score":42,"ts":4},{"ts":3},"x",{"score":9,"ts":2}]"#,
            )
            .unwrap();
        let all = log.read_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].score, score(3));
        assert_eq!(all[1].score, score(9));

        // appending rewrites a clean list
        log.append_at(score(1), 6).unwrap();
        assert_eq!(log.read_all().len(), 3);
    }

    #[test]
    fn test_history_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        {
            let log = HistoryLog::new(Arc::new(FileStore::open(dir.path()).unwrap()));
            log.append_at(score(7), 10).unwrap();
            log.append_at(score(4), 20).unwrap();
        }

        let log = HistoryLog::new(Arc::new(FileStore::open(dir.path()).unwrap()));
        let all = log.read_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].score, score(4));
        assert_eq!(log.latest().unwrap().timestamp, 20);
    }
}
