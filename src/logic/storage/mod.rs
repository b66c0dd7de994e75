//! Storage Module
//!
//! - `kv`: key-value collaborator (file-backed and in-memory)
//! - `history`: bounded score history on top of it
//! - `credential`: bearer token persistence

pub mod kv;
pub mod history;
pub mod credential;

pub use kv::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use history::{HistoryLog, ScoreRecord, HISTORY_CAPACITY};
