//! Filesystem storage.
//!
//! Each tournament gets its own directory under the data dir:
//! - `players.jsonl` and `matches.jsonl` hold the records
//! - `state.json` holds id counters

pub mod jsonl;

pub use jsonl::*;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn tournament_dir(&self, tournament: &str) -> PathBuf {
        self.data_dir.join(tournament)
    }

    pub fn state_path(&self, tournament: &str) -> PathBuf {
        self.tournament_dir(tournament).join("state.json")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
