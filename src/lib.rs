//! # Swiss Pairing
//!
//! Standings and next-round pairings for a Swiss-system tournament.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (players, matches, standings, pairings)
//! - **pairing**: The pairing engine and match-history lookups
//! - **store**: Player/match store and the standings it provides
//! - **storage**: Filesystem JSONL operations backing the file store
//! - **config**: Configuration loading and validation

pub mod config;
pub mod models;
pub mod pairing;
pub mod storage;
pub mod store;

pub use models::*;
pub use pairing::{generate_pairings, MatchHistory, PairingEngine, PairingError, PlayedPairs};
pub use store::{JsonlStore, MemoryStore, Snapshot, StoreError, TournamentStore};
