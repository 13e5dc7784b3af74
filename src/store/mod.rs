//! Player and match store.
//!
//! The store owns registration and match reporting and exposes the read
//! side the pairing engine needs: standings plus match history. Reads go
//! through `&self` and writes through `&mut self`, so a [`Snapshot`] taken
//! from one borrow always sees standings and history from the same state.

mod jsonl;
mod memory;

pub use jsonl::JsonlStore;
pub use memory::MemoryStore;

use thiserror::Error;

use crate::models::{compute_standings, MatchRecord, Player, PlayerId, Round, Standing};
use crate::pairing::{MatchHistory, PairingEngine, PairingError, PlayedPairs};
use crate::storage::StorageError;

/// Errors that can occur while reading or mutating a store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Unknown player: {0}")]
    UnknownPlayer(PlayerId),

    #[error("Player {0} cannot play against themselves")]
    SelfMatch(PlayerId),

    #[error("Players {a} and {b} have already played each other")]
    Rematch { a: PlayerId, b: PlayerId },

    #[error("Invalid player name: {0:?}")]
    InvalidName(String),
}

/// Persistent tournament state.
pub trait TournamentStore {
    /// Register a new player and return the assigned id.
    fn register_player(&mut self, name: &str) -> Result<PlayerId, StoreError>;

    /// Record the outcome of a single match.
    fn report_match(
        &mut self,
        winner: PlayerId,
        loser: PlayerId,
    ) -> Result<MatchRecord, StoreError>;

    /// All players in registration order.
    fn players(&self) -> Result<Vec<Player>, StoreError>;

    /// All matches in report order.
    fn matches(&self) -> Result<Vec<MatchRecord>, StoreError>;

    /// Remove every match, resetting all records. Returns the number removed.
    fn delete_matches(&mut self) -> Result<usize, StoreError>;

    /// Remove every player and every match. Returns the number of players removed.
    fn delete_players(&mut self) -> Result<usize, StoreError>;

    fn count_players(&self) -> Result<usize, StoreError> {
        Ok(self.players()?.len())
    }

    /// Current standings, wins descending, ties in registration order.
    fn standings(&self) -> Result<Vec<Standing>, StoreError> {
        Ok(compute_standings(&self.players()?, &self.matches()?))
    }

    /// Standings and match history from a single read.
    fn snapshot(&self) -> Result<Snapshot, StoreError> {
        Ok(Snapshot::new(&self.players()?, &self.matches()?))
    }
}

/// A consistent view of standings and history, ready for pairing.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub standings: Vec<Standing>,
    pub history: PlayedPairs,
}

impl Snapshot {
    pub fn new(players: &[Player], matches: &[MatchRecord]) -> Self {
        Self {
            standings: compute_standings(players, matches),
            history: PlayedPairs::from_matches(matches),
        }
    }

    /// The round the next pairing would be for.
    pub fn next_round_number(&self) -> u32 {
        self.standings
            .iter()
            .map(|s| s.matches_played)
            .max()
            .unwrap_or(0)
            + 1
    }

    pub fn pair_next_round(&self, engine: &PairingEngine) -> Result<Round, PairingError> {
        let pairings = engine.generate(&self.standings, &self.history)?;
        Ok(Round {
            number: self.next_round_number(),
            pairings,
        })
    }
}

fn validate_name(name: &str) -> Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn validate_report(
    players: &[Player],
    history: &PlayedPairs,
    winner: PlayerId,
    loser: PlayerId,
    allow_rematches: bool,
) -> Result<(), StoreError> {
    for id in [winner, loser] {
        if !players.iter().any(|p| p.id == id) {
            return Err(StoreError::UnknownPlayer(id));
        }
    }
    if winner == loser {
        return Err(StoreError::SelfMatch(winner));
    }
    if !allow_rematches && history.has_played(winner, loser) {
        return Err(StoreError::Rematch {
            a: winner,
            b: loser,
        });
    }
    Ok(())
}
