//! In-memory store.

use tracing::info;

use super::{validate_name, validate_report, StoreError, TournamentStore};
use crate::models::{MatchRecord, Player, PlayerId};
use crate::pairing::PlayedPairs;

/// Vec-backed store. Useful for tests and one-off simulations.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    players: Vec<Player>,
    matches: Vec<MatchRecord>,
    next_player_id: u32,
    next_match_sequence: u64,
    allow_rematches: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            matches: Vec::new(),
            next_player_id: 1,
            next_match_sequence: 1,
            allow_rematches: false,
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_allow_rematches(mut self, allow: bool) -> Self {
        self.allow_rematches = allow;
        self
    }
}

impl TournamentStore for MemoryStore {
    fn register_player(&mut self, name: &str) -> Result<PlayerId, StoreError> {
        validate_name(name)?;

        let id = PlayerId(self.next_player_id);
        self.next_player_id += 1;
        self.players.push(Player::new(id, name.to_string()));

        info!(player_id = %id, "Registered player {}", name);
        Ok(id)
    }

    fn report_match(
        &mut self,
        winner: PlayerId,
        loser: PlayerId,
    ) -> Result<MatchRecord, StoreError> {
        let history = PlayedPairs::from_matches(&self.matches);
        validate_report(&self.players, &history, winner, loser, self.allow_rematches)?;

        let record = MatchRecord::new(self.next_match_sequence, winner, loser);
        self.next_match_sequence += 1;
        self.matches.push(record.clone());

        info!(match_id = %record.id, "Recorded {} beat {}", winner, loser);
        Ok(record)
    }

    fn players(&self) -> Result<Vec<Player>, StoreError> {
        Ok(self.players.clone())
    }

    fn matches(&self) -> Result<Vec<MatchRecord>, StoreError> {
        Ok(self.matches.clone())
    }

    fn count_players(&self) -> Result<usize, StoreError> {
        Ok(self.players.len())
    }

    fn delete_matches(&mut self) -> Result<usize, StoreError> {
        let removed = self.matches.len();
        self.matches.clear();
        info!("Deleted {} matches", removed);
        Ok(removed)
    }

    fn delete_players(&mut self) -> Result<usize, StoreError> {
        self.delete_matches()?;
        let removed = self.players.len();
        self.players.clear();
        info!("Deleted {} players", removed);
        Ok(removed)
    }
}
