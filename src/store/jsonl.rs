//! File-backed store using the JSONL layout from [`crate::storage`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{validate_name, validate_report, StoreError, TournamentStore};
use crate::models::{MatchRecord, Player, PlayerId};
use crate::pairing::PlayedPairs;
use crate::storage::{read_json, write_json, EntityType, JsonlReader, JsonlWriter, StorageConfig};

/// Id counters, persisted so ids survive a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct StoreState {
    next_player_id: u32,
    next_match_sequence: u64,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            next_player_id: 1,
            next_match_sequence: 1,
        }
    }
}

/// Store persisting one tournament under `<data_dir>/<tournament>/`.
#[derive(Debug, Clone)]
pub struct JsonlStore {
    storage: StorageConfig,
    tournament: String,
    allow_rematches: bool,
}

impl JsonlStore {
    pub fn open(storage: StorageConfig, tournament: impl Into<String>) -> Self {
        let tournament = tournament.into();
        debug!(
            "Opening tournament {:?} at {:?}",
            tournament,
            storage.tournament_dir(&tournament)
        );
        Self {
            storage,
            tournament,
            allow_rematches: false,
        }
    }

    pub fn with_allow_rematches(mut self, allow: bool) -> Self {
        self.allow_rematches = allow;
        self
    }

    pub fn tournament(&self) -> &str {
        &self.tournament
    }

    fn player_reader(&self) -> JsonlReader<Player> {
        JsonlReader::for_entity(&self.storage, EntityType::Player, &self.tournament)
    }

    fn player_writer(&self) -> JsonlWriter<Player> {
        JsonlWriter::for_entity(&self.storage, EntityType::Player, &self.tournament)
    }

    fn match_reader(&self) -> JsonlReader<MatchRecord> {
        JsonlReader::for_entity(&self.storage, EntityType::Match, &self.tournament)
    }

    fn match_writer(&self) -> JsonlWriter<MatchRecord> {
        JsonlWriter::for_entity(&self.storage, EntityType::Match, &self.tournament)
    }

    /// Load counters, never below what the record files already use.
    ///
    /// A record is appended before the counters are saved, so `state.json`
    /// can lag behind the files after an interrupted write.
    fn load_state(&self) -> Result<StoreState, StoreError> {
        let mut state: StoreState =
            read_json(&self.storage.state_path(&self.tournament))?.unwrap_or_default();

        if let Some(max) = self.players()?.iter().map(|p| p.id.get()).max() {
            state.next_player_id = state.next_player_id.max(max + 1);
        }
        if let Some(max) = self.matches()?.iter().map(|m| m.sequence).max() {
            state.next_match_sequence = state.next_match_sequence.max(max + 1);
        }
        Ok(state)
    }

    fn save_state(&self, state: &StoreState) -> Result<(), StoreError> {
        write_json(&self.storage.state_path(&self.tournament), state)?;
        Ok(())
    }
}

impl TournamentStore for JsonlStore {
    fn register_player(&mut self, name: &str) -> Result<PlayerId, StoreError> {
        validate_name(name)?;

        let mut state = self.load_state()?;
        let id = PlayerId(state.next_player_id);
        self.player_writer().append(&Player::new(id, name.to_string()))?;
        state.next_player_id += 1;
        self.save_state(&state)?;

        info!(player_id = %id, tournament = %self.tournament, "Registered player {}", name);
        Ok(id)
    }

    fn report_match(
        &mut self,
        winner: PlayerId,
        loser: PlayerId,
    ) -> Result<MatchRecord, StoreError> {
        let players = self.players()?;
        let history = PlayedPairs::from_matches(&self.matches()?);
        validate_report(&players, &history, winner, loser, self.allow_rematches)?;

        let mut state = self.load_state()?;
        let record = MatchRecord::new(state.next_match_sequence, winner, loser);
        self.match_writer().append(&record)?;
        state.next_match_sequence += 1;
        self.save_state(&state)?;

        info!(match_id = %record.id, tournament = %self.tournament, "Recorded {} beat {}", winner, loser);
        Ok(record)
    }

    fn players(&self) -> Result<Vec<Player>, StoreError> {
        Ok(self.player_reader().read_all()?)
    }

    fn matches(&self) -> Result<Vec<MatchRecord>, StoreError> {
        Ok(self.match_reader().read_all()?)
    }

    fn delete_matches(&mut self) -> Result<usize, StoreError> {
        // Pin the counters before the records they were derived from disappear.
        let state = self.load_state()?;
        self.save_state(&state)?;

        let removed = self.matches()?.len();
        self.match_writer().write_all(&[])?;
        info!(tournament = %self.tournament, "Deleted {} matches", removed);
        Ok(removed)
    }

    fn delete_players(&mut self) -> Result<usize, StoreError> {
        self.delete_matches()?;

        let removed = self.players()?.len();
        self.player_writer().write_all(&[])?;
        info!(tournament = %self.tournament, "Deleted {} players", removed);
        Ok(removed)
    }
}
