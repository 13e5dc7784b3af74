//! Match model: one completed game between two players.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MatchId, PlayerId};

/// The outcome of a single match. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Unique identifier (derived from sequence + winner + loser)
    pub id: MatchId,

    /// Position in the tournament's report order, starting at 1
    pub sequence: u64,

    pub winner_id: PlayerId,

    pub loser_id: PlayerId,

    /// When this match was reported
    pub recorded_at: DateTime<Utc>,
}

impl MatchRecord {
    /// Create a new MatchRecord with auto-generated ID.
    pub fn new(sequence: u64, winner_id: PlayerId, loser_id: PlayerId) -> Self {
        Self {
            id: MatchId::generate(sequence, winner_id, loser_id),
            sequence,
            winner_id,
            loser_id,
            recorded_at: Utc::now(),
        }
    }
}
