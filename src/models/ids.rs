//! Player and match identifiers.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// A player's unique id, assigned by the store on registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl PlayerId {
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A deterministic match ID derived from content hash.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchId(String);

impl MatchId {
    /// Generate a MatchId from the report sequence and both players.
    /// Uses SHA256 and takes the first 16 characters for brevity.
    pub fn generate(sequence: u64, winner: PlayerId, loser: PlayerId) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(sequence.to_string().as_bytes());
        hasher.update(b"|");
        hasher.update(winner.to_string().as_bytes());
        hasher.update(b"|");
        hasher.update(loser.to_string().as_bytes());
        let hash = hex::encode(hasher.finalize());
        Self(hash[..16].to_string())
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MatchId({})", self.0)
    }
}
