//! Pairing model — opponent assignments for the next round.

use serde::{Deserialize, Serialize};

use super::{PlayerId, Standing};

/// A single game pairing between two players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    /// First player (the one the engine was placing)
    pub player_a: PlayerId,

    pub name_a: String,

    /// Opponent chosen for the first player
    pub player_b: PlayerId,

    pub name_b: String,
}

impl Pairing {
    pub fn new(a: &Standing, b: &Standing) -> Self {
        Self {
            player_a: a.id,
            name_a: a.name.clone(),
            player_b: b.id,
            name_b: b.name.clone(),
        }
    }
}

/// A complete set of pairings for one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Round number (1 = first round)
    pub number: u32,

    pub pairings: Vec<Pairing>,
}
