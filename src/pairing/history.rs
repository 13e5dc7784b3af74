//! Match-history lookups used by the pairing engine.

use std::collections::HashSet;

use crate::models::{MatchRecord, PlayerId};

/// Answers whether two players have already met.
///
/// Implementations must be symmetric: `has_played(a, b) == has_played(b, a)`.
pub trait MatchHistory {
    fn has_played(&self, a: PlayerId, b: PlayerId) -> bool;
}

impl<F> MatchHistory for F
where
    F: Fn(PlayerId, PlayerId) -> bool,
{
    fn has_played(&self, a: PlayerId, b: PlayerId) -> bool {
        self(a, b)
    }
}

/// Set of unordered player pairs that have played each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayedPairs {
    pairs: HashSet<(PlayerId, PlayerId)>,
}

impl PlayedPairs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from recorded matches, ignoring who won.
    pub fn from_matches<'a, I>(matches: I) -> Self
    where
        I: IntoIterator<Item = &'a MatchRecord>,
    {
        let mut played = Self::new();
        for m in matches {
            played.insert(m.winner_id, m.loser_id);
        }
        played
    }

    /// Record that `a` and `b` met. Returns false if they already had.
    pub fn insert(&mut self, a: PlayerId, b: PlayerId) -> bool {
        self.pairs.insert(normalize(a, b))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl MatchHistory for PlayedPairs {
    fn has_played(&self, a: PlayerId, b: PlayerId) -> bool {
        self.pairs.contains(&normalize(a, b))
    }
}

fn normalize(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
