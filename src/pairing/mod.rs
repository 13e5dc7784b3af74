//! Swiss pairing engine.
//!
//! Greedy first-fit matching over the standings: each unpaired player, in
//! standings order, takes the first unpaired player (again in standings
//! order) they have not already played. Because standings are sorted by
//! wins, this favours opponents with a similar record.
//!
//! The matcher never backtracks. When rematch avoidance forces an early
//! choice it can fail with [`PairingError::NoEligibleOpponent`] even though
//! a different assignment would have paired everyone.

mod history;

pub use history::*;

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{Pairing, PlayerId, Standing};

/// Reasons a round cannot be paired. No partial pairing is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PairingError {
    #[error("Cannot pair an odd number of players ({count})")]
    OddPlayerCount { count: usize },

    #[error("No eligible opponent left for player {player_id}")]
    NoEligibleOpponent { player_id: PlayerId },

    #[error("Match history is inconsistent for players {a} and {b}")]
    InconsistentHistory { a: PlayerId, b: PlayerId },

    #[error("Player {player_id} appears more than once in the standings")]
    DuplicatePlayer { player_id: PlayerId },
}

/// Engine options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairingOptions {
    /// Check the history in both directions and fail on disagreement.
    pub verify_symmetry: bool,
}

impl Default for PairingOptions {
    fn default() -> Self {
        Self {
            verify_symmetry: true,
        }
    }
}

/// Produces one round of pairings from a standings snapshot.
///
/// Holds no state between calls; a single engine can be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairingEngine {
    options: PairingOptions,
}

impl PairingEngine {
    pub fn new(options: PairingOptions) -> Self {
        Self { options }
    }

    /// Pair every player in `standings` with an opponent they have not met.
    pub fn generate<H>(
        &self,
        standings: &[Standing],
        history: &H,
    ) -> Result<Vec<Pairing>, PairingError>
    where
        H: MatchHistory + ?Sized,
    {
        let n = standings.len();
        if n % 2 != 0 {
            return Err(PairingError::OddPlayerCount { count: n });
        }

        let mut seen = HashSet::with_capacity(n);
        for s in standings {
            if !seen.insert(s.id) {
                return Err(PairingError::DuplicatePlayer { player_id: s.id });
            }
        }

        let mut paired = vec![false; n];
        let mut pairings = Vec::with_capacity(n / 2);

        for i in 0..n {
            if paired[i] {
                continue;
            }
            let player = &standings[i];

            let mut opponent = None;
            for j in 0..n {
                if j == i || paired[j] {
                    continue;
                }
                if !self.has_played(history, player.id, standings[j].id)? {
                    opponent = Some(j);
                    break;
                }
            }

            let Some(j) = opponent else {
                warn!(player_id = %player.id, "No eligible opponent");
                return Err(PairingError::NoEligibleOpponent {
                    player_id: player.id,
                });
            };

            debug!("Paired {} with {}", player.id, standings[j].id);
            pairings.push(Pairing::new(player, &standings[j]));
            paired[i] = true;
            paired[j] = true;
        }

        info!("Generated {} pairings for {} players", pairings.len(), n);
        Ok(pairings)
    }

    fn has_played<H>(&self, history: &H, a: PlayerId, b: PlayerId) -> Result<bool, PairingError>
    where
        H: MatchHistory + ?Sized,
    {
        let forward = history.has_played(a, b);
        if self.options.verify_symmetry && history.has_played(b, a) != forward {
            return Err(PairingError::InconsistentHistory { a, b });
        }
        Ok(forward)
    }
}

/// Pair a round with default options.
pub fn generate_pairings<H>(
    standings: &[Standing],
    history: &H,
) -> Result<Vec<Pairing>, PairingError>
where
    H: MatchHistory + ?Sized,
{
    PairingEngine::default().generate(standings, history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn standing(id: u32, name: &str, wins: u32, matches: u32) -> Standing {
        Standing::new(PlayerId(id), name, wins, matches)
    }

    fn four_players() -> Vec<Standing> {
        vec![
            standing(1, "A", 3, 3),
            standing(2, "B", 2, 3),
            standing(3, "C", 2, 3),
            standing(4, "D", 1, 3),
        ]
    }

    fn pair(a: u32, name_a: &str, b: u32, name_b: &str) -> Pairing {
        Pairing {
            player_a: PlayerId(a),
            name_a: name_a.to_string(),
            player_b: PlayerId(b),
            name_b: name_b.to_string(),
        }
    }

    fn history_of(pairs: &[(u32, u32)]) -> PlayedPairs {
        let mut played = PlayedPairs::new();
        for &(a, b) in pairs {
            played.insert(PlayerId(a), PlayerId(b));
        }
        played
    }

    fn numbered(n: u32) -> Vec<Standing> {
        (1..=n).map(|i| standing(i, &format!("P{}", i), 0, 0)).collect()
    }

    #[test]
    fn test_adjacent_ranks_with_empty_history() {
        let pairings = generate_pairings(&four_players(), &PlayedPairs::new()).unwrap();
        assert_eq!(pairings, vec![pair(1, "A", 2, "B"), pair(3, "C", 4, "D")]);
    }

    #[test]
    fn test_rematch_is_skipped() {
        let history = history_of(&[(1, 2)]);
        let pairings = generate_pairings(&four_players(), &history).unwrap();
        assert_eq!(pairings, vec![pair(1, "A", 3, "C"), pair(2, "B", 4, "D")]);
    }

    #[test]
    fn test_odd_count_rejected() {
        let standings = vec![
            standing(1, "A", 0, 0),
            standing(2, "B", 0, 0),
            standing(3, "C", 0, 0),
        ];
        let err = generate_pairings(&standings, &PlayedPairs::new()).unwrap_err();
        assert_eq!(err, PairingError::OddPlayerCount { count: 3 });
    }

    #[test]
    fn test_odd_count_rejected_before_history_is_consulted() {
        let history = |_: PlayerId, _: PlayerId| -> bool { panic!("history should not be read") };
        let err = generate_pairings(&numbered(5), &history).unwrap_err();
        assert_eq!(err, PairingError::OddPlayerCount { count: 5 });
    }

    #[test]
    fn test_player_who_played_everyone() {
        let history = history_of(&[(1, 2), (1, 3), (1, 4)]);
        let err = generate_pairings(&four_players(), &history).unwrap_err();
        assert_eq!(
            err,
            PairingError::NoEligibleOpponent {
                player_id: PlayerId(1)
            }
        );
    }

    #[test]
    fn test_greedy_can_miss_a_full_matching() {
        // 1-3 / 2-4 would work, but 1 takes 2 first and strands 3 with 4.
        let history = history_of(&[(3, 4)]);
        let err = generate_pairings(&four_players(), &history).unwrap_err();
        assert_eq!(
            err,
            PairingError::NoEligibleOpponent {
                player_id: PlayerId(3)
            }
        );
    }

    #[test]
    fn test_empty_standings() {
        let pairings = generate_pairings(&[], &PlayedPairs::new()).unwrap();
        assert!(pairings.is_empty());
    }

    #[test]
    fn test_duplicate_player_rejected() {
        let standings = vec![standing(1, "A", 0, 0), standing(1, "A", 0, 0)];
        let err = generate_pairings(&standings, &PlayedPairs::new()).unwrap_err();
        assert_eq!(
            err,
            PairingError::DuplicatePlayer {
                player_id: PlayerId(1)
            }
        );
    }

    #[test]
    fn test_asymmetric_history_detected() {
        let history = |a: PlayerId, b: PlayerId| a == PlayerId(1) && b == PlayerId(2);
        let err = generate_pairings(&four_players(), &history).unwrap_err();
        assert_eq!(
            err,
            PairingError::InconsistentHistory {
                a: PlayerId(1),
                b: PlayerId(2)
            }
        );
    }

    #[test]
    fn test_asymmetry_check_can_be_disabled() {
        let engine = PairingEngine::new(PairingOptions {
            verify_symmetry: false,
        });
        let history = |a: PlayerId, b: PlayerId| a == PlayerId(1) && b == PlayerId(2);
        let pairings = engine.generate(&four_players(), &history).unwrap();
        assert_eq!(pairings, vec![pair(1, "A", 3, "C"), pair(2, "B", 4, "D")]);
    }

    #[test]
    fn test_every_player_paired_exactly_once() {
        for n in [2u32, 6, 10, 32] {
            let standings = numbered(n);
            let pairings = generate_pairings(&standings, &PlayedPairs::new()).unwrap();
            assert_eq!(pairings.len(), n as usize / 2);

            let mut ids: Vec<PlayerId> = pairings
                .iter()
                .flat_map(|p| [p.player_a, p.player_b])
                .collect();
            ids.sort();
            let expected: Vec<PlayerId> = (1..=n).map(PlayerId).collect();
            assert_eq!(ids, expected);
            assert!(pairings.iter().all(|p| p.player_a != p.player_b));
        }
    }

    #[test]
    fn test_no_rematches_returned() {
        let history = history_of(&[(1, 2), (3, 4), (1, 3), (2, 5)]);
        let pairings = generate_pairings(&numbered(6), &history).unwrap();

        assert_eq!(
            pairings,
            vec![
                pair(1, "P1", 4, "P4"),
                pair(2, "P2", 3, "P3"),
                pair(5, "P5", 6, "P6"),
            ]
        );
        for p in &pairings {
            assert!(!history.has_played(p.player_a, p.player_b));
        }
    }

    #[test]
    fn test_trait_object_history() {
        let played = history_of(&[(1, 2)]);
        let history: &dyn MatchHistory = &played;
        let pairings = generate_pairings(&numbered(4), history).unwrap();
        assert_eq!(pairings, vec![pair(1, "P1", 3, "P3"), pair(2, "P2", 4, "P4")]);
    }

    #[test]
    fn test_deterministic_output() {
        let history = history_of(&[(1, 2), (3, 4), (5, 6), (7, 8)]);
        let standings = numbered(8);
        let first = generate_pairings(&standings, &history).unwrap();
        for _ in 0..5 {
            assert_eq!(generate_pairings(&standings, &history).unwrap(), first);
        }
    }

    #[test]
    fn test_scan_follows_standings_order_not_ids() {
        let standings = vec![
            standing(9, "I", 2, 2),
            standing(4, "D", 1, 2),
            standing(7, "G", 1, 2),
            standing(2, "B", 0, 2),
        ];
        let pairings = generate_pairings(&standings, &PlayedPairs::new()).unwrap();
        assert_eq!(pairings, vec![pair(9, "I", 4, "D"), pair(7, "G", 2, "B")]);
    }
}
