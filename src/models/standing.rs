//! Standings: a player's ranked summary at a point in time.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{MatchRecord, Player, PlayerId};

/// One row of the standings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub id: PlayerId,
    pub name: String,
    pub wins: u32,
    pub matches_played: u32,
}

impl Standing {
    pub fn new(id: PlayerId, name: impl Into<String>, wins: u32, matches_played: u32) -> Self {
        Self {
            id,
            name: name.into(),
            wins,
            matches_played,
        }
    }
}

/// Project players and match history into standings.
///
/// Players are given in registration order. The result is sorted by wins
/// descending; the sort is stable, so ties keep registration order.
/// Matches referencing unknown players are ignored.
pub fn compute_standings(players: &[Player], matches: &[MatchRecord]) -> Vec<Standing> {
    let mut index: HashMap<PlayerId, usize> = HashMap::with_capacity(players.len());
    let mut standings: Vec<Standing> = players
        .iter()
        .enumerate()
        .map(|(i, p)| {
            index.insert(p.id, i);
            Standing::new(p.id, p.name.clone(), 0, 0)
        })
        .collect();

    for m in matches {
        let (Some(&w), Some(&l)) = (index.get(&m.winner_id), index.get(&m.loser_id)) else {
            continue;
        };
        standings[w].wins += 1;
        standings[w].matches_played += 1;
        standings[l].matches_played += 1;
    }

    standings.sort_by(|a, b| b.wins.cmp(&a.wins));
    standings
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn players(names: &[&str]) -> Vec<Player> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Player::new(PlayerId(i as u32 + 1), n.to_string()))
            .collect()
    }

    #[test]
    fn test_no_matches_keeps_registration_order() {
        let standings = compute_standings(&players(&["A", "B", "C"]), &[]);
        let ids: Vec<u32> = standings.iter().map(|s| s.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(standings.iter().all(|s| s.wins == 0 && s.matches_played == 0));
    }

    #[test]
    fn test_sorted_by_wins_with_stable_ties() {
        let matches = vec![
            MatchRecord::new(1, PlayerId(3), PlayerId(1)),
            MatchRecord::new(2, PlayerId(4), PlayerId(2)),
        ];
        let standings = compute_standings(&players(&["A", "B", "C", "D"]), &matches);

        assert_eq!(
            standings,
            vec![
                Standing::new(PlayerId(3), "C", 1, 1),
                Standing::new(PlayerId(4), "D", 1, 1),
                Standing::new(PlayerId(1), "A", 0, 1),
                Standing::new(PlayerId(2), "B", 0, 1),
            ]
        );
    }

    #[test]
    fn test_wins_never_exceed_matches_played() {
        let matches = vec![
            MatchRecord::new(1, PlayerId(1), PlayerId(2)),
            MatchRecord::new(2, PlayerId(1), PlayerId(3)),
            MatchRecord::new(3, PlayerId(2), PlayerId(3)),
        ];
        let standings = compute_standings(&players(&["A", "B", "C"]), &matches);
        for s in &standings {
            assert!(s.wins <= s.matches_played);
        }
        assert_eq!(standings[0].id, PlayerId(1));
        assert_eq!((standings[0].wins, standings[0].matches_played), (2, 2));
        assert_eq!((standings[2].wins, standings[2].matches_played), (0, 2));
    }

    #[test]
    fn test_unknown_players_ignored() {
        let matches = vec![MatchRecord::new(1, PlayerId(1), PlayerId(99))];
        let standings = compute_standings(&players(&["A"]), &matches);
        assert_eq!(standings[0].matches_played, 0);
    }
}
