//! Standings and game results.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{PlayerId, PlayerMap, Roster};

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Several players share the highest total.
    Winners(SmallVec<[PlayerId; 4]>),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
        }
    }

    /// Decide the result from final totals: everyone on the highest total wins.
    ///
    /// Returns `None` only for an empty map, which `PlayerMap` never is.
    #[must_use]
    pub fn from_totals(totals: &PlayerMap<u32>) -> Option<Self> {
        let best = totals.values().copied().max()?;
        let leaders: SmallVec<[PlayerId; 4]> = totals
            .iter()
            .filter(|(_, total)| **total == best)
            .map(|(p, _)| p)
            .collect();

        if leaders.len() == 1 {
            Some(GameResult::Winner(leaders[0]))
        } else {
            Some(GameResult::Winners(leaders))
        }
    }
}

/// One row of the scoreboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    pub name: String,
    pub total: u32,
    /// Competition rank: equal totals share a rank (1, 1, 3).
    pub rank: usize,
}

/// Scoreboard sorted by total, highest first. Ties keep roster order.
#[must_use]
pub fn standings(roster: &Roster, totals: &PlayerMap<u32>) -> Vec<Standing> {
    let mut rows: Vec<Standing> = totals
        .iter()
        .map(|(player, &total)| Standing {
            player,
            name: roster.name(player).unwrap_or_default().to_string(),
            total,
            rank: 0,
        })
        .collect();
    rows.sort_by(|a, b| b.total.cmp(&a.total));

    let mut previous: Option<(u32, usize)> = None;
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = match previous {
            Some((total, rank)) if total == row.total => rank,
            _ => i + 1,
        };
        previous = Some((row.total, row.rank));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;

    fn p(i: u8) -> PlayerId {
        PlayerId::new(i)
    }

    fn roster(names: &[&str]) -> Roster {
        let config = GameConfig::default();
        let mut roster = Roster::new();
        for name in names {
            roster.add(name, &config).unwrap();
        }
        roster
    }

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(p(1));
        assert!(!result.is_winner(p(0)));
        assert!(result.is_winner(p(1)));

        let shared = GameResult::Winners(SmallVec::from_slice(&[p(0), p(2)]));
        assert!(shared.is_winner(p(0)));
        assert!(!shared.is_winner(p(1)));
        assert!(shared.is_winner(p(2)));
    }

    #[test]
    fn test_result_from_totals() {
        let totals = PlayerMap::new(3, |p| [120, 210, 90][p.index()]);
        assert_eq!(GameResult::from_totals(&totals), Some(GameResult::Winner(p(1))));

        let tied = PlayerMap::new(3, |p| [205, 180, 205][p.index()]);
        assert_eq!(
            GameResult::from_totals(&tied),
            Some(GameResult::Winners(SmallVec::from_slice(&[p(0), p(2)])))
        );
    }

    #[test]
    fn test_standings_competition_rank() {
        let roster = roster(&["Ann", "Ben", "Cat", "Dov"]);
        let totals = PlayerMap::new(4, |p| [50, 80, 50, 10][p.index()]);

        let rows = standings(&roster, &totals);
        let summary: Vec<_> = rows.iter().map(|r| (r.name.as_str(), r.total, r.rank)).collect();
        assert_eq!(
            summary,
            vec![("Ben", 80, 1), ("Ann", 50, 2), ("Cat", 50, 2), ("Dov", 10, 4)]
        );
    }
}
