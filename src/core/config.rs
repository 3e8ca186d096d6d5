//! Game configuration.
//!
//! `GameConfig` holds everything the operator picks at setup plus the
//! roster limits and deck accounting rules.

use serde::{Deserialize, Serialize};

/// What happens to dealt cards between rounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeckMode {
    /// Every round starts from the full card pool.
    #[default]
    ResetEachRound,
    /// Cards dealt or discarded in earlier rounds stay out of the deck
    /// until the operator reshuffles the discard pile.
    Persistent,
}

/// Game configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cumulative score that ends the game (default: 200).
    pub target_score: u32,

    /// Maximum roster size.
    pub max_players: usize,

    /// Maximum player name length in characters, after trimming.
    pub max_name_len: usize,

    /// Whether dealt cards return to the deck each round.
    pub deck_mode: DeckMode,

    /// Reject cards whose identity has no copies left in the pool.
    ///
    /// When false the tracker trusts the operator and remaining
    /// counts may go negative.
    pub enforce_pool_limits: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            target_score: 200,
            max_players: 18,
            max_name_len: 16,
            deck_mode: DeckMode::ResetEachRound,
            enforce_pool_limits: true,
        }
    }
}

impl GameConfig {
    /// Set the target score.
    #[must_use]
    pub fn with_target_score(mut self, score: u32) -> Self {
        self.target_score = score;
        self
    }

    /// Set the maximum roster size.
    #[must_use]
    pub fn with_max_players(mut self, max: usize) -> Self {
        self.max_players = max;
        self
    }

    /// Set the deck mode.
    #[must_use]
    pub fn with_deck_mode(mut self, mode: DeckMode) -> Self {
        self.deck_mode = mode;
        self
    }

    /// Enable or disable pool-limit checks.
    #[must_use]
    pub fn with_pool_limits(mut self, enforce: bool) -> Self {
        self.enforce_pool_limits = enforce;
        self
    }
}
