//! Game coordinator: state that spans rounds.
//!
//! Owns the roster, dealer rotation, cumulative totals, round history and
//! the phase the front end should render. Drives the round engine's
//! lifecycle and checks the win condition.
//!
//! ```text
//! Setup ──start_game──▶ Playing ──end_round──▶ RoundEnd ──next_round──▶ Playing
//!                                    │
//!                                    └──total ≥ target──▶ GameOver
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cards::Card;
use crate::core::{DeckMode, GameConfig, PlayerId, PlayerMap, Roster, TrackerError};
use crate::round::{PlayerStatus, RoundEngine, RoundState};
use crate::scoring::{has_flip7, round_score};

use super::result::{standings, GameResult, Standing};

/// Minimum roster size to start a game.
pub const MIN_PLAYERS: usize = 2;

/// Screen the front end should show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Setup,
    Playing,
    RoundEnd,
    GameOver,
}

/// Scores from one completed round. Never modified after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundScoreRecord {
    pub round: u32,
    pub scores: PlayerMap<u32>,
}

/// Game coordinator.
#[derive(Clone, Debug, Default)]
pub struct GameCoordinator {
    config: GameConfig,
    roster: Roster,
    phase: Phase,
    totals: Option<PlayerMap<u32>>,
    history: Vec<RoundScoreRecord>,
    dealer: PlayerId,
    round: Option<RoundEngine>,
}

impl GameCoordinator {
    /// Create a coordinator in `Setup` with the given configuration.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    // === Queries ===

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The roster.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Number of registered players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.roster.len()
    }

    /// Score that ends the game.
    #[must_use]
    pub fn target_score(&self) -> u32 {
        self.config.target_score
    }

    /// Cumulative totals, once a game has started.
    #[must_use]
    pub fn totals(&self) -> Option<&PlayerMap<u32>> {
        self.totals.as_ref()
    }

    /// A player's cumulative total (0 before the game starts).
    #[must_use]
    pub fn total(&self, player: PlayerId) -> u32 {
        self.totals
            .as_ref()
            .filter(|t| t.contains(player))
            .map_or(0, |t| t[player])
    }

    /// Current round number (0 before the game starts).
    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.round.as_ref().map_or(0, RoundEngine::number)
    }

    /// Dealer of the current round.
    #[must_use]
    pub fn dealer(&self) -> PlayerId {
        self.dealer
    }

    /// Scores of every completed round, oldest first.
    #[must_use]
    pub fn history(&self) -> &[RoundScoreRecord] {
        &self.history
    }

    /// The current (or just-ended) round, read-only.
    #[must_use]
    pub fn round(&self) -> Option<&RoundEngine> {
        self.round.as_ref()
    }

    /// The current round, for dealing commands. Only while `Playing`.
    pub fn round_mut(&mut self) -> Result<&mut RoundEngine, TrackerError> {
        match (self.phase, self.round.as_mut()) {
            (Phase::Playing, Some(round)) => Ok(round),
            (phase, _) => Err(TrackerError::WrongPhase(phase)),
        }
    }

    /// Scoreboard, highest total first. Empty before the game starts.
    #[must_use]
    pub fn standings(&self) -> Vec<Standing> {
        self.totals
            .as_ref()
            .map(|totals| standings(&self.roster, totals))
            .unwrap_or_default()
    }

    /// Winner(s), once the game is over.
    #[must_use]
    pub fn winner(&self) -> Option<GameResult> {
        if self.phase != Phase::GameOver {
            return None;
        }
        self.totals.as_ref().and_then(GameResult::from_totals)
    }

    // === Setup ===

    /// Register a player. Setup only.
    pub fn add_player(&mut self, name: &str) -> Result<PlayerId, TrackerError> {
        self.ensure_phase(Phase::Setup)?;
        self.roster.add(name, &self.config)
    }

    /// Remove a player by name. Setup only.
    pub fn remove_player(&mut self, name: &str) -> Result<(), TrackerError> {
        self.ensure_phase(Phase::Setup)?;
        self.roster.remove(name)
    }

    /// Change the target score. Setup only.
    pub fn set_target_score(&mut self, score: u32) -> Result<(), TrackerError> {
        self.ensure_phase(Phase::Setup)?;
        if score == 0 {
            return Err(TrackerError::InvalidTargetScore);
        }
        self.config.target_score = score;
        Ok(())
    }

    // === Lifecycle ===

    /// Start the game: zero totals, round 1, first player deals.
    pub fn start_game(&mut self) -> Result<(), TrackerError> {
        self.ensure_phase(Phase::Setup)?;
        let count = self.roster.len();
        if count < MIN_PLAYERS {
            return Err(TrackerError::NotEnoughPlayers {
                min: MIN_PLAYERS,
                have: count,
            });
        }

        self.totals = Some(PlayerMap::with_value(count, 0));
        self.history.clear();
        self.dealer = PlayerId::new(0);
        self.round = Some(RoundEngine::new(1, count, self.dealer, Vector::new(), &self.config));
        self.phase = Phase::Playing;
        info!(players = count, target = self.config.target_score, "Game started");
        Ok(())
    }

    /// Score the current round and add it to the totals.
    ///
    /// Busted players score 0; everyone else scores their hand, with the
    /// Flip 7 bonus for seven distinct numbers. Moves to `GameOver` if any
    /// total reaches the target, otherwise to `RoundEnd`.
    pub fn end_round(&mut self) -> Result<&RoundScoreRecord, TrackerError> {
        self.ensure_phase(Phase::Playing)?;
        let (Some(round), Some(totals)) = (self.round.as_mut(), self.totals.as_mut()) else {
            return Err(TrackerError::WrongPhase(self.phase));
        };

        if !round.is_complete() {
            warn!(round = round.number(), "Round ended while players are still active");
        }
        round.clear_history();

        let state = round.state();
        let scores = PlayerMap::new(round.player_count(), |player| {
            let hand = state.hand(player);
            match state.status(player) {
                PlayerStatus::Busted => 0,
                _ => round_score(hand, has_flip7(hand)),
            }
        });

        for (player, score) in scores.iter() {
            totals[player] += *score;
        }

        let game_over = totals.values().any(|&t| t >= self.config.target_score);
        self.phase = if game_over { Phase::GameOver } else { Phase::RoundEnd };
        info!(round = round.number(), phase = ?self.phase, "Round scored");

        self.history.push(RoundScoreRecord {
            round: round.number(),
            scores,
        });
        Ok(&self.history[self.history.len() - 1])
    }

    /// Rotate the dealer and start the next round.
    pub fn next_round(&mut self) -> Result<(), TrackerError> {
        self.ensure_phase(Phase::RoundEnd)?;
        let Some(previous) = self.round.take() else {
            return Err(TrackerError::WrongPhase(self.phase));
        };

        let count = self.roster.len();
        let number = previous.number() + 1;
        let carried = match self.config.deck_mode {
            DeckMode::ResetEachRound => Vector::new(),
            DeckMode::Persistent => cards_out_of_deck(&previous.into_state()),
        };

        self.dealer = self.dealer.next(count);
        self.round = Some(RoundEngine::new(number, count, self.dealer, carried, &self.config));
        self.phase = Phase::Playing;
        Ok(())
    }

    /// Forget the roster, totals and history and return to `Setup`.
    ///
    /// The configuration (including the target score) is kept.
    pub fn reset_game(&mut self) {
        self.roster.clear();
        self.totals = None;
        self.history.clear();
        self.dealer = PlayerId::new(0);
        self.round = None;
        self.phase = Phase::Setup;
        info!("Game reset");
    }

    fn ensure_phase(&self, expected: Phase) -> Result<(), TrackerError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(TrackerError::WrongPhase(self.phase))
        }
    }
}

/// Every card a round took out of the deck: all hands plus the discard list.
fn cards_out_of_deck(state: &RoundState) -> Vector<Card> {
    state
        .hands()
        .values()
        .flat_map(|hand| hand.iter().copied())
        .chain(state.discard().iter().copied())
        .collect()
}
