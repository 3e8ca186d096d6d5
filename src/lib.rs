//! # flip7-tracker
//!
//! Score-tracking core for the card game Flip 7.
//!
//! The operator enters every card the physical dealer turns over; the
//! tracker keeps hands, statuses, and turn order, resolves busts, Second
//! Chances, Freezes and Flip Threes, and adds up round and game scores.
//! Nothing is shuffled or drawn here: the real deck is the source of truth.
//!
//! ## Design Principles
//!
//! 1. **Derived, Not Stored**: Remaining deck counts are recomputed from
//!    hands and discards, never tracked separately.
//!
//! 2. **Snapshot Undo**: Every accepted round command pushes a clone of the
//!    whole round state. Hands are `im::Vector`s, so snapshots share
//!    structure and cost O(1).
//!
//! 3. **One Mode at a Time**: Action targeting and forced draws are
//!    variants of a single enum, so they can never overlap.
//!
//! ## Modules
//!
//! - `core`: Players, roster, configuration, errors
//! - `cards`: Card identities and the fixed 94-card pool
//! - `deck`: Remaining counts per card identity
//! - `scoring`: Round scores and bust probability
//! - `round`: Per-round state machine with undo
//! - `game`: Game lifecycle, totals, and winners
//!
//! ## Example
//!
//! ```
//! use flip7_tracker::{Card, GameConfig, GameCoordinator, Phase, PlayerStatus};
//!
//! let mut game = GameCoordinator::new(GameConfig::default());
//! let alice = game.add_player("Alice").unwrap();
//! let bob = game.add_player("Bob").unwrap();
//! game.start_game().unwrap();
//!
//! let round = game.round_mut().unwrap();
//! round.deal_card(Card::number(9).unwrap()).unwrap(); // Bob acts first
//! round.set_status_and_advance(alice, PlayerStatus::Stayed).unwrap();
//! round.set_status_and_advance(bob, PlayerStatus::Stayed).unwrap();
//!
//! game.end_round().unwrap();
//! assert_eq!(game.total(bob), 9);
//! assert_eq!(game.phase(), Phase::RoundEnd);
//! ```

pub mod cards;
pub mod core;
pub mod deck;
pub mod game;
pub mod round;
pub mod scoring;

// Re-export commonly used types
pub use crate::core::{DeckMode, GameConfig, PlayerId, PlayerMap, Roster, TrackerError};

pub use crate::cards::{ActionKind, Card, CardOption, CardParseError, Modifier, Number};

pub use crate::deck::{remaining_counts, RemainingCounts};

pub use crate::scoring::{bust_probability, has_flip7, round_score};

pub use crate::round::{
    DealOutcome, InteractionMode, PlayerStatus, RoundEngine, RoundPhase, RoundState,
};

pub use crate::game::{GameCoordinator, GameResult, Phase, RoundScoreRecord, Standing};
