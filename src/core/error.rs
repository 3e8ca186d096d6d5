//! Rejection reasons for tracker commands.
//!
//! A rejected command leaves every piece of state untouched and pushes
//! no undo snapshot.

use thiserror::Error;

use crate::cards::Card;
use crate::game::Phase;
use crate::round::PlayerStatus;

use super::player::PlayerId;

/// Errors returned by tracker commands.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackerError {
    // === Invalid target ===
    #[error("no player is waiting for a card")]
    NoActivePlayer,

    #[error("{0} is not active this round")]
    PlayerNotActive(PlayerId),

    #[error("{0} is not on the roster")]
    UnknownPlayer(PlayerId),

    #[error("an action card is waiting for a target")]
    ActionTargetPending,

    #[error("no action card is waiting for a target")]
    NoPendingAction,

    #[error("status {0:?} does not end a player's round")]
    StatusNotTerminal(PlayerStatus),

    // === Setup ===
    #[error("need at least {min} players (have {have})")]
    NotEnoughPlayers { min: usize, have: usize },

    #[error("player name is empty")]
    EmptyName,

    #[error("player name too long (len={len}, max={max})")]
    NameTooLong { len: usize, max: usize },

    #[error("player name {0:?} is already taken")]
    DuplicateName(String),

    #[error("roster is full (max={max})")]
    RosterFull { max: usize },

    #[error("no player named {0:?}")]
    UnknownName(String),

    #[error("target score must be positive")]
    InvalidTargetScore,

    // === Lifecycle ===
    #[error("not allowed during {0:?}")]
    WrongPhase(Phase),

    // === Deck ===
    #[error("no copies of {0} left in the deck")]
    CardExhausted(Card),
}
