//! Core types shared by every other module: players, configuration, errors.

pub mod config;
pub mod error;
pub mod player;

pub use config::{DeckMode, GameConfig};
pub use error::TrackerError;
pub use player::{PlayerId, PlayerMap, Roster};
