//! Game coordinator: roster, dealer rotation, cumulative scores, win check.
//!
//! - `GameCoordinator`: Setup → Playing → RoundEnd / GameOver lifecycle
//! - `RoundScoreRecord`: immutable per-round score history
//! - `GameResult` / `Standing`: winners and the scoreboard

pub mod coordinator;
pub mod result;

pub use coordinator::{GameCoordinator, Phase, RoundScoreRecord, MIN_PLAYERS};
pub use result::{standings, GameResult, Standing};
