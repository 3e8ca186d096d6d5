//! Round engine: per-round state machine with snapshot undo.
//!
//! - `RoundState`: hands, statuses, turn marker, discard list, mode
//! - `RoundEngine`: dealing, action targeting, forced draws, undo
//! - `InteractionMode`: Dealing | AwaitingTarget | ForcedDrawing

pub mod engine;
pub mod state;

pub use engine::{DealOutcome, RoundEngine, FORCED_DRAW_CARDS};
pub use state::{
    ForcedDraw, InteractionMode, PendingAction, PlayerStatus, RoundPhase, RoundState, TargetedAction,
};
