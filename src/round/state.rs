//! Round state: one cohesive value per round.
//!
//! Everything the undo history restores lives in `RoundState`: hands,
//! statuses, the turn marker, the discard list, and the interaction mode.
//! Hands and the discard list are `im::Vector`s, so a snapshot is a cheap
//! structural-sharing clone of the whole value.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{ActionKind, Card};
use crate::core::{PlayerId, PlayerMap};

/// A player's standing within the current round.
///
/// Starts `Active` and moves to exactly one terminal value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerStatus {
    /// Still receiving cards.
    #[default]
    Active,
    /// Drew a duplicate number with no Second Chance. Scores 0.
    Busted,
    /// Locked in by a Freeze.
    Frozen,
    /// Chose to stop, or was saved by a Second Chance.
    Stayed,
}

impl PlayerStatus {
    /// Check if this status ends the player's round.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != PlayerStatus::Active
    }
}

/// Action cards that need a target once dealt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetedAction {
    Freeze,
    Flip3,
}

impl TargetedAction {
    /// The targeted action for an action card, if it has one.
    #[must_use]
    pub const fn from_action(kind: ActionKind) -> Option<Self> {
        match kind {
            ActionKind::Freeze => Some(TargetedAction::Freeze),
            ActionKind::Flip3 => Some(TargetedAction::Flip3),
            ActionKind::SecondChance => None,
        }
    }
}

impl From<TargetedAction> for ActionKind {
    fn from(kind: TargetedAction) -> Self {
        match kind {
            TargetedAction::Freeze => ActionKind::Freeze,
            TargetedAction::Flip3 => ActionKind::Flip3,
        }
    }
}

/// A Freeze or Flip Three waiting for its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    pub kind: TargetedAction,
    /// Player who was dealt the action card. Turn order resumes after them.
    pub source: PlayerId,
}

/// A Flip Three being dealt onto its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForcedDraw {
    pub source: PlayerId,
    pub target: PlayerId,
    /// Cards forced so far (0-3).
    pub dealt: u8,
}

/// What the next command is expected to be.
///
/// A single enum so a pending target and a forced draw can never coexist.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    /// Normal play: the active player awaits a card.
    #[default]
    Dealing,
    /// A Freeze or Flip Three needs a target.
    AwaitingTarget(PendingAction),
    /// A Flip Three is being dealt onto its target.
    ForcedDrawing(ForcedDraw),
}

/// Observable round phase, derived from the mode and the hands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Dealing,
    AwaitingActionTarget,
    ForcedDrawing,
    /// Everyone is out, or someone holds seven distinct numbers.
    /// Ending the round is allowed but never automatic.
    RoundComplete,
}

/// Complete mutable state of one round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    pub(crate) hands: PlayerMap<Vector<Card>>,
    pub(crate) statuses: PlayerMap<PlayerStatus>,
    pub(crate) active: Option<PlayerId>,
    pub(crate) discard: Vector<Card>,
    pub(crate) mode: InteractionMode,
}

impl RoundState {
    /// Fresh round: empty hands, everyone active, `starter` to act.
    ///
    /// `discard` seeds the discard list (cards carried over from earlier
    /// rounds in persistent-deck mode).
    #[must_use]
    pub fn new(player_count: usize, starter: PlayerId, discard: Vector<Card>) -> Self {
        Self {
            hands: PlayerMap::with_default(player_count),
            statuses: PlayerMap::with_default(player_count),
            active: Some(starter),
            discard,
            mode: InteractionMode::Dealing,
        }
    }

    /// Number of players in the round.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.hands.player_count()
    }

    /// A player's hand in deal order.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Vector<Card> {
        &self.hands[player]
    }

    /// All hands.
    #[must_use]
    pub fn hands(&self) -> &PlayerMap<Vector<Card>> {
        &self.hands
    }

    /// A player's status.
    #[must_use]
    pub fn status(&self, player: PlayerId) -> PlayerStatus {
        self.statuses[player]
    }

    /// All statuses.
    #[must_use]
    pub fn statuses(&self) -> &PlayerMap<PlayerStatus> {
        &self.statuses
    }

    /// Player whose turn it is, if any.
    #[must_use]
    pub fn active_player(&self) -> Option<PlayerId> {
        self.active
    }

    /// Cards out of the deck without being in any hand.
    #[must_use]
    pub fn discard(&self) -> &Vector<Card> {
        &self.discard
    }

    /// Current interaction mode.
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Next `Active` player after `after`, scanning the roster cyclically.
    ///
    /// The scan covers every seat once, ending on `after` itself, so a
    /// lone remaining active player is found even when `after` is them.
    #[must_use]
    pub fn next_active(&self, after: PlayerId) -> Option<PlayerId> {
        let count = self.player_count();
        let mut candidate = after;
        for _ in 0..count {
            candidate = candidate.next(count);
            if self.statuses[candidate] == PlayerStatus::Active {
                return Some(candidate);
            }
        }
        None
    }

    /// Check if no player is still active.
    #[must_use]
    pub fn all_finished(&self) -> bool {
        self.statuses.values().all(|s| s.is_terminal())
    }
}
