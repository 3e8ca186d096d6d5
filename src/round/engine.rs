//! Round engine: the turn-by-turn state machine.
//!
//! The operator reports every card the physical dealer turns over and the
//! engine applies it: appends it to the right hand, resolves duplicates,
//! opens Freeze / Flip Three targeting, runs forced draws, and moves the
//! turn marker.
//!
//! ## Undo
//!
//! Every accepted mutating command pushes a snapshot of the whole
//! `RoundState` first. `undo()` pops and restores it verbatim. Rejected
//! commands push nothing.
//!
//! ## Modes
//!
//! ```text
//! Dealing ──Freeze/Flip3──▶ AwaitingTarget ──Freeze target──▶ Dealing
//!    ▲                          │
//!    │                      Flip3 target
//!    │                          ▼
//!    └──3 cards / knockout── ForcedDrawing
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cards::{ActionKind, Card, CardOption};
use crate::core::{GameConfig, PlayerId, TrackerError};
use crate::deck::{remaining_counts, RemainingCounts};
use crate::scoring::{bust_probability, has_duplicate_number, has_flip7};

use super::state::{
    ForcedDraw, InteractionMode, PendingAction, PlayerStatus, RoundPhase, RoundState, TargetedAction,
};

/// Cards forced onto the target of a Flip Three.
pub const FORCED_DRAW_CARDS: u8 = 3;

/// What happened when a card was dealt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealOutcome {
    /// The card landed in the player's hand with no side effect.
    Placed { player: PlayerId },
    /// Duplicate number with no Second Chance.
    Busted { player: PlayerId },
    /// Duplicate number cancelled by a Second Chance; the player stays.
    SecondChanceUsed { player: PlayerId },
    /// Freeze or Flip Three as the player's first card: no effect.
    DeadAction { player: PlayerId, kind: TargetedAction },
    /// Freeze or Flip Three now needs a target.
    ActionPending { source: PlayerId, kind: TargetedAction },
    /// The forced-draw target was already out; nothing was dealt.
    ForcedDrawAborted { source: PlayerId, target: PlayerId },
}

/// Result of a duplicate check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Knockout {
    Busted,
    Saved,
}

/// Round engine.
#[derive(Clone, Debug)]
pub struct RoundEngine {
    number: u32,
    state: RoundState,
    undo_stack: Vec<RoundState>,
    enforce_pool_limits: bool,
}

impl RoundEngine {
    /// Start a round. The player after `dealer` acts first.
    ///
    /// `carried` seeds the discard list with cards that are still out of
    /// the deck from earlier rounds.
    ///
    /// ## Panics
    ///
    /// Panics if `player_count` is 0.
    #[must_use]
    pub fn new(
        number: u32,
        player_count: usize,
        dealer: PlayerId,
        carried: Vector<Card>,
        config: &GameConfig,
    ) -> Self {
        assert!(player_count > 0, "A round needs at least one player");
        let starter = dealer.next(player_count);
        info!(round = number, %dealer, %starter, carried = carried.len(), "Round started");
        Self {
            number,
            state: RoundState::new(player_count, starter, carried),
            undo_stack: Vec::new(),
            enforce_pool_limits: config.enforce_pool_limits,
        }
    }

    // === Queries ===

    /// Round number (starts at 1).
    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    /// The full round state.
    #[must_use]
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// Number of players in the round.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.state.player_count()
    }

    /// A player's hand in deal order.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Vector<Card> {
        self.state.hand(player)
    }

    /// A player's status.
    #[must_use]
    pub fn status(&self, player: PlayerId) -> PlayerStatus {
        self.state.status(player)
    }

    /// Player whose turn it is, if any.
    #[must_use]
    pub fn active_player(&self) -> Option<PlayerId> {
        self.state.active
    }

    /// Current interaction mode.
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.state.mode
    }

    /// The discard list.
    #[must_use]
    pub fn discard(&self) -> &Vector<Card> {
        &self.state.discard
    }

    /// Observable phase of the round.
    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        match self.state.mode {
            InteractionMode::AwaitingTarget(_) => RoundPhase::AwaitingActionTarget,
            InteractionMode::ForcedDrawing(_) => RoundPhase::ForcedDrawing,
            InteractionMode::Dealing if self.is_complete() => RoundPhase::RoundComplete,
            InteractionMode::Dealing => RoundPhase::Dealing,
        }
    }

    /// Next active player after `after` (cyclic roster scan).
    #[must_use]
    pub fn next_active(&self, after: PlayerId) -> Option<PlayerId> {
        self.state.next_active(after)
    }

    /// Remaining copies of every card identity.
    #[must_use]
    pub fn remaining(&self) -> RemainingCounts {
        remaining_counts(self.state.hands.values(), &self.state.discard)
    }

    /// Total cards left in the deck.
    #[must_use]
    pub fn total_remaining(&self) -> u32 {
        self.remaining().total()
    }

    /// Every card identity with its remaining count.
    #[must_use]
    pub fn card_options(&self) -> Vec<CardOption> {
        self.remaining().options()
    }

    /// Check if every player is out of the round.
    #[must_use]
    pub fn all_finished(&self) -> bool {
        self.state.all_finished()
    }

    /// Check if any player who has not busted holds seven distinct numbers.
    #[must_use]
    pub fn any_flip7(&self) -> bool {
        self.state
            .hands
            .iter()
            .any(|(p, hand)| self.state.statuses[p] != PlayerStatus::Busted && has_flip7(hand))
    }

    /// Check if the round may be ended.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.all_finished() || self.any_flip7()
    }

    /// Chance the next card busts `player`.
    #[must_use]
    pub fn bust_probability(&self, player: PlayerId) -> f64 {
        bust_probability(self.state.hand(player), &self.remaining())
    }

    /// Check if there is anything to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Number of snapshots on the undo stack.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    // === Commands ===

    /// Deal `card` to whoever is due it.
    ///
    /// During a forced draw the card goes to the Flip Three target;
    /// otherwise to the active player.
    ///
    /// ## Errors
    ///
    /// - `ActionTargetPending` while a Freeze / Flip Three awaits a target
    /// - `NoActivePlayer` / `PlayerNotActive` if nobody can take the card
    /// - `CardExhausted` if pool limits are enforced and none are left
    pub fn deal_card(&mut self, card: Card) -> Result<DealOutcome, TrackerError> {
        match self.state.mode {
            InteractionMode::AwaitingTarget(_) => Err(TrackerError::ActionTargetPending),
            InteractionMode::ForcedDrawing(draw) => self.deal_forced(draw, card),
            InteractionMode::Dealing => self.deal_to_active(card),
        }
    }

    fn deal_to_active(&mut self, card: Card) -> Result<DealOutcome, TrackerError> {
        let player = self.state.active.ok_or(TrackerError::NoActivePlayer)?;
        if self.state.statuses[player] != PlayerStatus::Active {
            return Err(TrackerError::PlayerNotActive(player));
        }
        self.check_available(card)?;
        self.push_snapshot();

        let first_card = self.state.hands[player].is_empty();
        self.state.hands[player].push_back(card);
        debug!(round = self.number, %player, %card, "Dealt card");

        let outcome = match card {
            Card::Number(_) => {
                let outcome = match self.resolve_duplicate(player) {
                    Some(Knockout::Busted) => DealOutcome::Busted { player },
                    Some(Knockout::Saved) => DealOutcome::SecondChanceUsed { player },
                    None => DealOutcome::Placed { player },
                };
                self.advance_from(player);
                outcome
            }
            Card::Modifier(_) => {
                self.advance_from(player);
                DealOutcome::Placed { player }
            }
            Card::Action(kind) => match TargetedAction::from_action(kind) {
                None => {
                    self.advance_from(player);
                    DealOutcome::Placed { player }
                }
                Some(kind) if first_card => {
                    debug!(%player, ?kind, "Action on first card has no effect");
                    self.advance_from(player);
                    DealOutcome::DeadAction { player, kind }
                }
                Some(kind) => {
                    self.state.mode = InteractionMode::AwaitingTarget(PendingAction {
                        kind,
                        source: player,
                    });
                    DealOutcome::ActionPending {
                        source: player,
                        kind,
                    }
                }
            },
        };
        Ok(outcome)
    }

    fn deal_forced(&mut self, draw: ForcedDraw, card: Card) -> Result<DealOutcome, TrackerError> {
        let ForcedDraw { source, target, .. } = draw;

        if self.state.statuses[target] != PlayerStatus::Active {
            self.push_snapshot();
            self.state.mode = InteractionMode::Dealing;
            self.advance_from(source);
            info!(%source, %target, "Forced draw target already out; forced draw ended");
            return Ok(DealOutcome::ForcedDrawAborted { source, target });
        }

        self.check_available(card)?;
        self.push_snapshot();

        self.state.hands[target].push_back(card);
        let dealt = draw.dealt + 1;
        debug!(round = self.number, %target, %card, dealt, "Forced card");

        // Only numbers matter here; forced action cards just sit in the hand.
        let knockout = match card {
            Card::Number(_) => self.resolve_duplicate(target),
            Card::Modifier(_) | Card::Action(_) => None,
        };

        if knockout.is_some() || dealt >= FORCED_DRAW_CARDS {
            self.state.mode = InteractionMode::Dealing;
            self.advance_from(source);
        } else {
            self.state.mode = InteractionMode::ForcedDrawing(ForcedDraw { dealt, ..draw });
        }

        Ok(match knockout {
            Some(Knockout::Busted) => DealOutcome::Busted { player: target },
            Some(Knockout::Saved) => DealOutcome::SecondChanceUsed { player: target },
            None => DealOutcome::Placed { player: target },
        })
    }

    /// Check `player`'s hand for a duplicate number and resolve it.
    ///
    /// A Second Chance in hand is discarded together with the just-dealt
    /// duplicate (the last card) and the player stays; otherwise they bust.
    fn resolve_duplicate(&mut self, player: PlayerId) -> Option<Knockout> {
        let hand = &mut self.state.hands[player];
        if !has_duplicate_number(hand) {
            return None;
        }

        let saver = hand.iter().position(|c| c.is_action(ActionKind::SecondChance));
        match saver {
            Some(index) => {
                let second_chance = hand.remove(index);
                let duplicate = hand.pop_back();
                self.state.discard.push_back(second_chance);
                self.state.discard.extend(duplicate);
                self.state.statuses[player] = PlayerStatus::Stayed;
                info!(round = self.number, %player, "Second Chance used");
                Some(Knockout::Saved)
            }
            None => {
                self.state.statuses[player] = PlayerStatus::Busted;
                info!(round = self.number, %player, "Busted");
                Some(Knockout::Busted)
            }
        }
    }

    /// Choose the target of the pending Freeze or Flip Three.
    ///
    /// Freeze ends the target's round and the turn passes on from the
    /// source. Flip Three starts a forced draw onto the target.
    pub fn select_action_target(&mut self, target: PlayerId) -> Result<(), TrackerError> {
        let InteractionMode::AwaitingTarget(pending) = self.state.mode else {
            return Err(TrackerError::NoPendingAction);
        };
        self.ensure_active(target)?;
        self.push_snapshot();

        match pending.kind {
            TargetedAction::Freeze => {
                self.state.statuses[target] = PlayerStatus::Frozen;
                self.state.mode = InteractionMode::Dealing;
                self.advance_from(pending.source);
                info!(round = self.number, source = %pending.source, %target, "Frozen");
            }
            TargetedAction::Flip3 => {
                self.state.mode = InteractionMode::ForcedDrawing(ForcedDraw {
                    source: pending.source,
                    target,
                    dealt: 0,
                });
                info!(round = self.number, source = %pending.source, %target, "Flip Three started");
            }
        }
        Ok(())
    }

    /// Drop the pending Freeze / Flip Three without applying it.
    ///
    /// Hands and statuses are untouched, so no snapshot is taken.
    pub fn cancel_action(&mut self) -> Result<(), TrackerError> {
        if !matches!(self.state.mode, InteractionMode::AwaitingTarget(_)) {
            return Err(TrackerError::NoPendingAction);
        }
        self.state.mode = InteractionMode::Dealing;
        debug!(round = self.number, "Pending action cancelled");
        Ok(())
    }

    /// Manually end `player`'s round ("Stay", "Freeze self") and pass the turn.
    ///
    /// ## Errors
    ///
    /// - `StatusNotTerminal` if `status` is `Active`
    /// - `UnknownPlayer` / `PlayerNotActive` for a bad player
    pub fn set_status_and_advance(
        &mut self,
        player: PlayerId,
        status: PlayerStatus,
    ) -> Result<(), TrackerError> {
        if !status.is_terminal() {
            return Err(TrackerError::StatusNotTerminal(status));
        }
        self.ensure_active(player)?;
        self.push_snapshot();

        self.state.statuses[player] = status;
        self.advance_from(player);
        debug!(round = self.number, %player, ?status, "Status set");
        Ok(())
    }

    /// Skip to the next active player. Returns the new active player, or
    /// `None` (and changes nothing) if nobody other than the current
    /// player is still active.
    pub fn advance_to_next_player(&mut self) -> Option<PlayerId> {
        let current = self.state.active?;
        let next = self
            .state
            .next_active(current)
            .filter(|&next| next != current)?;
        self.state.active = Some(next);
        Some(next)
    }

    /// Hand the turn marker to a specific active player.
    pub fn select_player(&mut self, player: PlayerId) -> Result<(), TrackerError> {
        self.ensure_active(player)?;
        self.state.active = Some(player);
        Ok(())
    }

    /// Record a card as out of the deck without dealing it.
    pub fn discard_card(&mut self, card: Card) -> Result<(), TrackerError> {
        self.check_available(card)?;
        self.push_snapshot();
        self.state.discard.push_back(card);
        debug!(round = self.number, %card, "Discarded");
        Ok(())
    }

    /// Shuffle the discard list back into the deck.
    ///
    /// Returns how many cards went back. An empty discard list is a no-op.
    pub fn reshuffle_discards(&mut self) -> usize {
        let returned = self.state.discard.len();
        if returned > 0 {
            self.push_snapshot();
            self.state.discard.clear();
            info!(round = self.number, returned, "Discards reshuffled into deck");
        }
        returned
    }

    /// Restore the state before the last mutating command.
    ///
    /// Returns false (and changes nothing) if there is no history.
    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(previous) => {
                self.state = previous;
                debug!(round = self.number, depth = self.undo_stack.len(), "Undo");
                true
            }
            None => false,
        }
    }

    /// Drop the undo history. Used once the round has been scored.
    pub fn clear_history(&mut self) {
        self.undo_stack.clear();
    }

    /// Consume the engine, returning its final state.
    #[must_use]
    pub fn into_state(self) -> RoundState {
        self.state
    }

    // === Helpers ===

    fn push_snapshot(&mut self) {
        self.undo_stack.push(self.state.clone());
    }

    fn advance_from(&mut self, player: PlayerId) {
        self.state.active = self.state.next_active(player);
    }

    fn ensure_active(&self, player: PlayerId) -> Result<(), TrackerError> {
        if !self.state.statuses.contains(player) {
            return Err(TrackerError::UnknownPlayer(player));
        }
        if self.state.statuses[player] != PlayerStatus::Active {
            return Err(TrackerError::PlayerNotActive(player));
        }
        Ok(())
    }

    fn check_available(&self, card: Card) -> Result<(), TrackerError> {
        if self.enforce_pool_limits && self.remaining().get(card) <= 0 {
            return Err(TrackerError::CardExhausted(card));
        }
        Ok(())
    }
}
