//! Fixed card pool composition.
//!
//! Number `n` has `n` copies (the 0 has one), each modifier has one copy,
//! each action has three. 94 cards in total.

use serde::{Deserialize, Serialize};

use super::card::{ActionKind, Card, Modifier, Number};

/// Copies of each action card in the pool.
pub const ACTION_COPIES: u32 = 3;

/// Total cards in the pool.
pub const POOL_SIZE: u32 = 94;

/// Number of distinct card identities (13 numbers, 6 modifiers, 3 actions).
pub const IDENTITY_COUNT: usize = 22;

/// Copies of `card` in the full pool.
#[must_use]
pub const fn pool_count(card: Card) -> u32 {
    match card {
        Card::Number(n) => match n.value() {
            0 => 1,
            v => v as u32,
        },
        Card::Modifier(_) => 1,
        Card::Action(_) => ACTION_COPIES,
    }
}

/// Every card identity in pool order: numbers 0-12, modifiers, actions.
pub fn identities() -> impl Iterator<Item = Card> {
    Number::all()
        .map(Card::Number)
        .chain(Modifier::ALL.into_iter().map(Card::Modifier))
        .chain(ActionKind::ALL.into_iter().map(Card::Action))
}

/// Dense index of a card identity, matching the order of `identities()`.
#[must_use]
pub const fn slot(card: Card) -> usize {
    match card {
        Card::Number(n) => n.value() as usize,
        Card::Modifier(m) => 13 + m as usize,
        Card::Action(a) => 19 + a as usize,
    }
}

/// A dealable card annotated with how many copies remain.
///
/// Front ends use `remaining == 0` to grey out exhausted identities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardOption {
    pub card: Card,
    pub remaining: u32,
}

impl CardOption {
    /// Check if no copies remain.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}
