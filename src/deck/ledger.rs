//! Remaining-card accounting.
//!
//! The tracker never sees the physical deck. It starts from the fixed pool
//! and subtracts every card it has been told about: cards in any hand and
//! cards in the discard list.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::pool::{identities, pool_count, slot, CardOption, IDENTITY_COUNT};
use crate::cards::Card;

/// Remaining copies per card identity.
///
/// Counts are signed: they stay at or above zero under normal play, but
/// an operator who deals more copies than the pool holds (with pool limits
/// disabled) drives them negative rather than being clamped silently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainingCounts {
    counts: [i32; IDENTITY_COUNT],
}

impl Default for RemainingCounts {
    /// The full pool.
    fn default() -> Self {
        let mut counts = [0; IDENTITY_COUNT];
        for card in identities() {
            counts[slot(card)] = pool_count(card) as i32;
        }
        Self { counts }
    }
}

impl RemainingCounts {
    /// Counts for the full, untouched pool.
    #[must_use]
    pub fn full() -> Self {
        Self::default()
    }

    /// Remove one copy of `card`.
    pub fn take(&mut self, card: Card) {
        self.counts[slot(card)] -= 1;
    }

    /// Raw remaining count (may be negative).
    #[must_use]
    pub fn get(&self, card: Card) -> i32 {
        self.counts[slot(card)]
    }

    /// Remaining count clamped at zero.
    #[must_use]
    pub fn available(&self, card: Card) -> u32 {
        self.get(card).max(0) as u32
    }

    /// Sum of all positive remaining counts.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&c| c.max(0) as u32).sum()
    }

    /// Iterate over (card, raw count) pairs in pool order.
    pub fn iter(&self) -> impl Iterator<Item = (Card, i32)> + '_ {
        identities().map(move |card| (card, self.get(card)))
    }

    /// Every identity in pool order with its clamped remaining count.
    #[must_use]
    pub fn options(&self) -> Vec<CardOption> {
        identities()
            .map(|card| CardOption {
                card,
                remaining: self.available(card),
            })
            .collect()
    }

    /// Number card options, 0 through 12.
    #[must_use]
    pub fn number_options(&self) -> Vec<CardOption> {
        self.options_where(|c| matches!(c, Card::Number(_)))
    }

    /// Modifier card options.
    #[must_use]
    pub fn modifier_options(&self) -> Vec<CardOption> {
        self.options_where(|c| matches!(c, Card::Modifier(_)))
    }

    /// Action card options.
    #[must_use]
    pub fn action_options(&self) -> Vec<CardOption> {
        self.options_where(|c| matches!(c, Card::Action(_)))
    }

    fn options_where(&self, keep: impl Fn(&Card) -> bool) -> Vec<CardOption> {
        self.options().into_iter().filter(|o| keep(&o.card)).collect()
    }
}

/// Compute remaining counts from every hand and the discard list.
///
/// Pure: no side effects, no validation.
pub fn remaining_counts<'a>(
    hands: impl IntoIterator<Item = &'a Vector<Card>>,
    discard: &'a Vector<Card>,
) -> RemainingCounts {
    let mut remaining = RemainingCounts::full();
    for card in hands.into_iter().flatten().chain(discard.iter()) {
        remaining.take(*card);
    }
    remaining
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{ActionKind, Modifier, POOL_SIZE};

    fn num(v: u8) -> Card {
        Card::number(v).unwrap()
    }

    #[test]
    fn test_full_pool() {
        let remaining = RemainingCounts::full();
        assert_eq!(remaining.total(), POOL_SIZE);
        assert_eq!(remaining.get(num(12)), 12);
        assert_eq!(remaining.get(Card::Action(ActionKind::SecondChance)), 3);
    }

    #[test]
    fn test_hands_and_discard_both_count() {
        let hands = vec![
            Vector::from(vec![num(5), num(7), Card::Modifier(Modifier::Plus4)]),
            Vector::from(vec![num(5)]),
        ];
        let discard = Vector::from(vec![num(5), Card::Action(ActionKind::Freeze)]);

        let remaining = remaining_counts(&hands, &discard);

        assert_eq!(remaining.get(num(5)), 2);
        assert_eq!(remaining.get(num(7)), 6);
        assert_eq!(remaining.get(Card::Modifier(Modifier::Plus4)), 0);
        assert_eq!(remaining.get(Card::Action(ActionKind::Freeze)), 2);
        assert_eq!(remaining.total(), POOL_SIZE - 6);
    }

    #[test]
    fn test_over_dealt_goes_negative_but_options_clamp() {
        let hands = vec![Vector::from(vec![num(1), num(1)])];
        let remaining = remaining_counts(&hands, &Vector::new());

        assert_eq!(remaining.get(num(1)), -1);
        assert_eq!(remaining.available(num(1)), 0);
        // Negative counts do not eat into the total.
        assert_eq!(remaining.total(), POOL_SIZE - 1);

        let option = remaining.number_options()[1];
        assert_eq!(option.card, num(1));
        assert!(option.is_exhausted());
    }

    #[test]
    fn test_option_rows() {
        let remaining = RemainingCounts::full();
        assert_eq!(remaining.number_options().len(), 13);
        assert_eq!(remaining.modifier_options().len(), 6);
        assert_eq!(remaining.action_options().len(), 3);
        assert_eq!(remaining.options().len(), 22);
    }
}
