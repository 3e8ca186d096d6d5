//! Round scoring and bust risk.

use im::Vector;
use smallvec::SmallVec;

use crate::cards::{Card, Modifier, Number};
use crate::deck::RemainingCounts;

/// Distinct numbers needed for the Flip 7 bonus.
pub const FLIP7_UNIQUE_NUMBERS: usize = 7;

/// Points for the Flip 7 bonus.
pub const FLIP7_BONUS: u32 = 15;

/// Distinct number values in a hand.
#[must_use]
pub fn unique_numbers(hand: &Vector<Card>) -> usize {
    let mut seen = [false; 13];
    for n in hand.iter().filter_map(|c| c.as_number()) {
        seen[n.value() as usize] = true;
    }
    seen.iter().filter(|&&s| s).count()
}

/// Check whether a hand holds seven distinct numbers.
#[must_use]
pub fn has_flip7(hand: &Vector<Card>) -> bool {
    unique_numbers(hand) >= FLIP7_UNIQUE_NUMBERS
}

/// Check whether a hand holds two copies of any number value.
#[must_use]
pub fn has_duplicate_number(hand: &Vector<Card>) -> bool {
    let numbers: SmallVec<[Number; 8]> = hand.iter().filter_map(|c| c.as_number()).collect();
    numbers.len() != unique_numbers(hand)
}

/// Score a hand that did not bust.
///
/// Numbers are summed and doubled by the x2 modifier; flat modifiers are
/// added after doubling; the Flip 7 bonus is added on top when earned.
/// Busted hands score 0 and are never passed here.
#[must_use]
pub fn round_score(hand: &Vector<Card>, flip7: bool) -> u32 {
    let mut number_sum = 0u32;
    let mut flat = 0u32;
    let mut doubled = false;

    for card in hand {
        match card {
            Card::Number(n) => number_sum += u32::from(n.value()),
            Card::Modifier(Modifier::Times2) => doubled = true,
            Card::Modifier(m) => flat += m.bonus().unwrap_or(0),
            Card::Action(_) => {}
        }
    }

    let mut score = if doubled { number_sum * 2 } else { number_sum };
    score += flat;
    if flip7 {
        score += FLIP7_BONUS;
    }
    score
}

/// Chance that the next unseen card duplicates a number already in `hand`.
///
/// Numerator: remaining copies of the hand's number values. Denominator:
/// every remaining card, modifiers and actions included. Returns 0 when
/// nothing remains.
#[must_use]
pub fn bust_probability(hand: &Vector<Card>, remaining: &RemainingCounts) -> f64 {
    let total = remaining.total();
    if total == 0 {
        return 0.0;
    }

    let mut held = [false; 13];
    for n in hand.iter().filter_map(|c| c.as_number()) {
        held[n.value() as usize] = true;
    }
    let bust_cards: u32 = Number::all()
        .filter(|n| held[n.value() as usize])
        .map(|n| remaining.available(Card::Number(n)))
        .sum();

    f64::from(bust_cards) / f64::from(total)
}
