//! Card identities.
//!
//! Cards are value objects: two physical "7" cards are the same `Card`.
//! The three kinds are a tagged enum so every consumer (duplicate check,
//! scoring, deck accounting) matches exhaustively.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest number card value.
pub const MAX_NUMBER: u8 = 12;

/// A number card value in `0..=12`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Number(u8);

impl Number {
    /// Create a number card value, or `None` if it is above 12.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= MAX_NUMBER {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Face value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Iterate over every number value, 0 through 12.
    pub fn all() -> impl Iterator<Item = Number> {
        (0..=MAX_NUMBER).map(Number)
    }
}

impl TryFrom<u8> for Number {
    type Error = CardParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Number::new(value).ok_or(CardParseError::NumberOutOfRange(value))
    }
}

impl From<Number> for u8 {
    fn from(number: Number) -> Self {
        number.0
    }
}

/// Score modifier cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Modifier {
    Plus2,
    Plus4,
    Plus6,
    Plus8,
    Plus10,
    Times2,
}

impl Modifier {
    /// All modifiers in display order.
    pub const ALL: [Modifier; 6] = [
        Modifier::Plus2,
        Modifier::Plus4,
        Modifier::Plus6,
        Modifier::Plus8,
        Modifier::Plus10,
        Modifier::Times2,
    ];

    /// Flat points added to the round score. `None` for the doubler.
    #[must_use]
    pub const fn bonus(self) -> Option<u32> {
        match self {
            Modifier::Plus2 => Some(2),
            Modifier::Plus4 => Some(4),
            Modifier::Plus6 => Some(6),
            Modifier::Plus8 => Some(8),
            Modifier::Plus10 => Some(10),
            Modifier::Times2 => None,
        }
    }
}

/// Action cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActionKind {
    /// Ends the chosen target's round without a bust.
    Freeze,
    /// Forces three cards onto the chosen target.
    Flip3,
    /// Held in hand; cancels one bust.
    SecondChance,
}

impl ActionKind {
    /// All actions in display order.
    pub const ALL: [ActionKind; 3] = [ActionKind::Freeze, ActionKind::Flip3, ActionKind::SecondChance];
}

/// A card identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Card {
    Number(Number),
    Modifier(Modifier),
    Action(ActionKind),
}

impl Card {
    /// Number card with the given value, or `None` if it is above 12.
    #[must_use]
    pub const fn number(value: u8) -> Option<Card> {
        match Number::new(value) {
            Some(n) => Some(Card::Number(n)),
            None => None,
        }
    }

    /// The number value, if this is a number card.
    #[must_use]
    pub const fn as_number(self) -> Option<Number> {
        match self {
            Card::Number(n) => Some(n),
            Card::Modifier(_) | Card::Action(_) => None,
        }
    }

    /// Check if this is the given action card.
    #[must_use]
    pub fn is_action(self, kind: ActionKind) -> bool {
        self == Card::Action(kind)
    }
}

impl From<Number> for Card {
    fn from(number: Number) -> Self {
        Card::Number(number)
    }
}

impl From<Modifier> for Card {
    fn from(modifier: Modifier) -> Self {
        Card::Modifier(modifier)
    }
}

impl From<ActionKind> for Card {
    fn from(kind: ActionKind) -> Self {
        Card::Action(kind)
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.bonus() {
            Some(points) => write!(f, "+{points}"),
            None => write!(f, "x2"),
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActionKind::Freeze => "Freeze",
            ActionKind::Flip3 => "Flip3",
            ActionKind::SecondChance => "2ndChance",
        };
        write!(f, "{name}")
    }
}

impl std::fmt::Display for Card {
    /// Formats as `7`, `+4`, `x2`, `Freeze`, `Flip3`, `2ndChance`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Card::Number(n) => std::fmt::Display::fmt(n, f),
            Card::Modifier(m) => std::fmt::Display::fmt(m, f),
            Card::Action(a) => std::fmt::Display::fmt(a, f),
        }
    }
}

/// Error parsing card text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardParseError {
    #[error("number card {0} is out of range (0-12)")]
    NumberOutOfRange(u8),

    #[error("unrecognized card {0:?}")]
    Unrecognized(String),
}

/// Parse the `Display` form, case-insensitively. `X2`, `×2` and
/// `SecondChance` are accepted as aliases.
impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        // `u8::from_str` accepts a leading '+', which belongs to modifiers here.
        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            let value = text
                .parse::<u8>()
                .map_err(|_| CardParseError::Unrecognized(text.to_string()))?;
            return Number::try_from(value).map(Card::Number);
        }

        let card = match text.to_ascii_lowercase().as_str() {
            "+2" => Card::Modifier(Modifier::Plus2),
            "+4" => Card::Modifier(Modifier::Plus4),
            "+6" => Card::Modifier(Modifier::Plus6),
            "+8" => Card::Modifier(Modifier::Plus8),
            "+10" => Card::Modifier(Modifier::Plus10),
            "x2" | "×2" => Card::Modifier(Modifier::Times2),
            "freeze" => Card::Action(ActionKind::Freeze),
            "flip3" => Card::Action(ActionKind::Flip3),
            "2ndchance" | "secondchance" => Card::Action(ActionKind::SecondChance),
            _ => return Err(CardParseError::Unrecognized(text.to_string())),
        };
        Ok(card)
    }
}
