//! Scoring engine: pure functions over a hand.
//!
//! - `round_score`: points for a hand that did not bust
//! - `bust_probability`: live risk that the next card is a duplicate
//! - `unique_numbers` / `has_flip7` / `has_duplicate_number`: hand inspection

pub mod score;

pub use score::{
    bust_probability, has_duplicate_number, has_flip7, round_score, unique_numbers, FLIP7_BONUS,
    FLIP7_UNIQUE_NUMBERS,
};
