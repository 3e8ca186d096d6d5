//! Deck ledger: remaining card counts derived from what has been dealt.

pub mod ledger;

pub use ledger::{remaining_counts, RemainingCounts};
