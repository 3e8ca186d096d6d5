//! Card identities and the fixed card pool.
//!
//! - `Card`: tagged enum over number, modifier, and action cards
//! - `pool_count` / `identities`: the immutable pool composition
//! - `CardOption`: a card identity annotated with its remaining count

pub mod card;
pub mod pool;

pub use card::{ActionKind, Card, CardParseError, Modifier, Number, MAX_NUMBER};
pub use pool::{identities, pool_count, CardOption, IDENTITY_COUNT, POOL_SIZE};
