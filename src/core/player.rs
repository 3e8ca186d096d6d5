//! Player identification, per-player data storage, and the roster.
//!
//! ## PlayerId
//!
//! Roster position of a player. Fixes both turn order and dealer rotation.
//!
//! ## PlayerMap
//!
//! Per-player data storage backed by `Vec` for O(1) access.
//! Supports iteration and indexing by `PlayerId`.
//!
//! ## Roster
//!
//! Ordered, validated list of player names edited during setup.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::config::GameConfig;
use super::error::TrackerError;

/// Seats a `PlayerId` can address.
const MAX_SEATS: usize = u8::MAX as usize;

/// Player identifier: the 0-based roster position.
///
/// The first player added is `PlayerId(0)` and deals the first round.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw roster index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a roster of `player_count` players.
    ///
    /// ```
    /// use flip7_tracker::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[0], PlayerId::new(0));
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }

    /// The player seated after this one, wrapping at the end of the roster.
    ///
    /// ## Panics
    ///
    /// Panics if `player_count` is 0.
    #[must_use]
    pub fn next(self, player_count: usize) -> PlayerId {
        PlayerId(((self.index() + 1) % player_count) as u8)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One value per seat, indexed by `PlayerId`.
///
/// Hands, statuses, round scores and totals all live in a `PlayerMap`, so
/// every per-player table in a round has the same length as the roster.
///
/// ## Example
///
/// ```
/// use flip7_tracker::core::{PlayerId, PlayerMap};
///
/// let mut totals: PlayerMap<u32> = PlayerMap::new(4, |_| 0);
/// totals[PlayerId::new(1)] += 15;
/// assert_eq!(totals[PlayerId::new(1)], 15);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    seats: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build a table with `init(player)` for every seat.
    ///
    /// ## Panics
    ///
    /// Panics if `player_count` is 0 or above 255.
    pub fn new(player_count: usize, init: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "A table needs at least one seat");
        assert!(player_count <= 255, "PlayerId holds at most 255 seats");

        Self {
            seats: PlayerId::all(player_count).map(init).collect(),
        }
    }

    /// Every seat starts at `value`.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Every seat starts at `T::default()` (empty hand, `Active`, 0 points).
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    /// Check whether `player` has a seat in this table.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.seats.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.seats[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.seats[player.index()]
    }

    /// (seat, value) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.player_ids().zip(self.seats.iter())
    }

    /// Values in turn order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.seats.iter()
    }

    /// Seats in turn order.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.seats.len())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// Ordered list of player names.
///
/// Names are trimmed, non-empty, unique, and at most `max_name_len`
/// characters. Roster order fixes turn order and dealer rotation.
///
/// A roster loaded through serde is checked for empty and duplicate names
/// and the 255-seat limit. Name length depends on the `GameConfig` in use
/// and is not rechecked on load.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Roster {
    names: Vec<String>,
    index: FxHashMap<String, PlayerId>,
}

impl TryFrom<Vec<String>> for Roster {
    type Error = TrackerError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        let mut roster = Self::new();
        for name in &names {
            roster.push(name)?;
        }
        Ok(roster)
    }
}

impl From<Roster> for Vec<String> {
    fn from(roster: Roster) -> Self {
        roster.names
    }
}

impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if no players are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Add a player at the end of the roster.
    ///
    /// ## Errors
    ///
    /// - `EmptyName` if the trimmed name is empty
    /// - `NameTooLong` if it exceeds `config.max_name_len` characters
    /// - `DuplicateName` if the name is already registered
    /// - `RosterFull` if the roster already holds `config.max_players`
    pub fn add(&mut self, name: &str, config: &GameConfig) -> Result<PlayerId, TrackerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackerError::EmptyName);
        }
        let len = name.chars().count();
        if len > config.max_name_len {
            return Err(TrackerError::NameTooLong {
                len,
                max: config.max_name_len,
            });
        }
        let max = config.max_players.min(MAX_SEATS);
        if self.index.contains_key(name) {
            return Err(TrackerError::DuplicateName(name.to_string()));
        }
        if self.names.len() >= max {
            return Err(TrackerError::RosterFull { max });
        }
        self.push(name)
    }

    /// Append a trimmed, non-empty, unique name without the config limits.
    fn push(&mut self, name: &str) -> Result<PlayerId, TrackerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackerError::EmptyName);
        }
        if self.index.contains_key(name) {
            return Err(TrackerError::DuplicateName(name.to_string()));
        }
        if self.names.len() >= MAX_SEATS {
            return Err(TrackerError::RosterFull { max: MAX_SEATS });
        }

        let id = PlayerId(self.names.len() as u8);
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        Ok(id)
    }

    /// Remove a player by name. Later players shift up one position.
    pub fn remove(&mut self, name: &str) -> Result<(), TrackerError> {
        let name = name.trim();
        let position = self
            .names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| TrackerError::UnknownName(name.to_string()))?;
        self.names.remove(position);
        self.reindex();
        Ok(())
    }

    /// Remove every player.
    pub fn clear(&mut self) {
        self.names.clear();
        self.index.clear();
    }

    /// Look up a player by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<PlayerId> {
        self.index.get(name.trim()).copied()
    }

    /// Name of a player, if registered.
    #[must_use]
    pub fn name(&self, player: PlayerId) -> Option<&str> {
        self.names.get(player.index()).map(String::as_str)
    }

    /// Iterate over (PlayerId, name) pairs in roster order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, n)| (PlayerId(i as u8), n.as_str()))
    }

    /// All names in roster order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    fn reindex(&mut self) {
        self.index = self
            .names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), PlayerId(i as u8)))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p0), "Player 0");
    }

    #[test]
    fn test_player_id_next_wraps() {
        assert_eq!(PlayerId::new(0).next(3), PlayerId::new(1));
        assert_eq!(PlayerId::new(2).next(3), PlayerId::new(0));
    }

    #[test]
    fn test_player_map_new() {
        let map: PlayerMap<i32> = PlayerMap::new(4, |p| p.index() as i32 * 10);

        assert_eq!(map[PlayerId::new(0)], 0);
        assert_eq!(map[PlayerId::new(3)], 30);
        assert!(map.contains(PlayerId::new(3)));
        assert!(!map.contains(PlayerId::new(4)));
    }

    #[test]
    fn test_player_map_mutation() {
        let mut map: PlayerMap<i32> = PlayerMap::with_value(2, 0);

        map[PlayerId::new(0)] = 10;
        map[PlayerId::new(1)] = 20;

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(PlayerId::new(0), &10), (PlayerId::new(1), &20)]);
    }

    #[test]
    fn test_player_map_serialization() {
        let map: PlayerMap<i32> = PlayerMap::new(2, |p| p.index() as i32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }

    #[test]
    #[should_panic(expected = "A table needs at least one seat")]
    fn test_player_map_zero_players() {
        let _: PlayerMap<i32> = PlayerMap::with_value(0, 0);
    }

    #[test]
    fn test_roster_add_trims_and_orders() {
        let config = GameConfig::default();
        let mut roster = Roster::new();

        assert_eq!(roster.add("  Alice ", &config), Ok(PlayerId::new(0)));
        assert_eq!(roster.add("Bob", &config), Ok(PlayerId::new(1)));

        assert_eq!(roster.name(PlayerId::new(0)), Some("Alice"));
        assert_eq!(roster.find("Bob"), Some(PlayerId::new(1)));
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_roster_rejects_bad_names() {
        let config = GameConfig::default();
        let mut roster = Roster::new();
        roster.add("Alice", &config).unwrap();

        assert_eq!(roster.add("   ", &config), Err(TrackerError::EmptyName));
        assert_eq!(
            roster.add("Alice", &config),
            Err(TrackerError::DuplicateName("Alice".to_string()))
        );
        assert_eq!(
            roster.add("ABCDEFGHIJKLMNOPQ", &config),
            Err(TrackerError::NameTooLong { len: 17, max: 16 })
        );
        // Exactly at the limit is fine.
        assert!(roster.add("ABCDEFGHIJKLMNOP", &config).is_ok());
    }

    #[test]
    fn test_roster_full() {
        let config = GameConfig::default().with_max_players(2);
        let mut roster = Roster::new();
        roster.add("A", &config).unwrap();
        roster.add("B", &config).unwrap();

        assert_eq!(roster.add("C", &config), Err(TrackerError::RosterFull { max: 2 }));
    }

    #[test]
    fn test_roster_remove_shifts_positions() {
        let config = GameConfig::default();
        let mut roster = Roster::new();
        for name in ["A", "B", "C"] {
            roster.add(name, &config).unwrap();
        }

        roster.remove("A").unwrap();
        assert_eq!(roster.find("B"), Some(PlayerId::new(0)));
        assert_eq!(roster.find("C"), Some(PlayerId::new(1)));
        assert_eq!(roster.remove("Z"), Err(TrackerError::UnknownName("Z".to_string())));
    }

    #[test]
    fn test_roster_serialization_rebuilds_index() {
        let config = GameConfig::default();
        let mut roster = Roster::new();
        roster.add("Alice", &config).unwrap();
        roster.add("Bob", &config).unwrap();

        let json = serde_json::to_string(&roster).unwrap();
        assert_eq!(json, r#"["Alice","Bob"]"#);

        let restored: Roster = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.find("Bob"), Some(PlayerId::new(1)));
    }

    #[test]
    fn test_roster_deserialization_validates_names() {
        assert!(serde_json::from_str::<Roster>(r#"["Alice","Alice"]"#).is_err());
        assert!(serde_json::from_str::<Roster>(r#"["Alice","  "]"#).is_err());

        let trimmed: Roster = serde_json::from_str(r#"[" Alice ","Bob"]"#).unwrap();
        assert_eq!(trimmed.find("Alice"), Some(PlayerId::new(0)));
        assert_eq!(trimmed.names(), &["Alice".to_string(), "Bob".to_string()]);

        assert_eq!(
            Roster::try_from(vec!["Ann".to_string(), "Ann".to_string()]).err(),
            Some(TrackerError::DuplicateName("Ann".to_string()))
        );
    }
}
