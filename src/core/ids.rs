//! Typed identifiers for board objects.
//!
//! ## CityId
//!
//! Index of a city in the `CityGraph`. Cities are allocated in configuration
//! order, so `CityId(0)` is the first configured city.
//!
//! ## CharacterId
//!
//! Index of a character in the game's turn order, supporting 1-255 characters.
//!
//! Both are plain indices: resolve names through `CityGraph::id_of` and
//! `Game::character_id`, which return explicit not-found errors.

use serde::{Deserialize, Serialize};

/// City identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CityId(pub u16);

impl CityId {
    /// Create a new city ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw city index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "City({})", self.0)
    }
}

/// Character identifier.
///
/// Character indices are 0-based and follow turn order: the first character
/// added to the game is `CharacterId(0)` and takes the first turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub u8);

impl CharacterId {
    /// Most characters a game can hold.
    pub const LIMIT: usize = u8::MAX as usize + 1;

    /// Create a new character ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw character index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all character IDs for a game with `count` characters.
    ///
    /// ```
    /// use pandemic_engine::core::CharacterId;
    ///
    /// let ids: Vec<_> = CharacterId::all(3).collect();
    /// assert_eq!(ids, vec![CharacterId::new(0), CharacterId::new(1), CharacterId::new(2)]);
    /// ```
    pub fn all(count: usize) -> impl Iterator<Item = CharacterId> {
        (0..count.min(Self::LIMIT)).map(|i| CharacterId(i as u8))
    }
}

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Character {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_id_basics() {
        let id = CityId::new(7);
        assert_eq!(id.index(), 7);
        assert_eq!(format!("{}", id), "City(7)");
    }

    #[test]
    fn test_character_id_all() {
        let ids: Vec<_> = CharacterId::all(4).collect();
        assert_eq!(ids.len(), 4);
        assert_eq!(ids[0], CharacterId::new(0));
        assert_eq!(ids[3], CharacterId::new(3));
        assert_eq!(format!("{}", ids[1]), "Character 1");
    }

    #[test]
    fn test_id_serialization() {
        let id = CityId::new(12);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: CityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
