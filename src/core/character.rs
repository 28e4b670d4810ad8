//! Player characters.
//!
//! A `Character` is pure data: name, location, remaining action points and
//! hand. Verbs that change the board live on `Game` (see `rules::actions`),
//! addressed by `CharacterId`, so a character never holds a reference back
//! into the game.

use serde::{Deserialize, Serialize};

use super::error::GameError;
use super::ids::CityId;
use crate::cards::Card;

/// A player character.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Display name, unique within a game.
    pub name: String,

    /// Current city. `None` until the game starts.
    pub location: Option<CityId>,

    /// Action points left this turn.
    pub action_count: u32,

    /// Cards in hand, in the order received.
    pub hand: Vec<Card>,
}

impl Character {
    /// Create a character with an empty hand and no location.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: None,
            action_count: 0,
            hand: Vec::new(),
        }
    }

    /// Check whether the character is standing in `city`.
    #[must_use]
    pub fn is_at(&self, city: CityId) -> bool {
        self.location == Some(city)
    }

    /// Check if the hand holds a card with this name.
    #[must_use]
    pub fn hand_contains(&self, card_name: &str) -> bool {
        self.hand.iter().any(|c| c.name == card_name)
    }

    /// Get a card from the hand by name.
    pub fn get_card(&self, card_name: &str) -> Result<&Card, GameError> {
        self.hand
            .iter()
            .find(|c| c.name == card_name)
            .ok_or_else(|| GameError::CardNotInHand {
                character: self.name.clone(),
                card: card_name.to_string(),
            })
    }

    /// Add a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.hand.push(card);
    }

    /// Remove a card from the hand by name.
    ///
    /// Returns the card, or `None` if it wasn't held.
    pub fn take_card(&mut self, card_name: &str) -> Option<Card> {
        let pos = self.hand.iter().position(|c| c.name == card_name)?;
        Some(self.hand.remove(pos))
    }

    /// Spend one action point. Returns false if none are left.
    pub fn spend_action(&mut self) -> bool {
        if self.action_count == 0 {
            return false;
        }
        self.action_count -= 1;
        true
    }

    /// Check whether the hand exceeds `limit`.
    #[must_use]
    pub fn over_hand_limit(&self, limit: usize) -> bool {
        self.hand.len() > limit
    }
}

impl std::fmt::Display for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Character \"{}\"", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Colour;

    #[test]
    fn test_hand_lookup() {
        let mut evie = Character::new("Evie");
        evie.add_card(Card::city("London", Colour::Blue));
        evie.add_card(Card::city("Moscow", Colour::Black));

        assert!(evie.hand_contains("London"));
        assert!(!evie.hand_contains("Tula"));
        assert_eq!(evie.get_card("Moscow").unwrap().colour, Some(Colour::Black));

        let err = evie.get_card("Tula").unwrap_err();
        assert_eq!(err.to_string(), "no such card in Evie's hand: Tula");
    }

    #[test]
    fn test_take_card() {
        let mut evie = Character::new("Evie");
        evie.add_card(Card::city("London", Colour::Blue));

        let card = evie.take_card("London").unwrap();
        assert_eq!(card.name, "London");
        assert!(evie.hand.is_empty());
        assert!(evie.take_card("London").is_none());
    }

    #[test]
    fn test_spend_action_never_negative() {
        let mut evie = Character::new("Evie");
        evie.action_count = 1;

        assert!(evie.spend_action());
        assert_eq!(evie.action_count, 0);
        assert!(!evie.spend_action());
        assert_eq!(evie.action_count, 0);
    }

    #[test]
    fn test_hand_limit() {
        let mut evie = Character::new("Evie");
        for i in 0..8 {
            evie.add_card(Card::city(format!("City {}", i), Colour::Red));
        }
        assert!(evie.over_hand_limit(7));
        assert!(!evie.over_hand_limit(8));
        assert_eq!(format!("{}", evie), "Character \"Evie\"");
    }
}
