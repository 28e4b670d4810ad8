//! Player and infection cards.
//!
//! Both decks hold the same `Card` type. City cards carry the name and colour
//! of their city; epidemic and event cards are special cards with no colour.

use serde::{Deserialize, Serialize};

use super::event::EventCard;
use crate::core::Colour;

/// Name shared by every epidemic card.
pub const EPIDEMIC_CARD_NAME: &str = "Epidemic";

/// What a card does when drawn or played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Names a city; used for flights, labs, cures and infection.
    City,
    /// Triggers an epidemic when drawn from the player deck.
    Epidemic,
    /// Special action held in hand and played through its own hook.
    Event(EventCard),
}

/// A card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    /// `None` for epidemic and event cards.
    pub colour: Option<Colour>,
    pub kind: CardKind,
}

impl Card {
    /// Create a city card.
    pub fn city(name: impl Into<String>, colour: Colour) -> Self {
        Self {
            name: name.into(),
            colour: Some(colour),
            kind: CardKind::City,
        }
    }

    /// Create an epidemic card.
    #[must_use]
    pub fn epidemic() -> Self {
        Self {
            name: EPIDEMIC_CARD_NAME.to_string(),
            colour: None,
            kind: CardKind::Epidemic,
        }
    }

    /// Create an event card.
    #[must_use]
    pub fn event(event: EventCard) -> Self {
        Self {
            name: event.name().to_string(),
            colour: None,
            kind: CardKind::Event(event),
        }
    }

    #[must_use]
    pub fn is_city(&self) -> bool {
        self.kind == CardKind::City
    }

    #[must_use]
    pub fn is_epidemic(&self) -> bool {
        self.kind == CardKind::Epidemic
    }

    /// The event this card plays, if it is an event card.
    #[must_use]
    pub fn as_event(&self) -> Option<EventCard> {
        match self.kind {
            CardKind::Event(event) => Some(event),
            _ => None,
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.colour {
            Some(colour) => write!(f, "Card \"{}-{}\"", self.name, colour),
            None => write!(f, "Card \"{}\"", self.name),
        }
    }
}
