//! Cards and decks.
//!
//! ## Key Types
//!
//! - `Card`: name, optional colour and `CardKind`
//! - `Deck`: ordered draw pile (top = end) with a discard pile
//! - `EventCard`: special player cards with `check_playable` / `on_play` hooks
//!
//! The player deck and the infect deck share the same `Deck` mechanics and
//! differ only in their `DeckKind` and in how the game reacts to exhaustion.

pub mod card;
pub mod deck;
pub mod event;

pub use card::{Card, CardKind, EPIDEMIC_CARD_NAME};
pub use deck::{Deck, DeckKind, DeckState};
pub use event::{EventCard, EventTarget, FORECAST_DEPTH};
