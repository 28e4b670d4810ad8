//! # pandemic-engine
//!
//! Turn-based rule engine for a cooperative disease-control board game:
//! characters travel a city graph, diseases spread and are cured, outbreaks
//! cascade and epidemics escalate until the players win or lose.
//!
//! ## Design Principles
//!
//! 1. **Driven From Outside**: The engine never loops on its own. A driver
//!    calls one verb or phase at a time and reads back a `Progress`.
//!
//! 2. **Deterministic**: All randomness comes from a seeded ChaCha8 stream.
//!    Same settings + same seed + same calls = same game.
//!
//! 3. **Configuration In, Events Out**: `GameSettings` is passed in by value;
//!    every change is recorded as a structured `GameEvent` the driver drains.
//!
//! ## Outcomes
//!
//! - A verb whose precondition fails returns `false` and changes nothing.
//! - Unknown names are `GameError`s.
//! - A won or lost game is a `Progress` value and a terminal `Stage`.
//!
//! ## Modules
//!
//! - `core`: ids, colours, characters, RNG, settings, errors
//! - `board`: cities, the city graph, diseases
//! - `cards`: cards, decks, event cards
//! - `events`: narrative event log
//! - `rules`: the game state machine and character verbs
//! - `snapshot`: plain-data views for external formatters

pub mod core;
pub mod board;
pub mod cards;
pub mod events;
pub mod rules;
pub mod snapshot;

// Re-export commonly used types
pub use crate::core::{
    CharacterId, CityId, Colour, Character,
    GameRng, GameRngState,
    CitySettings, GameSettings,
    ConfigError, GameError,
};

pub use crate::board::{City, CityGraph, Disease, DiseaseRegistry, MAX_INFECTION_LEVEL};

pub use crate::cards::{Card, CardKind, Deck, DeckKind, DeckState, EventCard, EventTarget};

pub use crate::events::{EventLog, GameEvent, Severity};

pub use crate::rules::{Action, Game, GameBuilder, LossReason, Progress, Stage, CARDS_TO_CURE};

pub use crate::snapshot::{CardSnapshot, CharacterSnapshot, CitySnapshot, DeckSnapshot, DiseaseSnapshot, GameSnapshot};
