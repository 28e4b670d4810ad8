//! Core types: identifiers, colours, characters, RNG, settings, errors.
//!
//! Everything here is independent of the rule engine; `rules::Game` wires
//! these pieces together.

pub mod ids;
pub mod colour;
pub mod character;
pub mod rng;
pub mod config;
pub mod error;

pub use ids::{CharacterId, CityId};
pub use colour::Colour;
pub use character::Character;
pub use rng::{GameRng, GameRngState};
pub use config::{CitySettings, GameSettings, INITIAL_INFECTION_CARDS};
pub use error::{ConfigError, GameError};
