//! Error types.
//!
//! Only lookups and lifecycle misuse are errors. A verb whose precondition
//! fails returns `false`; a lost or won game is a `Progress` value.

use std::path::PathBuf;

/// Errors raised by the engine for unknown names and out-of-order calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("unknown city: {0}")]
    UnknownCity(String),

    #[error("unknown character: {0}")]
    UnknownCharacter(String),

    #[error("unknown disease colour: {0}")]
    UnknownColour(String),

    #[error("no such card in {character}'s hand: {card}")]
    CardNotInHand { character: String, card: String },

    #[error("game has already been set up")]
    AlreadySetUp,

    #[error("game has not been set up")]
    NotSetUp,

    #[error("game has already been started")]
    AlreadyStarted,

    #[error("game needs at least one character")]
    NoCharacters,

    #[error("game is full: at most {0} characters")]
    TooManyCharacters(usize),

    #[error("settings error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors that can occur when loading or validating settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {message}")]
    FileRead { path: PathBuf, message: String },

    #[error("failed to parse TOML: {0}")]
    TomlParse(String),

    #[error("settings validation error: {0}")]
    Validation(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::TomlParse(err.to_string())
    }
}
