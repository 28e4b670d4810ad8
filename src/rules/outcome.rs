//! Game stages and phase outcomes.
//!
//! Phase calls return a `Progress`: keep going, or the game just ended. Inside
//! the engine a cascade that ends the game short-circuits with `GameOver`
//! through `?`, and the public entry point turns it back into a `Progress`.

use serde::{Deserialize, Serialize};

use crate::core::Colour;

/// Why the game was lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LossReason {
    /// A colour had to be placed with its public-health pool at zero.
    DiseaseExhausted(Colour),
    /// The outbreak counter reached its limit.
    OutbreakLimit,
    /// A player card had to be drawn from an empty deck.
    PlayerDeckExhausted,
}

impl std::fmt::Display for LossReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LossReason::DiseaseExhausted(colour) => write!(f, "{} disease ran out of public health", colour),
            LossReason::OutbreakLimit => f.write_str("too many outbreaks"),
            LossReason::PlayerDeckExhausted => f.write_str("player deck ran out"),
        }
    }
}

/// Result of a phase-advancing call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Progress {
    Continue,
    Won,
    Lost(LossReason),
}

impl Progress {
    /// Check if the game has ended.
    #[must_use]
    pub fn is_over(self) -> bool {
        !matches!(self, Progress::Continue)
    }
}

/// Lifecycle stage of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Characters and settings may still change.
    Setup,
    Running,
    Won,
    Lost(LossReason),
}

impl Stage {
    /// Check if the stage is terminal.
    #[must_use]
    pub fn is_over(self) -> bool {
        matches!(self, Stage::Won | Stage::Lost(_))
    }

    /// The progress a caller sees while the game sits in this stage.
    #[must_use]
    pub fn progress(self) -> Progress {
        match self {
            Stage::Won => Progress::Won,
            Stage::Lost(reason) => Progress::Lost(reason),
            Stage::Setup | Stage::Running => Progress::Continue,
        }
    }
}

/// Early exit from a cascade that ended the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GameOver {
    Won,
    Lost(LossReason),
}

impl GameOver {
    pub(crate) fn stage(self) -> Stage {
        match self {
            GameOver::Won => Stage::Won,
            GameOver::Lost(reason) => Stage::Lost(reason),
        }
    }
}

/// Internal result of a step that may end the game.
pub(crate) type Flow = Result<(), GameOver>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_progress() {
        assert_eq!(Stage::Setup.progress(), Progress::Continue);
        assert_eq!(Stage::Running.progress(), Progress::Continue);
        assert_eq!(Stage::Won.progress(), Progress::Won);
        assert_eq!(
            Stage::Lost(LossReason::OutbreakLimit).progress(),
            Progress::Lost(LossReason::OutbreakLimit)
        );
        assert!(!Stage::Running.is_over());
        assert!(Stage::Won.is_over());
    }

    #[test]
    fn test_game_over_stage() {
        let reason = LossReason::DiseaseExhausted(Colour::Blue);
        assert_eq!(GameOver::Lost(reason).stage(), Stage::Lost(reason));
        assert_eq!(GameOver::Won.stage(), Stage::Won);
        assert_eq!(reason.to_string(), "Blue disease ran out of public health");
    }
}
