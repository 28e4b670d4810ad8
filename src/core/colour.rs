//! Disease colours.
//!
//! Every city belongs to exactly one colour and every disease is identified
//! by its colour. Settings name colours as strings (`"Blue"`, `"yellow"`);
//! `Colour::from_str` accepts either capitalisation.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::GameError;

/// Disease colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Colour {
    Blue,
    Yellow,
    Black,
    Red,
}

impl Colour {
    /// All colours in canonical order.
    pub const ALL: [Colour; 4] = [Colour::Blue, Colour::Yellow, Colour::Black, Colour::Red];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Colour::Blue => "Blue",
            Colour::Yellow => "Yellow",
            Colour::Black => "Black",
            Colour::Red => "Red",
        }
    }
}

impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Colour {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Colour::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::UnknownColour(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_colour() {
        assert_eq!("Blue".parse::<Colour>().unwrap(), Colour::Blue);
        assert_eq!("red".parse::<Colour>().unwrap(), Colour::Red);
        assert_eq!(" BLACK ".parse::<Colour>().unwrap(), Colour::Black);
    }

    #[test]
    fn test_parse_unknown_colour() {
        let err = "Purple".parse::<Colour>().unwrap_err();
        assert_eq!(err.to_string(), "unknown disease colour: Purple");
    }

    #[test]
    fn test_display_round_trip() {
        for colour in Colour::ALL {
            assert_eq!(colour.to_string().parse::<Colour>().unwrap(), colour);
        }
    }
}
