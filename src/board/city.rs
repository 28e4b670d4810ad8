//! A single city on the board.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;

use crate::core::{CityId, Colour};

/// Highest infection level a city can hold for one colour.
pub const MAX_INFECTION_LEVEL: u8 = 3;

/// A city node: colour, neighbours, infection levels and lab flag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub colour: Colour,

    /// Adjacent cities, usually 6 or fewer. Kept free of duplicates by
    /// `CityGraph::connect`.
    pub connections: SmallVec<[CityId; 6]>,

    /// Infection level per colour. Colours never infected here are absent.
    pub infection_levels: BTreeMap<Colour, u8>,

    pub has_lab: bool,
}

impl City {
    /// Create an uninfected city without a lab.
    pub fn new(id: CityId, name: impl Into<String>, colour: Colour) -> Self {
        Self {
            id,
            name: name.into(),
            colour,
            connections: SmallVec::new(),
            infection_levels: BTreeMap::new(),
            has_lab: false,
        }
    }

    /// Current infection level for a colour (0 if never infected).
    #[must_use]
    pub fn infection_level(&self, colour: Colour) -> u8 {
        self.infection_levels.get(&colour).copied().unwrap_or(0)
    }

    /// Check whether any colour is present.
    #[must_use]
    pub fn is_infected(&self) -> bool {
        self.infection_levels.values().any(|&level| level > 0)
    }

    /// Check adjacency.
    #[must_use]
    pub fn is_connected_to(&self, other: CityId) -> bool {
        self.connections.contains(&other)
    }

    /// Add one level of a colour.
    ///
    /// Returns the amount actually added: 1, or 0 when the city is already at
    /// `MAX_INFECTION_LEVEL` and an outbreak is required instead.
    pub fn increase_infection_level(&mut self, colour: Colour) -> u8 {
        let level = self.infection_levels.entry(colour).or_insert(0);
        if *level >= MAX_INFECTION_LEVEL {
            return 0;
        }
        *level += 1;
        1
    }

    /// Remove one level of a colour, never going below zero.
    ///
    /// Returns the amount actually removed.
    pub fn decrease_infection_level(&mut self, colour: Colour) -> u8 {
        match self.infection_levels.get_mut(&colour) {
            Some(level) if *level > 0 => {
                *level -= 1;
                1
            }
            _ => 0,
        }
    }

    /// Remove every level of a colour and return how many there were.
    pub fn nullify_infection_level(&mut self, colour: Colour) -> u8 {
        match self.infection_levels.get_mut(&colour) {
            Some(level) => std::mem::take(level),
            None => 0,
        }
    }

    /// Build a research lab. Idempotent.
    pub fn build_lab(&mut self) {
        self.has_lab = true;
    }
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "City \"{}\"", self.name)
    }
}
