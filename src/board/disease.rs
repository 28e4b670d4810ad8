//! Diseases and their public-health pools.
//!
//! Each colour in play has a `Disease` with a finite public-health counter.
//! Placing an infection unit consumes one; treating gives back exactly what
//! was removed. The counter is capped at its starting value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::Colour;

/// One disease colour.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disease {
    pub colour: Colour,
    pub cured: bool,
    pub public_health: u32,
    max_public_health: u32,
}

impl Disease {
    /// Create an uncured disease with a full pool.
    #[must_use]
    pub fn new(colour: Colour, public_health: u32) -> Self {
        Self {
            colour,
            cured: false,
            public_health,
            max_public_health: public_health,
        }
    }

    /// The starting (and maximum) pool size.
    #[must_use]
    pub fn max_public_health(&self) -> u32 {
        self.max_public_health
    }

    /// Check whether the pool is used up.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.public_health == 0
    }

    /// Cured with nothing left on the board.
    #[must_use]
    pub fn is_eradicated(&self) -> bool {
        self.cured && self.public_health == self.max_public_health
    }

    /// Return `amount` units to the pool, never above the starting value.
    pub fn increase_resistance(&mut self, amount: u32) {
        self.public_health = (self.public_health + amount).min(self.max_public_health);
    }

    /// Consume `amount` units from the pool, never below zero.
    pub fn decrease_resistance(&mut self, amount: u32) {
        self.public_health = self.public_health.saturating_sub(amount);
    }

    /// Mark the disease cured. Permanent for the rest of the game.
    pub fn cure(&mut self) {
        self.cured = true;
    }
}

/// All diseases in play, keyed by colour.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiseaseRegistry {
    diseases: BTreeMap<Colour, Disease>,
}

impl DiseaseRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a disease, replacing any previous one of the same colour.
    pub fn insert(&mut self, disease: Disease) {
        self.diseases.insert(disease.colour, disease);
    }

    /// Get a disease by colour.
    #[must_use]
    pub fn get(&self, colour: Colour) -> Option<&Disease> {
        self.diseases.get(&colour)
    }

    /// Get a mutable disease by colour.
    pub fn get_mut(&mut self, colour: Colour) -> Option<&mut Disease> {
        self.diseases.get_mut(&colour)
    }

    /// Check whether a colour is cured. Unknown colours are not.
    #[must_use]
    pub fn is_cured(&self, colour: Colour) -> bool {
        self.get(colour).is_some_and(|d| d.cured)
    }

    /// Check whether every registered disease is cured.
    #[must_use]
    pub fn all_cured(&self) -> bool {
        !self.diseases.is_empty() && self.diseases.values().all(|d| d.cured)
    }

    /// Iterate over diseases in colour order.
    pub fn iter(&self) -> impl Iterator<Item = &Disease> {
        self.diseases.values()
    }

    /// Number of registered diseases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.diseases.len()
    }

    /// Check if no disease is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty()
    }
}
