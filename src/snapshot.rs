//! Plain-data snapshots of a game.
//!
//! `Game::snapshot` flattens the live state into owned, name-keyed structures
//! that any serde format can write. Snapshots are read-only views; nothing
//! converts them back into a running game.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::board::{City, Disease};
use crate::cards::{Card, Deck, DeckState};
use crate::core::{Character, Colour};
use crate::rules::{Game, Stage};

/// The whole game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub stage: Stage,
    pub characters: Vec<CharacterSnapshot>,
    pub active_character: Option<String>,
    pub cities: BTreeMap<String, CitySnapshot>,
    pub diseases: BTreeMap<Colour, DiseaseSnapshot>,
    pub player_deck: DeckSnapshot,
    pub infect_deck: DeckSnapshot,
    pub infection_rate: u32,
    pub epidemic_count: u32,
    pub outbreak_count: u32,
    pub skip_infect_phase: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    pub name: String,
    pub location: Option<String>,
    pub action_count: u32,
    /// Cards in the order received.
    pub hand: Vec<CardSnapshot>,
}

/// A card as a name and, for city cards, a colour.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub name: String,
    pub colour: Option<Colour>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitySnapshot {
    pub colour: Colour,
    pub connections: Vec<String>,
    /// Only colours present in the city.
    pub infection_levels: BTreeMap<Colour, u8>,
    pub has_lab: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseSnapshot {
    pub cured: bool,
    pub eradicated: bool,
    pub public_health: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSnapshot {
    pub state: DeckState,
    pub remaining: usize,
    /// Oldest discard first.
    pub discard: Vec<CardSnapshot>,
}

fn cards_of(cards: &[Card]) -> Vec<CardSnapshot> {
    cards
        .iter()
        .map(|c| CardSnapshot {
            name: c.name.clone(),
            colour: c.colour,
        })
        .collect()
}

impl DeckSnapshot {
    fn of(deck: &Deck) -> Self {
        Self {
            state: deck.state(),
            remaining: deck.len(),
            discard: cards_of(deck.discard()),
        }
    }
}

impl DiseaseSnapshot {
    fn of(disease: &Disease) -> Self {
        Self {
            cured: disease.cured,
            eradicated: disease.is_eradicated(),
            public_health: disease.public_health,
        }
    }
}

impl Game {
    /// Capture the current state as plain data.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        let city_name = |id| self.cities.get(id).map(|c: &City| c.name.clone());

        let characters = self
            .characters()
            .iter()
            .map(|c: &Character| CharacterSnapshot {
                name: c.name.clone(),
                location: c.location.and_then(city_name),
                action_count: c.action_count,
                hand: cards_of(&c.hand),
            })
            .collect();

        let cities = self
            .cities
            .iter()
            .map(|city| {
                let snapshot = CitySnapshot {
                    colour: city.colour,
                    connections: city.connections.iter().filter_map(|&id| city_name(id)).collect(),
                    infection_levels: city
                        .infection_levels
                        .iter()
                        .filter(|(_, level)| **level > 0)
                        .map(|(&colour, &level)| (colour, level))
                        .collect(),
                    has_lab: city.has_lab,
                };
                (city.name.clone(), snapshot)
            })
            .collect();

        let diseases = self
            .diseases
            .iter()
            .map(|d| (d.colour, DiseaseSnapshot::of(d)))
            .collect();

        GameSnapshot {
            stage: self.stage,
            characters,
            active_character: self.character(self.active).map(|c| c.name.clone()),
            cities,
            diseases,
            player_deck: DeckSnapshot::of(&self.player_deck),
            infect_deck: DeckSnapshot::of(&self.infect_deck),
            infection_rate: self.infection_rate,
            epidemic_count: self.epidemic_count,
            outbreak_count: self.outbreak_count,
            skip_infect_phase: self.skip_infect_phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::GameBuilder;

    #[test]
    fn test_snapshot_of_started_game() {
        let game = GameBuilder::new().seed(3).character("Evie").character("Sam").start().unwrap();

        let snapshot = game.snapshot();

        assert_eq!(snapshot.stage, Stage::Running);
        assert_eq!(snapshot.characters.len(), 2);
        assert_eq!(snapshot.characters[0].location.as_deref(), Some("London"));
        assert_eq!(snapshot.characters[1].hand.len(), 4);
        assert_eq!(snapshot.active_character.as_deref(), Some("Evie"));
        assert_eq!(snapshot.cities.len(), 40);
        assert!(snapshot.cities["London"].has_lab);
        assert_eq!(snapshot.cities["London"].connections.len(), 6);
        assert_eq!(snapshot.infect_deck.discard.len(), 9);
        for card in &snapshot.infect_deck.discard {
            assert_eq!(card.colour, Some(snapshot.cities[&card.name].colour));
        }
        assert!(snapshot.characters[0].hand.iter().all(|c| c.colour.is_some()));
        assert_eq!(snapshot.diseases.len(), 4);

        let units: u32 = snapshot
            .cities
            .values()
            .flat_map(|c| c.infection_levels.values())
            .map(|&l| u32::from(l))
            .sum();
        assert_eq!(units, 18);
    }
}
