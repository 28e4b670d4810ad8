//! City graph: name lookup and symmetric adjacency.
//!
//! Cities are stored in a `Vec` indexed by `CityId`, with an `FxHashMap`
//! from name to id. Indexing with a `CityId` obtained from this graph never
//! fails; name lookups return `GameError::UnknownCity`.

use rustc_hash::FxHashMap;
use std::ops::{Index, IndexMut};

use super::city::City;
use crate::core::{CitySettings, CityId, Colour, GameError};

/// The board's city graph.
#[derive(Clone, Debug, Default)]
pub struct CityGraph {
    cities: Vec<City>,
    by_name: FxHashMap<String, CityId>,
}

impl CityGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from settings: nodes first, then edges.
    pub fn from_settings(settings: &[CitySettings]) -> Result<Self, GameError> {
        let mut graph = Self::new();
        for city in settings {
            graph.add_city(city.name.clone(), city.colour);
        }
        for city in settings {
            let a = graph.id_of(&city.name)?;
            for other in &city.connections {
                let b = graph.id_of(other)?;
                graph.connect(a, b);
            }
        }
        Ok(graph)
    }

    /// Add a city and return its id.
    ///
    /// Re-adding an existing name returns the existing id unchanged.
    pub fn add_city(&mut self, name: impl Into<String>, colour: Colour) -> CityId {
        let name = name.into();
        if let Some(&id) = self.by_name.get(&name) {
            return id;
        }
        let id = CityId::new(self.cities.len() as u16);
        self.by_name.insert(name.clone(), id);
        self.cities.push(City::new(id, name, colour));
        id
    }

    /// Connect two cities in both directions.
    ///
    /// Duplicate edges and self-loops are ignored.
    pub fn connect(&mut self, a: CityId, b: CityId) {
        if a == b {
            return;
        }
        if !self[a].is_connected_to(b) {
            self[a].connections.push(b);
        }
        if !self[b].is_connected_to(a) {
            self[b].connections.push(a);
        }
    }

    /// Resolve a city name.
    pub fn id_of(&self, name: &str) -> Result<CityId, GameError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| GameError::UnknownCity(name.to_string()))
    }

    /// Get a city by name.
    pub fn by_name(&self, name: &str) -> Result<&City, GameError> {
        self.id_of(name).map(|id| &self[id])
    }

    /// Get a city by id.
    #[must_use]
    pub fn get(&self, id: CityId) -> Option<&City> {
        self.cities.get(id.index())
    }

    /// Neighbours of a city.
    #[must_use]
    pub fn neighbours(&self, id: CityId) -> &[CityId] {
        &self[id].connections
    }

    /// Check adjacency.
    #[must_use]
    pub fn are_connected(&self, a: CityId, b: CityId) -> bool {
        self[a].is_connected_to(b)
    }

    /// Number of cities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Check if the graph has no cities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Iterate over cities in id order.
    pub fn iter(&self) -> impl Iterator<Item = &City> {
        self.cities.iter()
    }

    /// Cities that currently have a lab.
    pub fn labs(&self) -> impl Iterator<Item = &City> {
        self.cities.iter().filter(|c| c.has_lab)
    }

    /// Sum of one colour's infection levels over the whole board.
    #[must_use]
    pub fn total_infection(&self, colour: Colour) -> u32 {
        self.cities
            .iter()
            .map(|c| u32::from(c.infection_level(colour)))
            .sum()
    }
}

impl Index<CityId> for CityGraph {
    type Output = City;

    fn index(&self, id: CityId) -> &Self::Output {
        &self.cities[id.index()]
    }
}

impl IndexMut<CityId> for CityGraph {
    fn index_mut(&mut self, id: CityId) -> &mut Self::Output {
        &mut self.cities[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameSettings;

    #[test]
    fn test_connect_is_symmetric() {
        let mut graph = CityGraph::new();
        let london = graph.add_city("London", Colour::Blue);
        let oxford = graph.add_city("Oxford", Colour::Blue);

        graph.connect(london, oxford);
        graph.connect(oxford, london);
        graph.connect(london, london);

        assert!(graph.are_connected(london, oxford));
        assert!(graph.are_connected(oxford, london));
        assert_eq!(graph.neighbours(london), &[oxford]);
        assert_eq!(graph.neighbours(oxford), &[london]);
    }

    #[test]
    fn test_name_lookup() {
        let mut graph = CityGraph::new();
        let id = graph.add_city("London", Colour::Blue);

        assert_eq!(graph.id_of("London").unwrap(), id);
        assert_eq!(graph.add_city("London", Colour::Red), id);
        assert_eq!(graph.len(), 1);
        assert_eq!(
            graph.id_of("Liverpool"),
            Err(GameError::UnknownCity("Liverpool".to_string()))
        );
    }

    #[test]
    fn test_standard_map() {
        let graph = CityGraph::from_settings(&GameSettings::default().cities).unwrap();
        assert_eq!(graph.len(), 40);

        let london = graph.by_name("London").unwrap();
        assert_eq!(london.colour, Colour::Blue);
        assert_eq!(london.connections.len(), 6);

        let washington = graph.id_of("Washington").unwrap();
        let liverpool = graph.id_of("Liverpool").unwrap();
        assert!(london.is_connected_to(washington));
        assert!(!london.is_connected_to(liverpool));

        let new_york = graph.by_name("New York").unwrap();
        assert_eq!(new_york.colour, Colour::Yellow);
        assert_eq!(new_york.connections.len(), 3);
    }

    #[test]
    fn test_total_infection() {
        let mut graph = CityGraph::new();
        let a = graph.add_city("A", Colour::Blue);
        let b = graph.add_city("B", Colour::Blue);
        graph[a].increase_infection_level(Colour::Blue);
        graph[b].increase_infection_level(Colour::Blue);
        graph[b].increase_infection_level(Colour::Blue);
        graph[b].increase_infection_level(Colour::Red);

        assert_eq!(graph.total_infection(Colour::Blue), 3);
        assert_eq!(graph.total_infection(Colour::Red), 1);
        assert_eq!(graph.total_infection(Colour::Black), 0);
    }
}
