//! The board: cities, their connections, and the diseases spreading on them.
//!
//! ## Key Types
//!
//! - `City`: colour, neighbours, per-colour infection level (0..=3), lab flag
//! - `CityGraph`: cities by `CityId` with name lookup and symmetric edges
//! - `Disease` / `DiseaseRegistry`: cure state and public-health pool per colour

pub mod city;
pub mod graph;
pub mod disease;

pub use city::{City, MAX_INFECTION_LEVEL};
pub use graph::CityGraph;
pub use disease::{Disease, DiseaseRegistry};
