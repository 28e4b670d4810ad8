//! Game settings.
//!
//! Settings are a plain value handed to `Game::new`. They provide:
//! - `CitySettings`: each city's name, colour and connections (by name)
//! - the disease colours in play
//! - difficulty → epidemic-count table and the infection-rate schedule
//! - turn tuning (actions per turn, hand sizes, outbreak cap)
//!
//! `GameSettings::default()` is the built-in 40-city map. Settings can also be
//! loaded from TOML:
//!
//! ```
//! use pandemic_engine::core::GameSettings;
//!
//! let settings = GameSettings::from_toml_str(r#"
//!     difficulty = "heroic"
//!     actions_per_turn = 5
//! "#).unwrap();
//!
//! assert_eq!(settings.starting_epidemics().unwrap(), 6);
//! assert_eq!(settings.cities.len(), 40);
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::colour::Colour;
use super::error::ConfigError;
use crate::cards::EventCard;

/// Number of cities drawn by the initial infection.
pub const INITIAL_INFECTION_CARDS: usize = 9;

/// One city of the map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitySettings {
    /// Unique city name, also the name of its city cards.
    pub name: String,

    /// Disease colour of the city and its cards.
    pub colour: Colour,

    /// Names of adjacent cities. Edges are symmetric, so listing an edge
    /// on either end is enough.
    #[serde(default)]
    pub connections: Vec<String>,
}

impl CitySettings {
    /// Create a city entry.
    pub fn new(name: impl Into<String>, colour: Colour) -> Self {
        Self {
            name: name.into(),
            colour,
            connections: Vec::new(),
        }
    }

    /// Add a connection (builder pattern).
    #[must_use]
    pub fn connected_to(mut self, other: impl Into<String>) -> Self {
        self.connections.push(other.into());
        self
    }
}

/// Complete game settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Cities in deck order (the first city ends up on top of unshuffled decks).
    pub cities: Vec<CitySettings>,

    /// Disease colours in play.
    pub diseases: Vec<Colour>,

    /// City where every character starts, with the first lab.
    pub starting_city: String,

    /// Key into `epidemics`.
    pub difficulty: String,

    /// Difficulty name → number of epidemic cards shuffled into the player deck.
    pub epidemics: BTreeMap<String, u32>,

    /// Infection rate indexed by epidemic count; the last entry repeats.
    pub infection_rates: Vec<u32>,

    /// Action points each character receives at the start of its turn.
    pub actions_per_turn: u32,

    /// Cards dealt to every character before epidemics are added.
    pub initial_hand_size: usize,

    /// Player cards drawn in each draw phase.
    pub cards_per_draw: usize,

    /// Hand size above which the character must discard.
    pub hand_limit: usize,

    /// Outbreak count at which the game is lost.
    pub max_outbreaks: u32,

    /// Public-health pool per colour. `None` sizes it as three units per city
    /// of that colour.
    pub public_health: Option<u32>,

    /// Event cards shuffled into the player deck.
    pub event_cards: Vec<EventCard>,
}

impl Default for GameSettings {
    fn default() -> Self {
        let mut epidemics = BTreeMap::new();
        epidemics.insert("introductory".to_string(), 4);
        epidemics.insert("standard".to_string(), 5);
        epidemics.insert("heroic".to_string(), 6);

        Self {
            cities: standard_map(),
            diseases: Colour::ALL.to_vec(),
            starting_city: "London".to_string(),
            difficulty: "introductory".to_string(),
            epidemics,
            infection_rates: vec![2, 2, 2, 2, 3, 3, 4],
            actions_per_turn: 4,
            initial_hand_size: 4,
            cards_per_draw: 2,
            hand_limit: 7,
            max_outbreaks: 8,
            public_health: None,
            event_cards: Vec::new(),
        }
    }
}

impl GameSettings {
    /// Load settings from a TOML file and validate them.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse settings from TOML text and validate them.
    ///
    /// Missing keys fall back to the defaults, including the built-in map.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: GameSettings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Set the difficulty (builder pattern).
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = difficulty.into();
        self
    }

    /// Add event cards to the player deck (builder pattern).
    #[must_use]
    pub fn with_event_cards(mut self, cards: impl IntoIterator<Item = EventCard>) -> Self {
        self.event_cards.extend(cards);
        self
    }

    /// Override the public-health pool (builder pattern).
    #[must_use]
    pub fn with_public_health(mut self, pool: u32) -> Self {
        self.public_health = Some(pool);
        self
    }

    /// Number of epidemic cards for the configured difficulty.
    pub fn starting_epidemics(&self) -> Result<u32, ConfigError> {
        self.epidemics.get(&self.difficulty).copied().ok_or_else(|| {
            ConfigError::Validation(format!("unknown difficulty: {}", self.difficulty))
        })
    }

    /// Infection rate after `epidemic_count` epidemics.
    #[must_use]
    pub fn infection_rate(&self, epidemic_count: u32) -> u32 {
        let index = (epidemic_count as usize).min(self.infection_rates.len().saturating_sub(1));
        self.infection_rates.get(index).copied().unwrap_or(0)
    }

    /// Starting public-health pool for a colour.
    #[must_use]
    pub fn public_health_for(&self, colour: Colour) -> u32 {
        self.public_health.unwrap_or_else(|| {
            3 * self.cities.iter().filter(|c| c.colour == colour).count() as u32
        })
    }

    /// Check the settings for internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Validation(msg));

        if self.cities.len() < INITIAL_INFECTION_CARDS {
            return invalid(format!(
                "at least {} cities are required, found {}",
                INITIAL_INFECTION_CARDS,
                self.cities.len()
            ));
        }

        let mut names = FxHashSet::default();
        for city in &self.cities {
            if !names.insert(city.name.as_str()) {
                return invalid(format!("duplicate city: {}", city.name));
            }
        }

        let mut colours = FxHashSet::default();
        for colour in &self.diseases {
            if !colours.insert(*colour) {
                return invalid(format!("duplicate disease: {}", colour));
            }
        }
        if colours.is_empty() {
            return invalid("no diseases configured".into());
        }

        for city in &self.cities {
            if !colours.contains(&city.colour) {
                return invalid(format!("{} has colour {} with no disease", city.name, city.colour));
            }
            for other in &city.connections {
                if other == &city.name {
                    return invalid(format!("{} is connected to itself", city.name));
                }
                if !names.contains(other.as_str()) {
                    return invalid(format!("{} is connected to unknown city {}", city.name, other));
                }
            }
        }

        if !names.contains(self.starting_city.as_str()) {
            return invalid(format!("unknown starting city: {}", self.starting_city));
        }
        if self.infection_rates.is_empty() {
            return invalid("infection_rates must not be empty".into());
        }
        if self.actions_per_turn == 0 {
            return invalid("actions_per_turn must be > 0".into());
        }
        if self.max_outbreaks == 0 {
            return invalid("max_outbreaks must be > 0".into());
        }
        self.starting_epidemics()?;

        Ok(())
    }
}

/// The built-in map: four regions of ten cities, one per colour.
fn standard_map() -> Vec<CitySettings> {
    use Colour::{Black, Blue, Red, Yellow};

    let table: [(&str, Colour, &[&str]); 40] = [
        ("London", Blue, &["Oxford", "Cambridge", "Brighton", "Washington", "Bejing", "Moscow"]),
        ("Oxford", Blue, &["Bristol", "Manchester"]),
        ("Cambridge", Blue, &["Liverpool"]),
        ("Brighton", Blue, &["Southampton"]),
        ("Southampton", Blue, &["Bristol", "Plymouth"]),
        ("Bristol", Blue, &["Plymouth"]),
        ("Plymouth", Blue, &[]),
        ("Liverpool", Blue, &["Manchester"]),
        ("Manchester", Blue, &["Edinburgh"]),
        ("Edinburgh", Blue, &["New York"]),
        ("Washington", Yellow, &["New York", "Atlanta", "Detroit"]),
        ("New York", Yellow, &["Boston"]),
        ("Detroit", Yellow, &["Chicago"]),
        ("Chicago", Yellow, &["Denver"]),
        ("Boston", Yellow, &[]),
        ("Atlanta", Yellow, &["Miami", "Dallas"]),
        ("Miami", Yellow, &[]),
        ("Dallas", Yellow, &["Denver"]),
        ("Denver", Yellow, &["Seattle"]),
        ("Seattle", Yellow, &["Shanghai"]),
        ("Bejing", Red, &["Tianjin", "Xian"]),
        ("Tianjin", Red, &["Shanghai", "Nanjing"]),
        ("Shanghai", Red, &["Nanjing", "Guangzhou"]),
        ("Nanjing", Red, &["Wuhan"]),
        ("Wuhan", Red, &["Chongqing", "Xian", "Guangzhou"]),
        ("Chongqing", Red, &["Chengdu"]),
        ("Chengdu", Red, &["Xian"]),
        ("Xian", Red, &["Kazan"]),
        ("Guangzhou", Red, &["Shenzhen"]),
        ("Shenzhen", Red, &[]),
        ("Moscow", Black, &["Smolensk", "Tula", "Yaroslavl"]),
        ("Smolensk", Black, &["Oryol"]),
        ("Oryol", Black, &["Tula", "Kursk"]),
        ("Tula", Black, &["Voronezh"]),
        ("Yaroslavl", Black, &["Cherepovets", "Kazan"]),
        ("Cherepovets", Black, &[]),
        ("Kazan", Black, &[]),
        ("Voronezh", Black, &["Kursk", "Belgorod"]),
        ("Kursk", Black, &["Belgorod"]),
        ("Belgorod", Black, &[]),
    ];

    table
        .iter()
        .map(|(name, colour, connections)| CitySettings {
            name: (*name).to_string(),
            colour: *colour,
            connections: connections.iter().map(|c| (*c).to_string()).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = GameSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.cities.len(), 40);
        assert_eq!(settings.cities[0].name, "London");
        assert_eq!(settings.starting_epidemics().unwrap(), 4);
    }

    #[test]
    fn test_infection_rate_schedule() {
        let settings = GameSettings::default();
        assert_eq!(settings.infection_rate(0), 2);
        assert_eq!(settings.infection_rate(3), 2);
        assert_eq!(settings.infection_rate(4), 3);
        assert_eq!(settings.infection_rate(5), 3);
        assert_eq!(settings.infection_rate(6), 4);
        // Past the end of the schedule the last rate repeats
        assert_eq!(settings.infection_rate(20), 4);
    }

    #[test]
    fn test_public_health_sized_by_city_count() {
        let settings = GameSettings::default();
        assert_eq!(settings.public_health_for(Colour::Blue), 30);

        let settings = settings.with_public_health(42);
        assert_eq!(settings.public_health_for(Colour::Red), 42);
    }

    #[test]
    fn test_unknown_difficulty() {
        let settings = GameSettings::default().with_difficulty("nightmare");
        assert_eq!(
            settings.starting_epidemics(),
            Err(ConfigError::Validation("unknown difficulty: nightmare".into()))
        );
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_unknown_connection_rejected() {
        let mut settings = GameSettings::default();
        settings.cities[0].connections.push("Atlantis".into());
        let err = settings.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "settings validation error: London is connected to unknown city Atlantis"
        );
    }

    #[test]
    fn test_too_few_cities_rejected() {
        let mut settings = GameSettings::default();
        settings.cities.truncate(5);
        settings.starting_city = "London".into();
        for city in &mut settings.cities {
            city.connections.clear();
        }
        assert!(matches!(settings.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_toml_overrides() {
        let settings = GameSettings::from_toml_str(
            r#"
            difficulty = "standard"
            infection_rates = [2, 3, 4]
            max_outbreaks = 5
            "#,
        )
        .unwrap();

        assert_eq!(settings.starting_epidemics().unwrap(), 5);
        assert_eq!(settings.infection_rate(9), 4);
        assert_eq!(settings.max_outbreaks, 5);
        assert_eq!(settings.actions_per_turn, 4);
    }

    #[test]
    fn test_toml_custom_map() {
        let mut toml = String::from("starting_city = \"C0\"\ndiseases = [\"Blue\"]\n");
        for i in 0..9 {
            toml.push_str(&format!(
                "[[cities]]\nname = \"C{}\"\ncolour = \"Blue\"\nconnections = [\"C{}\"]\n",
                i,
                (i + 1) % 9
            ));
        }

        let settings = GameSettings::from_toml_str(&toml).unwrap();
        assert_eq!(settings.cities.len(), 9);
        assert_eq!(settings.cities[8].connections, vec!["C0".to_string()]);
        assert_eq!(settings.public_health_for(Colour::Blue), 27);
    }

    #[test]
    fn test_toml_parse_error() {
        let err = GameSettings::from_toml_str("difficulty = ").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn test_settings_serde_round_trip() {
        let settings = GameSettings::default().with_event_cards([EventCard::Airlift]);
        let json = serde_json::to_string(&settings).unwrap();
        let deserialized: GameSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, deserialized);
    }
}
