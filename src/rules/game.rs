//! The game state machine.
//!
//! `Game` owns the board, both decks, the disease registry and the
//! characters. It is driven one call at a time by an external driver:
//!
//! ```text
//! Game::new(settings, seed)
//!   → add_character(..)…
//!   → setup_game()        build graph, decks, diseases
//!   → start_game()        initial infection, hands, epidemics
//!   → loop {
//!         verbs…          (rules::actions)
//!         draw_phase()    (rules::infection)
//!         infect_city_phase()
//!         end_turn()
//!     }
//! ```
//!
//! ## Determinism
//!
//! All randomness comes from one seeded `GameRng`. The same settings, seed and
//! call sequence always produce the same game.

use rustc_hash::FxHashSet;

use super::outcome::{Flow, GameOver, Progress, Stage};
use crate::board::{City, CityGraph, Disease, DiseaseRegistry, MAX_INFECTION_LEVEL};
use crate::cards::{Card, Deck, DeckKind};
use crate::core::{
    Character, CharacterId, CityId, Colour, ConfigError, GameError, GameRng, GameRngState,
    GameSettings, INITIAL_INFECTION_CARDS,
};
use crate::events::{EventLog, GameEvent, Severity};

/// Infect cards drawn per level during the initial infection (3 at 3, 3 at 2, 3 at 1).
const INITIAL_INFECTION_GROUP: usize = 3;

/// A game session.
#[derive(Clone, Debug)]
pub struct Game {
    pub(crate) settings: GameSettings,
    pub(crate) rng: GameRng,
    pub(crate) cities: CityGraph,
    pub(crate) player_deck: Deck,
    pub(crate) infect_deck: Deck,
    pub(crate) diseases: DiseaseRegistry,
    pub(crate) characters: Vec<Character>,
    pub(crate) active: CharacterId,
    pub(crate) epidemic_count: u32,
    pub(crate) outbreak_count: u32,
    /// Cities that already had an outbreak during the current draw.
    pub(crate) outbreak_stack: FxHashSet<CityId>,
    pub(crate) skip_infect_phase: bool,
    pub(crate) stage: Stage,
    pub(crate) starting_epidemics: u32,
    pub(crate) infection_rate: u32,
    pub(crate) events: EventLog,
    set_up: bool,
}

impl Game {
    /// Create a game from validated settings.
    ///
    /// Nothing is built yet; add characters, then call `setup_game`.
    pub fn new(settings: GameSettings, seed: u64) -> Result<Self, GameError> {
        settings.validate()?;
        let starting_epidemics = settings.starting_epidemics()?;
        let infection_rate = settings.infection_rate(0);

        Ok(Self {
            settings,
            rng: GameRng::new(seed),
            cities: CityGraph::new(),
            player_deck: Deck::new(DeckKind::Player, Vec::new()),
            infect_deck: Deck::new(DeckKind::Infect, Vec::new()),
            diseases: DiseaseRegistry::new(),
            characters: Vec::new(),
            active: CharacterId::new(0),
            epidemic_count: 0,
            outbreak_count: 0,
            outbreak_stack: FxHashSet::default(),
            skip_infect_phase: false,
            stage: Stage::Setup,
            starting_epidemics,
            infection_rate,
            events: EventLog::new(),
            set_up: false,
        })
    }

    /// Add a character. Only allowed before the game starts.
    pub fn add_character(&mut self, name: impl Into<String>) -> Result<CharacterId, GameError> {
        if self.stage != Stage::Setup {
            return Err(GameError::AlreadyStarted);
        }
        let Ok(index) = u8::try_from(self.characters.len()) else {
            return Err(GameError::TooManyCharacters(CharacterId::LIMIT));
        };
        let id = CharacterId::new(index);
        let character = Character::new(name);
        self.emit(
            GameEvent::new(character.name.clone(), "joined the game").with_severity(Severity::Debug),
        );
        self.characters.push(character);
        Ok(id)
    }

    /// Build the city graph, both decks and the disease registry.
    ///
    /// Decks are built in configuration order with the first city on top.
    /// Configured event cards join the bottom of the player deck.
    pub fn setup_game(&mut self) -> Result<(), GameError> {
        if self.set_up {
            return Err(GameError::AlreadySetUp);
        }

        self.cities = CityGraph::from_settings(&self.settings.cities)?;

        let city_cards = || {
            self.settings
                .cities
                .iter()
                .map(|c| Card::city(c.name.clone(), c.colour))
        };
        self.infect_deck = Deck::new(DeckKind::Infect, city_cards());
        self.player_deck = Deck::new(
            DeckKind::Player,
            city_cards().chain(self.settings.event_cards.iter().map(|e| Card::event(*e))),
        );

        let mut diseases = DiseaseRegistry::new();
        for &colour in &self.settings.diseases {
            diseases.insert(Disease::new(colour, self.settings.public_health_for(colour)));
        }
        self.diseases = diseases;

        self.set_up = true;
        self.emit(
            GameEvent::new("Board", "was set up with")
                .with_object(format!("{} cities", self.cities.len()))
                .with_severity(Severity::Debug),
        );
        Ok(())
    }

    /// Start the game.
    ///
    /// Shuffles both decks, places every character at the starting city (which
    /// gets a lab), runs the initial infection, deals opening hands and only
    /// then shuffles the epidemics in. The first character becomes active.
    ///
    /// The initial infection can end the game with a tiny public-health pool,
    /// so the result is a `Progress` like any phase.
    pub fn start_game(&mut self) -> Result<Progress, GameError> {
        if !self.set_up {
            return Err(GameError::NotSetUp);
        }
        if self.stage != Stage::Setup {
            return Err(GameError::AlreadyStarted);
        }
        if self.characters.is_empty() {
            return Err(GameError::NoCharacters);
        }
        let needed = self.settings.initial_hand_size * self.characters.len();
        if needed > self.player_deck.len() {
            return Err(ConfigError::Validation(format!(
                "opening hands need {} player cards, the deck has {}",
                needed,
                self.player_deck.len()
            ))
            .into());
        }

        let start = self.cities.id_of(&self.settings.starting_city)?;

        self.player_deck.shuffle(&mut self.rng);
        self.infect_deck.shuffle(&mut self.rng);
        self.stage = Stage::Running;

        self.cities[start].build_lab();
        let start_name = self.cities[start].name.clone();
        for index in 0..self.characters.len() {
            self.characters[index].location = Some(start);
            let name = self.characters[index].name.clone();
            self.emit(
                GameEvent::new(name, "starts in")
                    .with_object(start_name.clone())
                    .with_severity(Severity::Debug),
            );
        }

        let flow = self.initial_infect_phase();
        if let Err(over) = flow {
            return Ok(self.finish(over));
        }

        self.draw_initial_hands();
        self.add_epidemics(self.starting_epidemics as usize);

        self.active = CharacterId::new(0);
        self.characters[0].action_count = self.settings.actions_per_turn;
        self.emit(GameEvent::new("Game", "started with").with_object(format!(
            "{} characters and {} epidemics",
            self.characters.len(),
            self.starting_epidemics
        )));
        Ok(Progress::Continue)
    }

    /// Draw nine infect cards: three cities at level 3, three at 2, three at 1.
    fn initial_infect_phase(&mut self) -> Flow {
        for draw in 0..INITIAL_INFECTION_CARDS {
            let units = MAX_INFECTION_LEVEL - (draw / INITIAL_INFECTION_GROUP) as u8;
            let Some(card) = self.infect_deck.take_top() else {
                break;
            };
            let target = self.card_city(&card);
            self.infect_deck.add_discard(card);
            if let Some((city, colour)) = target {
                for _ in 0..units {
                    self.infect(city, colour)?;
                }
            }
            self.outbreak_stack.clear();
        }
        Ok(())
    }

    /// Deal opening hands round-robin.
    fn draw_initial_hands(&mut self) {
        for _ in 0..self.settings.initial_hand_size {
            for index in 0..self.characters.len() {
                if let Some(card) = self.player_deck.take_top() {
                    self.give_card(CharacterId::new(index as u8), card);
                }
            }
        }
    }

    fn add_epidemics(&mut self, count: usize) {
        self.player_deck.add_epidemics(count, &mut self.rng);
        self.emit(
            GameEvent::new("Player deck", "received")
                .with_object(format!("{} epidemic cards", count))
                .with_severity(Severity::Debug),
        );
    }

    /// End the active character's turn and activate the next one.
    ///
    /// Unspent action points are lost; the next character gets a full budget.
    /// Returns the newly active character.
    pub fn end_turn(&mut self) -> CharacterId {
        if self.stage != Stage::Running {
            return self.active;
        }
        self.characters[self.active.index()].action_count = 0;
        let next = CharacterId::new(((self.active.index() + 1) % self.characters.len()) as u8);
        self.active = next;
        self.characters[next.index()].action_count = self.settings.actions_per_turn;
        let name = self.characters[next.index()].name.clone();
        self.emit(GameEvent::new(name, "begins a turn"));
        next
    }

    // === Accessors ===

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Check whether the game was won or lost.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.stage.is_over()
    }

    #[must_use]
    pub fn cities(&self) -> &CityGraph {
        &self.cities
    }

    /// Look up a city by name.
    pub fn city(&self, name: &str) -> Result<&City, GameError> {
        self.cities.by_name(name)
    }

    /// Resolve a city name to its id.
    pub fn city_id(&self, name: &str) -> Result<CityId, GameError> {
        self.cities.id_of(name)
    }

    #[must_use]
    pub fn diseases(&self) -> &DiseaseRegistry {
        &self.diseases
    }

    #[must_use]
    pub fn disease(&self, colour: Colour) -> Option<&Disease> {
        self.diseases.get(colour)
    }

    #[must_use]
    pub fn player_deck(&self) -> &Deck {
        &self.player_deck
    }

    #[must_use]
    pub fn infect_deck(&self) -> &Deck {
        &self.infect_deck
    }

    #[must_use]
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    #[must_use]
    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(id.index())
    }

    /// Resolve a character name to its id.
    pub fn character_id(&self, name: &str) -> Result<CharacterId, GameError> {
        self.characters
            .iter()
            .position(|c| c.name == name)
            .map(|i| CharacterId::new(i as u8))
            .ok_or_else(|| GameError::UnknownCharacter(name.to_string()))
    }

    /// The character whose turn it is.
    #[must_use]
    pub fn active_character(&self) -> CharacterId {
        self.active
    }

    #[must_use]
    pub fn epidemic_count(&self) -> u32 {
        self.epidemic_count
    }

    #[must_use]
    pub fn outbreak_count(&self) -> u32 {
        self.outbreak_count
    }

    /// Infect cards drawn per infect phase at the current epidemic count.
    #[must_use]
    pub fn infection_rate(&self) -> u32 {
        self.infection_rate
    }

    #[must_use]
    pub fn starting_epidemics(&self) -> u32 {
        self.starting_epidemics
    }

    #[must_use]
    pub fn skip_infect_phase(&self) -> bool {
        self.skip_infect_phase
    }

    /// Events recorded since the last `take_events`.
    #[must_use]
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Drain the recorded events, oldest first.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.events.take()
    }

    /// Checkpoint of the random stream.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Rewind or fast-forward the random stream to a checkpoint.
    ///
    /// Every shuffle after this call replays exactly as it did after
    /// `rng_state` returned `state`.
    pub fn restore_rng(&mut self, state: &GameRngState) {
        self.rng = GameRng::from_state(state);
    }

    // === Predicates ===

    /// Check whether every disease in play is cured.
    #[must_use]
    pub fn all_diseases_cured(&self) -> bool {
        self.diseases.all_cured()
    }

    /// Check whether the cards are non-empty and share one colour.
    ///
    /// Colourless cards never match.
    pub fn all_one_colour<'a>(cards: impl IntoIterator<Item = &'a Card>) -> bool {
        let mut colours = cards.into_iter().map(|c| c.colour);
        match colours.next() {
            Some(Some(first)) => colours.all(|c| c == Some(first)),
            _ => false,
        }
    }

    /// Check whether a colour is cured and gone from the board.
    #[must_use]
    pub fn is_eradicated(&self, colour: Colour) -> bool {
        self.diseases.get(colour).is_some_and(Disease::is_eradicated)
    }

    /// Check whether a character holds more cards than the hand limit.
    ///
    /// The engine never discards on its own; drivers resolve this with
    /// `discard_card`.
    #[must_use]
    pub fn discard_required(&self, who: CharacterId) -> bool {
        self.character(who)
            .is_some_and(|c| c.over_hand_limit(self.settings.hand_limit))
    }

    /// Discard a card from a hand without spending an action.
    pub fn discard_card(&mut self, who: CharacterId, card_name: &str) -> Result<(), GameError> {
        let character = self
            .characters
            .get_mut(who.index())
            .ok_or_else(|| GameError::UnknownCharacter(who.to_string()))?;
        character.get_card(card_name)?;
        if let Some(card) = character.take_card(card_name) {
            let name = character.name.clone();
            self.player_deck.add_discard(card);
            self.emit(GameEvent::new(name, "discarded").with_object(card_name));
        }
        Ok(())
    }

    // === Internal helpers ===

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Give a card to a character's hand.
    pub(crate) fn give_card(&mut self, who: CharacterId, card: Card) {
        let Some(character) = self.characters.get_mut(who.index()) else {
            return;
        };
        let event = GameEvent::new(character.name.clone(), "received")
            .with_object(card.name.clone())
            .with_severity(Severity::Debug);
        character.add_card(card);
        self.emit(event);
    }

    /// The city and colour an infect card names.
    pub(crate) fn card_city(&self, card: &Card) -> Option<(CityId, Colour)> {
        let city = self.cities.id_of(&card.name).ok()?;
        Some((city, card.colour?))
    }

    /// Turn an internal step result into a `Progress`, ending the game if needed.
    pub(crate) fn settle(&mut self, flow: Flow) -> Progress {
        self.outbreak_stack.clear();
        match flow {
            Ok(()) => Progress::Continue,
            Err(over) => self.finish(over),
        }
    }

    /// Move to a terminal stage.
    pub(crate) fn finish(&mut self, over: GameOver) -> Progress {
        self.stage = over.stage();
        self.outbreak_stack.clear();
        let event = match over {
            GameOver::Won => GameEvent::new("Players", "won the game"),
            GameOver::Lost(reason) => {
                GameEvent::new("Players", "lost the game:").with_object(reason.to_string())
            }
        };
        self.emit(event.with_severity(Severity::Critical));
        self.stage.progress()
    }
}

/// Builder for a game with characters, already set up.
#[derive(Clone, Debug, Default)]
pub struct GameBuilder {
    settings: GameSettings,
    seed: u64,
    characters: Vec<String>,
}

impl GameBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn settings(mut self, settings: GameSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn character(mut self, name: impl Into<String>) -> Self {
        self.characters.push(name.into());
        self
    }

    /// Create the game, add the characters and run `setup_game`.
    pub fn build(self) -> Result<Game, GameError> {
        let mut game = Game::new(self.settings, self.seed)?;
        for name in self.characters {
            game.add_character(name)?;
        }
        game.setup_game()?;
        Ok(game)
    }

    /// Build and start the game.
    ///
    /// Check `Game::stage` afterwards: the initial infection may already have
    /// ended it.
    pub fn start(self) -> Result<Game, GameError> {
        let mut game = self.build()?;
        game.start_game()?;
        Ok(game)
    }
}
