//! Character verbs.
//!
//! Every verb comes as a pair: `check_x(..) -> bool` is a pure precondition,
//! and `x(..) -> bool` re-checks it, applies the effect, spends one action
//! point and records events. A failed check returns `false` and changes
//! nothing. No verb succeeds outside a running game or without action points.
//!
//! | Verb               | Requires                                          |
//! |--------------------|---------------------------------------------------|
//! | `standard_move`    | destination adjacent                              |
//! | `direct_flight`    | destination's city card (discarded)               |
//! | `charter_flight`   | current city's card (discarded)                   |
//! | `shuttle_flight`   | labs at both ends                                 |
//! | `build_lab`        | current city's card (discarded), no lab yet       |
//! | `treat_disease`    | colour present here                               |
//! | `cure_disease`     | 5 same-colour city cards, at a lab, not yet cured |
//! | `share_knowledge`  | same city, either side holds its card             |
//! | `play_event`       | event card in hand and its own check passes       |
//!
//! `Action` names a verb with its arguments so drivers can dispatch through
//! `perform` and enumerate options with `legal_actions`.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::game::Game;
use super::outcome::{GameOver, Progress, Stage};
use crate::cards::{EventCard, EventTarget, FORECAST_DEPTH};
use crate::core::{Character, CharacterId, CityId, Colour};
use crate::events::GameEvent;

/// City cards of one colour needed to cure it.
pub const CARDS_TO_CURE: usize = 5;

/// A verb with its arguments, performed by some character.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    StandardMove(CityId),
    DirectFlight(CityId),
    CharterFlight(CityId),
    ShuttleFlight(CityId),
    BuildLab,
    TreatDisease(Colour),
    /// Names of the city cards to discard.
    CureDisease(Vec<String>),
    /// Trade the current city's card with another character.
    ShareKnowledge(CharacterId),
    PlayEvent { card: String, target: EventTarget },
}

impl Game {
    /// The character and their location, if they may act right now.
    fn actor(&self, who: CharacterId) -> Option<(&Character, CityId)> {
        if self.stage != Stage::Running {
            return None;
        }
        let character = self.characters.get(who.index())?;
        if character.action_count == 0 {
            return None;
        }
        Some((character, character.location?))
    }

    fn holds_city_card(character: &Character, city_name: &str) -> bool {
        character
            .hand
            .iter()
            .any(|c| c.is_city() && c.name == city_name)
    }

    fn spend_action(&mut self, who: CharacterId) {
        if let Some(character) = self.characters.get_mut(who.index()) {
            character.spend_action();
        }
    }

    /// Move a card from a hand to the player discard.
    fn discard_from_hand(&mut self, who: CharacterId, card_name: &str) {
        if let Some(card) = self.characters[who.index()].take_card(card_name) {
            self.player_deck.add_discard(card);
        }
    }

    fn relocate(&mut self, who: CharacterId, to: CityId, how: &str) {
        self.characters[who.index()].location = Some(to);
        let name = self.characters[who.index()].name.clone();
        let city = self.cities[to].name.clone();
        self.emit(GameEvent::new(name, how).with_object(city));
    }

    // === Movement ===

    #[must_use]
    pub fn check_standard_move(&self, who: CharacterId, to: CityId) -> bool {
        self.actor(who).is_some_and(|(_, at)| {
            self.cities.get(to).is_some() && self.cities.are_connected(at, to)
        })
    }

    /// Move to an adjacent city.
    pub fn standard_move(&mut self, who: CharacterId, to: CityId) -> bool {
        if !self.check_standard_move(who, to) {
            return false;
        }
        self.relocate(who, to, "moved to");
        self.spend_action(who);
        true
    }

    #[must_use]
    pub fn check_direct_flight(&self, who: CharacterId, to: CityId) -> bool {
        self.actor(who).is_some_and(|(character, at)| {
            self.cities
                .get(to)
                .is_some_and(|dest| at != to && Self::holds_city_card(character, &dest.name))
        })
    }

    /// Fly anywhere by discarding the destination's card.
    pub fn direct_flight(&mut self, who: CharacterId, to: CityId) -> bool {
        if !self.check_direct_flight(who, to) {
            return false;
        }
        let card = self.cities[to].name.clone();
        self.discard_from_hand(who, &card);
        self.relocate(who, to, "took a direct flight to");
        self.spend_action(who);
        true
    }

    #[must_use]
    pub fn check_charter_flight(&self, who: CharacterId, to: CityId) -> bool {
        self.actor(who).is_some_and(|(character, at)| {
            at != to
                && self.cities.get(to).is_some()
                && Self::holds_city_card(character, &self.cities[at].name)
        })
    }

    /// Fly anywhere by discarding the current city's card.
    pub fn charter_flight(&mut self, who: CharacterId, to: CityId) -> bool {
        if !self.check_charter_flight(who, to) {
            return false;
        }
        let Some(at) = self.characters[who.index()].location else {
            return false;
        };
        let card = self.cities[at].name.clone();
        self.discard_from_hand(who, &card);
        self.relocate(who, to, "took a charter flight to");
        self.spend_action(who);
        true
    }

    #[must_use]
    pub fn check_shuttle_flight(&self, who: CharacterId, to: CityId) -> bool {
        self.actor(who).is_some_and(|(_, at)| {
            at != to
                && self.cities[at].has_lab
                && self.cities.get(to).is_some_and(|dest| dest.has_lab)
        })
    }

    /// Fly between two labs.
    pub fn shuttle_flight(&mut self, who: CharacterId, to: CityId) -> bool {
        if !self.check_shuttle_flight(who, to) {
            return false;
        }
        self.relocate(who, to, "took a shuttle flight to");
        self.spend_action(who);
        true
    }

    // === Board actions ===

    #[must_use]
    pub fn check_build_lab(&self, who: CharacterId) -> bool {
        self.actor(who).is_some_and(|(character, at)| {
            let city = &self.cities[at];
            !city.has_lab && Self::holds_city_card(character, &city.name)
        })
    }

    /// Build a lab here by discarding this city's card.
    pub fn build_lab(&mut self, who: CharacterId) -> bool {
        if !self.check_build_lab(who) {
            return false;
        }
        let Some(at) = self.characters[who.index()].location else {
            return false;
        };
        let city = self.cities[at].name.clone();
        self.discard_from_hand(who, &city);
        self.cities[at].build_lab();
        let name = self.characters[who.index()].name.clone();
        self.emit(GameEvent::new(name, "built a lab in").with_object(city));
        self.spend_action(who);
        true
    }

    #[must_use]
    pub fn check_treat_disease(&self, who: CharacterId, colour: Colour) -> bool {
        self.actor(who)
            .is_some_and(|(_, at)| self.cities[at].infection_level(colour) > 0)
    }

    /// Remove one unit of `colour` here, or every unit if the colour is cured.
    ///
    /// Whatever is removed goes back to the public-health pool.
    pub fn treat_disease(&mut self, who: CharacterId, colour: Colour) -> bool {
        if !self.check_treat_disease(who, colour) {
            return false;
        }
        let Some(at) = self.characters[who.index()].location else {
            return false;
        };
        let removed = if self.diseases.is_cured(colour) {
            self.cities[at].nullify_infection_level(colour)
        } else {
            self.cities[at].decrease_infection_level(colour)
        };
        if let Some(disease) = self.diseases.get_mut(colour) {
            disease.increase_resistance(u32::from(removed));
        }
        let name = self.characters[who.index()].name.clone();
        let city = self.cities[at].name.clone();
        self.emit(
            GameEvent::new(name, format!("treated {} {} in", removed, colour)).with_object(city),
        );
        self.spend_action(who);
        true
    }

    /// The colour these cards would cure, if the cure is allowed.
    fn cure_colour<S: AsRef<str>>(&self, who: CharacterId, cards: &[S]) -> Option<Colour> {
        let (character, at) = self.actor(who)?;
        if !self.cities[at].has_lab || cards.len() != CARDS_TO_CURE {
            return None;
        }

        let mut names = FxHashSet::default();
        let mut held = Vec::with_capacity(CARDS_TO_CURE);
        for name in cards {
            let name: &str = name.as_ref();
            if !names.insert(name) {
                return None;
            }
            held.push(character.hand.iter().find(|c| c.is_city() && c.name == name)?);
        }
        if !Self::all_one_colour(held.iter().copied()) {
            return None;
        }

        let colour = held.first()?.colour?;
        let disease = self.diseases.get(colour)?;
        (!disease.cured).then_some(colour)
    }

    #[must_use]
    pub fn check_cure_disease<S: AsRef<str>>(&self, who: CharacterId, cards: &[S]) -> bool {
        self.cure_colour(who, cards).is_some()
    }

    /// Cure a colour by discarding five of its city cards at a lab.
    ///
    /// Curing the last colour wins the game. The action point is still spent.
    pub fn cure_disease<S: AsRef<str>>(&mut self, who: CharacterId, cards: &[S]) -> bool {
        let Some(colour) = self.cure_colour(who, cards) else {
            return false;
        };
        for card in cards {
            self.discard_from_hand(who, card.as_ref());
        }
        if let Some(disease) = self.diseases.get_mut(colour) {
            disease.cure();
        }
        let name = self.characters[who.index()].name.clone();
        self.emit(GameEvent::new(name, "cured").with_object(colour.name()));
        self.spend_action(who);

        if self.diseases.all_cured() {
            self.finish(GameOver::Won);
        }
        true
    }

    /// Who gives and who receives the current city's card.
    fn share_direction(&self, who: CharacterId, other: CharacterId) -> Option<(CharacterId, CharacterId)> {
        let (character, at) = self.actor(who)?;
        if who == other {
            return None;
        }
        let partner = self.characters.get(other.index())?;
        if !partner.is_at(at) {
            return None;
        }
        let city = &self.cities[at].name;
        if Self::holds_city_card(character, city) {
            Some((who, other))
        } else if Self::holds_city_card(partner, city) {
            Some((other, who))
        } else {
            None
        }
    }

    #[must_use]
    pub fn check_share_knowledge(&self, who: CharacterId, other: CharacterId) -> bool {
        self.share_direction(who, other).is_some()
    }

    /// Hand the current city's card to, or take it from, a character here.
    pub fn share_knowledge(&mut self, who: CharacterId, other: CharacterId) -> bool {
        let Some((giver, receiver)) = self.share_direction(who, other) else {
            return false;
        };
        let Some(at) = self.characters[who.index()].location else {
            return false;
        };
        let city = self.cities[at].name.clone();
        let Some(card) = self.characters[giver.index()].take_card(&city) else {
            return false;
        };
        self.characters[receiver.index()].add_card(card);

        let from = self.characters[giver.index()].name.clone();
        let to = self.characters[receiver.index()].name.clone();
        self.emit(GameEvent::new(from, format!("gave {} to", city)).with_object(to));
        self.spend_action(who);
        true
    }

    // === Event cards ===

    fn held_event(&self, who: CharacterId, card_name: &str) -> Option<EventCard> {
        let (character, _) = self.actor(who)?;
        character
            .hand
            .iter()
            .find(|c| c.name == card_name)
            .and_then(|c| c.as_event())
    }

    #[must_use]
    pub fn check_play_event(&self, who: CharacterId, card_name: &str, target: &EventTarget) -> bool {
        self.held_event(who, card_name)
            .is_some_and(|event| event.check_playable(self, target))
    }

    /// Play an event card from hand.
    pub fn play_event(&mut self, who: CharacterId, card_name: &str, target: &EventTarget) -> bool {
        let Some(event) = self.held_event(who, card_name) else {
            return false;
        };
        if !event.check_playable(self, target) {
            return false;
        }
        self.discard_from_hand(who, card_name);
        let name = self.characters[who.index()].name.clone();
        self.emit(GameEvent::new(name, "played").with_object(card_name));
        self.spend_action(who);
        event.on_play(self, target);
        true
    }

    // === Dispatch ===

    /// Check an action without performing it.
    #[must_use]
    pub fn check_action(&self, who: CharacterId, action: &Action) -> bool {
        match action {
            Action::StandardMove(to) => self.check_standard_move(who, *to),
            Action::DirectFlight(to) => self.check_direct_flight(who, *to),
            Action::CharterFlight(to) => self.check_charter_flight(who, *to),
            Action::ShuttleFlight(to) => self.check_shuttle_flight(who, *to),
            Action::BuildLab => self.check_build_lab(who),
            Action::TreatDisease(colour) => self.check_treat_disease(who, *colour),
            Action::CureDisease(cards) => self.check_cure_disease(who, cards),
            Action::ShareKnowledge(other) => self.check_share_knowledge(who, *other),
            Action::PlayEvent { card, target } => self.check_play_event(who, card, target),
        }
    }

    /// Perform an action.
    ///
    /// Returns `None` if it was rejected, otherwise the game's progress after
    /// it (a cure can win the game).
    pub fn perform(&mut self, who: CharacterId, action: &Action) -> Option<Progress> {
        let done = match action {
            Action::StandardMove(to) => self.standard_move(who, *to),
            Action::DirectFlight(to) => self.direct_flight(who, *to),
            Action::CharterFlight(to) => self.charter_flight(who, *to),
            Action::ShuttleFlight(to) => self.shuttle_flight(who, *to),
            Action::BuildLab => self.build_lab(who),
            Action::TreatDisease(colour) => self.treat_disease(who, *colour),
            Action::CureDisease(cards) => self.cure_disease(who, cards),
            Action::ShareKnowledge(other) => self.share_knowledge(who, *other),
            Action::PlayEvent { card, target } => self.play_event(who, card, target),
        };
        done.then(|| self.stage.progress())
    }

    /// Every action `who` could perform right now.
    ///
    /// Cures list one representative set of cards per colour (the first five
    /// by name); Forecast lists only the order that keeps the deck unchanged.
    #[must_use]
    pub fn legal_actions(&self, who: CharacterId) -> Vec<Action> {
        let Some((character, at)) = self.actor(who) else {
            return Vec::new();
        };
        let mut candidates = Vec::new();

        for &to in self.cities.neighbours(at) {
            candidates.push(Action::StandardMove(to));
        }
        for card in character.hand.iter().filter(|c| c.is_city()) {
            if let Ok(to) = self.cities.id_of(&card.name) {
                candidates.push(Action::DirectFlight(to));
            }
        }
        if Self::holds_city_card(character, &self.cities[at].name) {
            candidates.extend(self.cities.iter().map(|c| Action::CharterFlight(c.id)));
            candidates.push(Action::BuildLab);
        }
        candidates.extend(self.cities.labs().map(|c| Action::ShuttleFlight(c.id)));
        candidates.extend(self.diseases.iter().map(|d| Action::TreatDisease(d.colour)));

        for disease in self.diseases.iter() {
            let mut names: Vec<String> = character
                .hand
                .iter()
                .filter(|c| c.is_city() && c.colour == Some(disease.colour))
                .map(|c| c.name.clone())
                .collect();
            names.sort();
            names.dedup();
            if names.len() >= CARDS_TO_CURE {
                names.truncate(CARDS_TO_CURE);
                candidates.push(Action::CureDisease(names));
            }
        }

        candidates.extend(CharacterId::all(self.characters.len()).map(Action::ShareKnowledge));

        for card in &character.hand {
            if let Some(event) = card.as_event() {
                for target in self.event_targets(event) {
                    candidates.push(Action::PlayEvent {
                        card: card.name.clone(),
                        target,
                    });
                }
            }
        }

        candidates.retain(|action| self.check_action(who, action));
        candidates
    }

    /// Candidate targets for an event card.
    fn event_targets(&self, event: EventCard) -> Vec<EventTarget> {
        match event {
            EventCard::GovernmentGrant => self.cities.iter().map(|c| EventTarget::City(c.id)).collect(),
            EventCard::Airlift => CharacterId::all(self.characters.len())
                .flat_map(|character| {
                    self.cities
                        .iter()
                        .map(move |c| EventTarget::Relocate { character, city: c.id })
                })
                .collect(),
            EventCard::OneQuietNight => vec![EventTarget::None],
            EventCard::ResilientPopulation => self
                .infect_deck
                .discard()
                .iter()
                .filter_map(|card| self.cities.id_of(&card.name).ok())
                .map(EventTarget::City)
                .collect(),
            EventCard::Forecast => {
                let depth = self.infect_deck.len().min(FORECAST_DEPTH);
                vec![EventTarget::Arrange((0..depth).collect())]
            }
        }
    }
}
