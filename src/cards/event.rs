//! Event cards: special player cards with their own effect hooks.
//!
//! An event card sits in a hand like any other card. Playing it costs one
//! action and runs the card's own hook against the game. Each card reads its
//! arguments from an `EventTarget`.
//!
//! ## Hooks
//!
//! - `check_playable(game, target)`: pure precondition
//! - `on_play(game, target)`: the effect, only called after a passing check

use serde::{Deserialize, Serialize};

use crate::core::{CharacterId, CityId};
use crate::events::{GameEvent, Severity};
use crate::rules::Game;

/// How many infect cards Forecast may rearrange.
pub const FORECAST_DEPTH: usize = 6;

/// The special events that can be shuffled into the player deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCard {
    /// Build a lab in any city.
    GovernmentGrant,
    /// Move any character to any city.
    Airlift,
    /// Skip the next infect phase.
    OneQuietNight,
    /// Remove one card in the infect discard from the game.
    ResilientPopulation,
    /// Look at the top infect cards and put them back in any order.
    Forecast,
}

/// Arguments for an event card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventTarget {
    None,
    City(CityId),
    Relocate { character: CharacterId, city: CityId },
    /// New top-first order of the top infect cards, as positions.
    Arrange(Vec<usize>),
}

impl EventCard {
    pub const ALL: [EventCard; 5] = [
        EventCard::GovernmentGrant,
        EventCard::Airlift,
        EventCard::OneQuietNight,
        EventCard::ResilientPopulation,
        EventCard::Forecast,
    ];

    /// Card name as it appears in a hand.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EventCard::GovernmentGrant => "Government Grant",
            EventCard::Airlift => "Airlift",
            EventCard::OneQuietNight => "One Quiet Night",
            EventCard::ResilientPopulation => "Resilient Population",
            EventCard::Forecast => "Forecast",
        }
    }

    /// Check whether this card can be played with `target` right now.
    #[must_use]
    pub fn check_playable(self, game: &Game, target: &EventTarget) -> bool {
        match (self, target) {
            (EventCard::GovernmentGrant, EventTarget::City(city)) => {
                game.cities.get(*city).is_some_and(|c| !c.has_lab)
            }
            (EventCard::Airlift, EventTarget::Relocate { character, city }) => {
                game.cities.get(*city).is_some()
                    && game
                        .characters
                        .get(character.index())
                        .is_some_and(|c| !c.is_at(*city))
            }
            (EventCard::OneQuietNight, EventTarget::None) => !game.skip_infect_phase,
            (EventCard::ResilientPopulation, EventTarget::City(city)) => {
                game.cities.get(*city).is_some_and(|c| {
                    game.infect_deck.discard().iter().any(|card| card.name == c.name)
                })
            }
            (EventCard::Forecast, EventTarget::Arrange(order)) => {
                order.len() == game.infect_deck.len().min(FORECAST_DEPTH)
                    && super::deck::is_permutation(order)
            }
            _ => false,
        }
    }

    /// Apply the card's effect.
    ///
    /// Callers run `check_playable` first; an invalid target is a no-op.
    pub(crate) fn on_play(self, game: &mut Game, target: &EventTarget) {
        match (self, target) {
            (EventCard::GovernmentGrant, EventTarget::City(city)) => {
                game.cities[*city].build_lab();
                let name = game.cities[*city].name.clone();
                game.emit(GameEvent::new(self.name(), "built a lab in").with_object(name));
            }
            (EventCard::Airlift, EventTarget::Relocate { character, city }) => {
                let name = game.cities[*city].name.clone();
                if let Some(moved) = game.characters.get_mut(character.index()) {
                    moved.location = Some(*city);
                    let who = moved.name.clone();
                    game.emit(GameEvent::new(who, "was airlifted to").with_object(name));
                }
            }
            (EventCard::OneQuietNight, EventTarget::None) => {
                game.skip_infect_phase = true;
                game.emit(GameEvent::new(self.name(), "will skip the next infect phase"));
            }
            (EventCard::ResilientPopulation, EventTarget::City(city)) => {
                let name = game.cities[*city].name.clone();
                if game.infect_deck.remove_from_discard(&name).is_some() {
                    game.emit(
                        GameEvent::new(self.name(), "removed from the infect discard")
                            .with_object(name),
                    );
                }
            }
            (EventCard::Forecast, EventTarget::Arrange(order)) => {
                if game.infect_deck.arrange_top(order) {
                    game.emit(
                        GameEvent::new(self.name(), "rearranged the top infect cards")
                            .with_severity(Severity::Debug),
                    );
                }
            }
            _ => {}
        }
    }
}

impl std::fmt::Display for EventCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
