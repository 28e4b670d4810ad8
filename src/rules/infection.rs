//! Infection, outbreaks and epidemics.
//!
//! ## Cascade Guard
//!
//! `outbreak_stack` holds every city that has had an outbreak during the
//! current triggering draw. An infection aimed at one of those cities does
//! nothing, so a cascade visits each city at most once and always terminates.
//! The guard is cleared after each infect card settles, after an epidemic,
//! and after each direct `infect_city` / `outbreak` call.
//!
//! ## Loss Checks
//!
//! - infecting a colour whose public-health pool is already empty
//! - the outbreak counter reaching `max_outbreaks`
//! - drawing from an empty player deck

use smallvec::SmallVec;

use super::game::Game;
use super::outcome::{Flow, GameOver, LossReason, Progress, Stage};
use crate::board::MAX_INFECTION_LEVEL;
use crate::core::{CityId, Colour};
use crate::events::{GameEvent, Severity};

impl Game {
    /// Add one unit of `colour` to a city, outbreaking if it is already full.
    pub fn infect_city(&mut self, city: CityId, colour: Colour) -> Progress {
        if self.stage != Stage::Running || self.cities.get(city).is_none() {
            return self.stage.progress();
        }
        let flow = self.infect(city, colour);
        self.settle(flow)
    }

    /// Force an outbreak of `colour` from a city.
    pub fn outbreak(&mut self, city: CityId, colour: Colour) -> Progress {
        if self.stage != Stage::Running || self.cities.get(city).is_none() {
            return self.stage.progress();
        }
        let flow = self.spread_outbreak(city, colour);
        self.settle(flow)
    }

    /// Resolve an epidemic.
    ///
    /// Raises the infection rate, infects the bottom infect card's city three
    /// times, then shuffles the infect discard back on top of the draw pile.
    pub fn epidemic_phase(&mut self) -> Progress {
        if self.stage != Stage::Running {
            return self.stage.progress();
        }
        let flow = self.epidemic();
        self.settle(flow)
    }

    /// Draw the active character's player cards.
    ///
    /// An epidemic card is resolved and discarded instead of joining the hand.
    pub fn draw_phase(&mut self) -> Progress {
        if self.stage != Stage::Running {
            return self.stage.progress();
        }
        let flow = self.draw_player_cards();
        self.settle(flow)
    }

    /// Draw `infection_rate` infect cards and infect each city once.
    ///
    /// Skipped (and the skip flag cleared) after One Quiet Night.
    pub fn infect_city_phase(&mut self) -> Progress {
        if self.stage != Stage::Running {
            return self.stage.progress();
        }
        let flow = self.infect_cities();
        self.settle(flow)
    }

    pub(crate) fn infect(&mut self, city: CityId, colour: Colour) -> Flow {
        let Some(disease) = self.diseases.get(colour) else {
            return Ok(());
        };
        if disease.is_exhausted() {
            return Err(GameOver::Lost(LossReason::DiseaseExhausted(colour)));
        }
        if self.outbreak_stack.contains(&city) {
            return Ok(());
        }

        if self.cities[city].infection_level(colour) >= MAX_INFECTION_LEVEL {
            return self.spread_outbreak(city, colour);
        }

        let added = self.cities[city].increase_infection_level(colour);
        if let Some(disease) = self.diseases.get_mut(colour) {
            disease.decrease_resistance(u32::from(added));
        }
        let name = self.cities[city].name.clone();
        self.emit(GameEvent::new(name, "was infected with").with_object(colour.name()));
        Ok(())
    }

    fn spread_outbreak(&mut self, city: CityId, colour: Colour) -> Flow {
        self.outbreak_stack.insert(city);
        self.outbreak_count += 1;

        let name = self.cities[city].name.clone();
        self.emit(
            GameEvent::new(name, "had an outbreak of")
                .with_object(colour.name())
                .with_severity(Severity::Warning),
        );

        if self.outbreak_count >= self.settings.max_outbreaks {
            return Err(GameOver::Lost(LossReason::OutbreakLimit));
        }

        let neighbours: SmallVec<[CityId; 6]> = SmallVec::from_slice(self.cities.neighbours(city));
        for neighbour in neighbours {
            self.infect(neighbour, colour)?;
        }
        Ok(())
    }

    fn epidemic(&mut self) -> Flow {
        self.epidemic_count += 1;
        self.infection_rate = self.settings.infection_rate(self.epidemic_count);
        self.emit(
            GameEvent::new("Epidemic", "raised the infection rate to")
                .with_object(self.infection_rate.to_string())
                .with_severity(Severity::Warning),
        );

        if self.infect_deck.is_empty() {
            self.infect_deck.restack(&mut self.rng);
        }
        if let Some(card) = self.infect_deck.take_bottom() {
            let target = self.card_city(&card);
            self.infect_deck.add_discard(card);
            if let Some((city, colour)) = target {
                let name = self.cities[city].name.clone();
                self.emit(
                    GameEvent::new("Epidemic", "struck")
                        .with_object(name)
                        .with_severity(Severity::Warning),
                );
                for _ in 0..MAX_INFECTION_LEVEL {
                    self.infect(city, colour)?;
                }
            }
        }

        self.outbreak_stack.clear();
        self.infect_deck.restack(&mut self.rng);
        self.emit(GameEvent::new("Infect deck", "was intensified").with_severity(Severity::Debug));
        Ok(())
    }

    fn draw_player_cards(&mut self) -> Flow {
        for _ in 0..self.settings.cards_per_draw {
            let Some(card) = self.player_deck.take_top() else {
                return Err(GameOver::Lost(LossReason::PlayerDeckExhausted));
            };
            if card.is_epidemic() {
                self.player_deck.add_discard(card);
                self.epidemic()?;
            } else {
                self.give_card(self.active, card);
            }
        }
        Ok(())
    }

    fn infect_cities(&mut self) -> Flow {
        if self.skip_infect_phase {
            self.skip_infect_phase = false;
            self.emit(GameEvent::new("Infect phase", "was skipped"));
            return Ok(());
        }

        for _ in 0..self.infection_rate {
            if self.infect_deck.is_empty() {
                self.infect_deck.restack(&mut self.rng);
            }
            let Some(card) = self.infect_deck.take_top() else {
                break;
            };
            let target = self.card_city(&card);
            self.infect_deck.add_discard(card);
            if let Some((city, colour)) = target {
                let flow = self.infect(city, colour);
                self.outbreak_stack.clear();
                flow?;
            }
        }
        Ok(())
    }
}
