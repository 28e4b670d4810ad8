//! Infection, outbreak and epidemic integration tests.
//!
//! Games are started normally, so the initial infection is random. Tests
//! pick a part of the board the initial infection left alone.

use pandemic_engine::{
    CityId, Colour, Game, GameBuilder, GameSettings, LossReason, Progress, Severity, Stage,
};

fn started(seed: u64) -> Game {
    GameBuilder::new().seed(seed).character("Evie").character("Sam").start().unwrap()
}

/// A game whose pools are too large to run out during a test.
fn roomy(seed: u64) -> Game {
    GameBuilder::new()
        .settings(GameSettings::default().with_public_health(200))
        .seed(seed)
        .character("Evie")
        .start()
        .unwrap()
}

/// A city with none of its colour on it or on any neighbour.
fn clean_city(game: &Game) -> (CityId, Colour) {
    game.cities()
        .iter()
        .find(|city| {
            city.infection_level(city.colour) == 0
                && city
                    .connections
                    .iter()
                    .all(|&n| game.cities()[n].infection_level(city.colour) == 0)
        })
        .map(|city| (city.id, city.colour))
        .expect("initial infection leaves most of the board clean")
}

fn pool_is_balanced(game: &Game) -> bool {
    game.diseases().iter().all(|d| {
        d.public_health + game.cities().total_infection(d.colour) == d.max_public_health()
    })
}

// =============================================================================
// Infect City Tests
// =============================================================================

/// Four infections from zero: level 3 and exactly one outbreak.
#[test]
fn test_four_infections_one_outbreak() {
    let mut game = started(42);
    let (city, colour) = clean_city(&game);
    let neighbours: Vec<CityId> = game.cities().neighbours(city).to_vec();

    for _ in 0..4 {
        assert_eq!(game.infect_city(city, colour), Progress::Continue);
    }

    assert_eq!(game.cities()[city].infection_level(colour), 3);
    assert_eq!(game.outbreak_count(), 1);
    for n in neighbours {
        assert_eq!(game.cities()[n].infection_level(colour), 1);
    }
    assert!(pool_is_balanced(&game));
}

/// Levels never exceed 3 however many times a city is infected.
#[test]
fn test_level_capped_at_three() {
    let mut game = roomy(8);
    let (city, colour) = clean_city(&game);

    for _ in 0..6 {
        game.infect_city(city, colour);
    }

    assert!(game
        .cities()
        .iter()
        .all(|c| Colour::ALL.iter().all(|&col| c.infection_level(col) <= 3)));
    assert_eq!(game.cities()[city].infection_level(colour), 3);
    assert_eq!(game.outbreak_count(), 3);
}

/// An outbreak is reported as a warning event.
#[test]
fn test_outbreak_event() {
    let mut game = started(11);
    let (city, colour) = clean_city(&game);
    game.take_events();

    game.outbreak(city, colour);

    let events = game.take_events();
    let outbreak = events
        .iter()
        .find(|e| e.action == "had an outbreak of")
        .expect("outbreak recorded");
    assert_eq!(outbreak.severity, Severity::Warning);
    assert_eq!(outbreak.subject, game.cities()[city].name);
    assert_eq!(outbreak.object.as_deref(), Some(colour.name()));
}

/// The eighth outbreak loses the game and freezes it.
#[test]
fn test_outbreak_limit() {
    let mut game = roomy(4);
    let (city, colour) = clean_city(&game);

    let mut progress = Progress::Continue;
    for _ in 0..8 {
        progress = game.outbreak(city, colour);
    }

    assert_eq!(progress, Progress::Lost(LossReason::OutbreakLimit));
    assert_eq!(game.stage(), Stage::Lost(LossReason::OutbreakLimit));
    assert_eq!(game.outbreak_count(), 8);

    let before = game.snapshot();
    assert_eq!(game.infect_city_phase(), progress);
    assert_eq!(game.draw_phase(), progress);
    assert_eq!(game.snapshot(), before);
}

/// A lower outbreak limit from settings is honoured.
#[test]
fn test_configured_outbreak_limit() {
    let mut settings = GameSettings::default();
    settings.max_outbreaks = 2;
    let mut game = GameBuilder::new().settings(settings).seed(6).character("Evie").start().unwrap();
    let (city, colour) = clean_city(&game);

    assert_eq!(game.outbreak(city, colour), Progress::Continue);
    assert_eq!(game.outbreak(city, colour), Progress::Lost(LossReason::OutbreakLimit));
}

// =============================================================================
// Epidemic Tests
// =============================================================================

/// An epidemic hits the bottom infect card and restacks the discard on top.
#[test]
fn test_epidemic_draws_from_bottom() {
    let mut game = started(42);
    let bottom = game.infect_deck().cards()[0].clone();
    let top_before = game.infect_deck().peek_top(1).next().unwrap().clone();
    let discard_before = game.infect_deck().discard().len();

    assert_eq!(game.epidemic_phase(), Progress::Continue);

    let city = game.city(&bottom.name).unwrap();
    assert_eq!(city.infection_level(bottom.colour.unwrap()), 3);
    assert_eq!(game.epidemic_count(), 1);
    assert!(game.infect_deck().discard().is_empty());

    // The restacked cards, including the epidemic city, now sit on top
    let restacked: Vec<String> = game
        .infect_deck()
        .peek_top(discard_before + 1)
        .map(|c| c.name.clone())
        .collect();
    assert!(restacked.contains(&bottom.name));
    assert!(!restacked.contains(&top_before.name));
    assert_eq!(game.infect_deck().len(), 40);
}

/// Infection rate rises along the schedule as epidemics resolve.
#[test]
fn test_infection_rate_schedule() {
    let mut game = roomy(12);
    assert_eq!(game.infection_rate(), 2);

    let mut rates = Vec::new();
    for _ in 0..5 {
        if game.epidemic_phase().is_over() {
            break;
        }
        rates.push(game.infection_rate());
    }
    assert_eq!(rates, vec![2, 2, 2, 3, 3]);
}

// =============================================================================
// Phase Tests
// =============================================================================

/// The infect phase draws `infection_rate` cards into the discard.
#[test]
fn test_infect_phase_draws_rate() {
    let mut game = started(21);
    let discard_before = game.infect_deck().discard().len();

    // Cards still in the draw pile name cities the initial infection missed
    assert_eq!(game.infect_city_phase(), Progress::Continue);
    assert_eq!(game.infect_deck().discard().len(), discard_before + 2);
    assert!(pool_is_balanced(&game));
}

/// The draw phase hands two cards to the active character.
#[test]
fn test_draw_phase_two_cards() {
    let mut game = started(30);
    let active = game.active_character();
    let deck_before = game.player_deck().len();

    game.draw_phase();

    let drawn = deck_before - game.player_deck().len();
    assert_eq!(drawn, 2);
    let epidemics = game.epidemic_count() as usize;
    assert_eq!(game.character(active).unwrap().hand.len(), 4 + 2 - epidemics);
}

/// Drawing through the whole player deck eventually loses.
#[test]
fn test_player_deck_exhaustion_loses() {
    let mut game = roomy(77);

    let mut progress = Progress::Continue;
    for _ in 0..40 {
        progress = game.draw_phase();
        if progress.is_over() {
            break;
        }
    }

    assert_eq!(progress, Progress::Lost(LossReason::PlayerDeckExhausted));
    assert!(game.player_deck().is_empty());
    assert_eq!(game.epidemic_count(), 4);
}
