//! Character verb and turn-loop integration tests.

use pandemic_engine::{
    Action, CharacterId, Colour, Game, GameBuilder, GameSettings, Progress, Stage,
};

const EVIE: CharacterId = CharacterId(0);
const SAM: CharacterId = CharacterId(1);

fn started(seed: u64) -> Game {
    GameBuilder::new().seed(seed).character("Evie").character("Sam").start().unwrap()
}

// =============================================================================
// Verb Tests
// =============================================================================

/// A failed verb changes nothing and costs nothing.
#[test]
fn test_failed_verb_is_atomic() {
    let mut game = started(42);
    let seattle = game.city_id("Seattle").unwrap();
    let before = game.snapshot();

    assert!(!game.check_standard_move(EVIE, seattle));
    assert!(!game.standard_move(EVIE, seattle));
    assert!(!game.shuttle_flight(EVIE, seattle));
    assert_eq!(game.perform(EVIE, &Action::StandardMove(seattle)), None);

    assert_eq!(game.snapshot(), before);
}

/// Each successful verb costs exactly one action point.
#[test]
fn test_each_verb_costs_one_point() {
    let mut game = started(42);
    let london = game.city_id("London").unwrap();
    let oxford = game.city_id("Oxford").unwrap();

    assert!(game.standard_move(EVIE, oxford));
    assert_eq!(game.character(EVIE).unwrap().action_count, 3);
    assert!(game.standard_move(EVIE, london));
    assert_eq!(game.character(EVIE).unwrap().action_count, 2);
}

/// Only the active character has action points.
#[test]
fn test_turns_pass_action_points() {
    let mut game = started(42);
    let oxford = game.city_id("Oxford").unwrap();

    assert!(!game.check_standard_move(SAM, oxford));
    assert_eq!(game.end_turn(), SAM);
    assert!(game.check_standard_move(SAM, oxford));
    assert!(!game.check_standard_move(EVIE, oxford));
}

/// Treating a city gives back exactly what was removed.
#[test]
fn test_treat_at_start_city() {
    let mut game = started(42);
    let london = game.city_id("London").unwrap();
    for _ in 0..2 {
        game.infect_city(london, Colour::Red);
    }
    let pool = game.disease(Colour::Red).unwrap().public_health;

    assert!(game.treat_disease(EVIE, Colour::Red));

    assert_eq!(game.cities()[london].infection_level(Colour::Red), 1);
    assert_eq!(game.disease(Colour::Red).unwrap().public_health, pool + 1);
}

/// Direct flight with a card from the opening hand.
#[test]
fn test_direct_flight_from_opening_hand() {
    let mut game = started(42);
    let card = game
        .character(EVIE)
        .unwrap()
        .hand
        .iter()
        .find(|c| c.is_city() && c.name != "London")
        .cloned()
        .expect("opening hand holds a city card");
    let dest = game.city_id(&card.name).unwrap();

    assert!(game.direct_flight(EVIE, dest));

    let evie = game.character(EVIE).unwrap();
    assert!(evie.is_at(dest));
    assert!(!evie.hand_contains(&card.name));
    assert_eq!(game.player_deck().discard().last(), Some(&card));
}

/// Unknown names are errors, not false.
#[test]
fn test_lookup_failures() {
    let game = started(42);
    assert!(game.city_id("Atlantis").is_err());
    assert!(game.character_id("Nobody").is_err());
    assert!(game.character(EVIE).unwrap().get_card("Atlantis").is_err());
    assert!("Purple".parse::<Colour>().is_err());
}

// =============================================================================
// Dispatch Tests
// =============================================================================

/// Every listed action is accepted by `perform`.
#[test]
fn test_legal_actions_all_perform() {
    for seed in 0..10 {
        let game = started(seed);
        let actions = game.legal_actions(EVIE);
        assert!(!actions.is_empty());
        for action in &actions {
            let mut copy = game.clone();
            assert_eq!(copy.perform(EVIE, action), Some(Progress::Continue), "{:?}", action);
        }
        assert!(game.legal_actions(SAM).is_empty());
    }
}

/// Actions serialize for drivers that send them over the wire.
#[test]
fn test_action_json() {
    let game = started(1);
    let oxford = game.city_id("Oxford").unwrap();
    let action = Action::StandardMove(oxford);

    let json = serde_json::to_string(&action).unwrap();
    let back: Action = serde_json::from_str(&json).unwrap();

    assert_eq!(back, action);
}

// =============================================================================
// Turn Loop Tests
// =============================================================================

/// Drive whole games with a simple greedy driver until they end.
fn play_out(seed: u64, settings: GameSettings) -> Game {
    let mut game = GameBuilder::new()
        .settings(settings)
        .seed(seed)
        .character("Evie")
        .character("Sam")
        .start()
        .unwrap();

    for _turn in 0..200 {
        if game.is_over() {
            break;
        }
        let who = game.active_character();

        while let Some(action) = preferred_action(&game, who) {
            if game.perform(who, &action).is_none() {
                panic!("listed action rejected: {:?}", action);
            }
            if game.is_over() {
                return game;
            }
        }

        if game.draw_phase().is_over() {
            break;
        }
        while game.discard_required(who) {
            let card = game.character(who).unwrap().hand[0].name.clone();
            game.discard_card(who, &card).unwrap();
        }
        if game.infect_city_phase().is_over() {
            break;
        }
        game.end_turn();
    }
    game
}

/// Cure if possible, then treat, then the first listed action.
fn preferred_action(game: &Game, who: CharacterId) -> Option<Action> {
    let actions = game.legal_actions(who);
    actions
        .iter()
        .find(|a| matches!(a, Action::CureDisease(_)))
        .or_else(|| actions.iter().find(|a| matches!(a, Action::TreatDisease(_))))
        .or_else(|| actions.first())
        .cloned()
}

/// Games always end, and end in a terminal stage.
#[test]
fn test_games_terminate() {
    for seed in 0..5 {
        let game = play_out(seed, GameSettings::default());
        assert!(game.is_over(), "seed {} did not finish", seed);
        assert!(matches!(game.stage(), Stage::Won | Stage::Lost(_)));
        assert!(game.outbreak_count() <= game.settings().max_outbreaks);
    }
}

/// A replayed game ends in exactly the same state.
#[test]
fn test_turn_loop_is_deterministic() {
    let a = play_out(17, GameSettings::default());
    let b = play_out(17, GameSettings::default());
    assert_eq!(a.snapshot(), b.snapshot());
}
