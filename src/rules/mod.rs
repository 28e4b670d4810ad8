//! The rule engine: game lifecycle, phases and character verbs.
//!
//! `Game` is split across files by concern:
//! - `game`: construction, setup, start, turns, accessors
//! - `infection`: infect/outbreak/epidemic and the draw and infect phases
//! - `actions`: the `check_x` / `x` verb pairs, `Action`, `perform`
//!
//! Phase calls return `Progress`; a won or lost game stays in its terminal
//! `Stage` and every later verb fails its check.

pub mod outcome;
pub mod game;
pub mod infection;
pub mod actions;

pub use outcome::{LossReason, Progress, Stage};
pub use game::{Game, GameBuilder};
pub use actions::{Action, CARDS_TO_CURE};
