//! Structured narrative events emitted by the engine.
//!
//! ## Key Types
//!
//! - `GameEvent`: subject, action, optional object and `Severity`
//! - `EventLog`: ordered buffer the game appends to and drivers drain

pub mod event;
pub mod log;

pub use event::{GameEvent, Severity};
pub use log::EventLog;
