//! Narrative events.
//!
//! Every mutating operation records what happened as a `GameEvent`: who did
//! it, what they did, and optionally to what. The engine never formats or
//! transmits events itself; drivers drain them from the game after each call
//! and render `text()` at whatever `Severity` they care about.
//!
//! ## Severity Levels
//!
//! - `Debug`: bookkeeping (cards received, locations set at start)
//! - `Info`: player verbs and ordinary infections
//! - `Warning`: outbreaks and epidemics
//! - `Critical`: the game was won or lost

use serde::{Deserialize, Serialize};

/// How much an event matters to someone watching the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// A single narrative event.
///
/// ## Fields
///
/// - `subject`: who or what acted ("Evie", "London", "Epidemic")
/// - `action`: what happened, as a verb phrase ("moved to", "had an outbreak")
/// - `object`: what it happened to, if anything
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub subject: String,
    pub action: String,
    pub object: Option<String>,
    pub severity: Severity,
}

impl GameEvent {
    /// Create an `Info` event with no object.
    pub fn new(subject: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            action: action.into(),
            object: None,
            severity: Severity::Info,
        }
    }

    /// Set the object (builder pattern).
    #[must_use]
    pub fn with_object(mut self, object: impl Into<String>) -> Self {
        self.object = Some(object.into());
        self
    }

    /// Set the severity (builder pattern).
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// The event as one sentence.
    #[must_use]
    pub fn text(&self) -> String {
        match &self.object {
            Some(object) => format!("{} {} {}", self.subject, self.action, object),
            None => format!("{} {}", self.subject, self.action),
        }
    }

    /// The `(text, severity)` pair handed to notifiers.
    #[must_use]
    pub fn to_pair(&self) -> (String, Severity) {
        (self.text(), self.severity)
    }
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.severity, self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_builder() {
        let event = GameEvent::new("Evie", "moved to")
            .with_object("Oxford")
            .with_severity(Severity::Debug);

        assert_eq!(event.subject, "Evie");
        assert_eq!(event.object.as_deref(), Some("Oxford"));
        assert_eq!(event.severity, Severity::Debug);
        assert_eq!(event.text(), "Evie moved to Oxford");
        assert_eq!(format!("{}", event), "[debug] Evie moved to Oxford");
    }

    #[test]
    fn test_event_without_object() {
        let event = GameEvent::new("Epidemic", "struck");
        assert_eq!(event.severity, Severity::Info);
        assert_eq!(event.to_pair(), ("Epidemic struck".to_string(), Severity::Info));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Warning < Severity::Critical);
    }
}
