//! Ordered event log.

use super::event::{GameEvent, Severity};

/// Events recorded since the driver last drained the log.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Remove and return every recorded event, oldest first.
    pub fn take(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    /// Events at or above `min`.
    pub fn at_least(&self, min: Severity) -> impl Iterator<Item = &GameEvent> {
        self.events.iter().filter(move |e| e.severity >= min)
    }

    #[must_use]
    pub fn last(&self) -> Option<&GameEvent> {
        self.events.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_drains_in_order() {
        let mut log = EventLog::new();
        log.push(GameEvent::new("London", "infected with").with_object("Blue"));
        log.push(GameEvent::new("London", "had an outbreak").with_severity(Severity::Warning));

        assert_eq!(log.len(), 2);
        assert_eq!(log.at_least(Severity::Warning).count(), 1);
        assert_eq!(log.last().unwrap().action, "had an outbreak");

        let drained = log.take();
        assert_eq!(drained[0].text(), "London infected with Blue");
        assert!(log.is_empty());
    }
}
