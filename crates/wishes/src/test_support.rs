//! Helpers for exercising the grammar from tests.

use crate::parser::{ParseError, ParseEvent, ParseHandler};

/// One recorded callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    /// Callback name, as returned by [`ParseEvent::name`].
    pub name: &'static str,
    /// Callback arguments rendered as strings.
    pub args: Vec<String>,
}

/// Parse handler that records every callback.
#[derive(Debug, Default)]
pub struct RecordingHandler {
    events: Vec<RecordedEvent>,
}

impl RecordingHandler {
    /// Recorded callbacks in arrival order.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Names of the recorded callbacks, skipping the given ones.
    #[must_use]
    pub fn names_without(&self, skipped: &[&str]) -> Vec<&'static str> {
        self.events
            .iter()
            .map(|event| event.name)
            .filter(|name| !skipped.contains(name))
            .collect()
    }

    /// Names of the recorded callbacks.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.names_without(&[])
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl ParseHandler for RecordingHandler {
    type Error = ParseError;

    fn handle(&mut self, event: ParseEvent<'_>) -> Result<(), Self::Error> {
        self.events.push(RecordedEvent {
            name: event.name(),
            args: event.args(),
        });
        Ok(())
    }
}
