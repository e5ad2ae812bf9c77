//! Event sinks.
//!
//! The engine pushes events into an `EventSink` handed to it through the
//! match context. `EventLog` keeps them in a persistent vector that can be
//! replayed as often as needed; `NullSink` drops them.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::event::MatchEvent;

/// Receiver for match events.
pub trait EventSink {
    fn emit(&mut self, event: MatchEvent);

    /// Whether events are kept at all. The engine skips building events
    /// for sinks that return false.
    fn enabled(&self) -> bool {
        true
    }
}

impl EventSink for Vec<MatchEvent> {
    fn emit(&mut self, event: MatchEvent) {
        self.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: MatchEvent) {
        (**self).emit(event);
    }

    fn enabled(&self) -> bool {
        (**self).enabled()
    }
}

/// Sink that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: MatchEvent) {}

    fn enabled(&self) -> bool {
        false
    }
}

/// Recorded play-by-play of a match.
///
/// Uses `im::Vector`, so cloning a log (e.g. to hand a snapshot to a
/// writer while the match goes on) is O(1).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vector<MatchEvent>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterate over the events in order. Can be called any number of times.
    pub fn iter(&self) -> impl Iterator<Item = &MatchEvent> {
        self.events.iter()
    }

    /// Events of one round.
    pub fn round(&self, round: u32) -> impl Iterator<Item = &MatchEvent> {
        self.events.iter().filter(move |e| e.round() == Some(round))
    }

    /// Narration lines, rendered lazily.
    pub fn narrate(&self) -> impl Iterator<Item = String> + '_ {
        self.events.iter().map(ToString::to_string)
    }

    /// Last recorded event.
    #[must_use]
    pub fn last(&self) -> Option<&MatchEvent> {
        self.events.last()
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: MatchEvent) {
        self.events.push_back(event);
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a MatchEvent;
    type IntoIter = im::vector::Iter<'a, MatchEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
