//! The match context: dice and event sink.
//!
//! Everything a match needs from the outside world is passed in here, so
//! nothing in the engine reaches for process-wide state.

use crate::core::{DiceSource, MatchRng};
use crate::events::{EventLog, EventSink, MatchEvent};

/// Dice and event sink for one match.
#[derive(Clone, Debug)]
pub struct MatchContext<D, S> {
    pub dice: D,
    pub events: S,
}

impl MatchContext<MatchRng, EventLog> {
    /// Seeded dice and an in-memory event log.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(MatchRng::new(seed), EventLog::new())
    }
}

impl<D: DiceSource, S: EventSink> MatchContext<D, S> {
    pub fn new(dice: D, events: S) -> Self {
        Self { dice, events }
    }

    /// Emit an event, building it only if the sink keeps events.
    pub fn emit_with(&mut self, build: impl FnOnce() -> MatchEvent) {
        if self.events.enabled() {
            self.events.emit(build());
        }
    }
}
