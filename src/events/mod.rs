//! Match events and sinks.
//!
//! The engine narrates a match as a sequence of `MatchEvent` records pushed
//! into an `EventSink`. Formatting and writing them out is up to the host.

pub mod event;
pub mod sink;

pub use event::{MatchEvent, TeamScore};
pub use sink::{EventLog, EventSink, NullSink};
