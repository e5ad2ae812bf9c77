//! Match engine.
//!
//! - `pregame`: weather and starting-side rolls
//! - `state`: mutable match state and its lifecycle phase
//! - `context`: the dice and event sink a match is played with
//! - `match_engine`: the round loop
//! - `result`: result record and per-round reports
//! - `history`: per-player outcome codes

pub mod pregame;
pub mod history;
pub mod state;
pub mod context;
pub mod result;
pub mod match_engine;

pub use pregame::{roll_starting_side, roll_weather, Weather};
pub use history::PlayerHistory;
pub use state::{MatchPhase, MatchState};
pub use context::MatchContext;
pub use result::{ActionSummary, MatchResult, RoundReport};
pub use match_engine::{run_match, run_match_with, MatchEngine};
