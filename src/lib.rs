//! # quidditch-sim
//!
//! A dice-driven quidditch match simulator.
//!
//! ## Design Principles
//!
//! 1. **Reproducible**: Every roll goes through an injectable `DiceSource`.
//!    The same seed (or the same scripted rolls) gives the same match.
//!
//! 2. **Validated Once**: Rosters are checked when they are built. The engine
//!    only accepts a `Roster`, so it never meets a missing role.
//!
//! 3. **Narration Is Data**: The play-by-play is a stream of `MatchEvent`
//!    records. Writing it out is the host's job.
//!
//! ## Modules
//!
//! - `core`: Sides, dice, configuration, errors
//! - `roster`: Player records, teams, roster validation and parsing
//! - `actions`: Per-role action resolution and beater strategies
//! - `events`: Match events and sinks
//! - `engine`: Pre-game, the round loop, match results
//! - `series`: Many independent matches from one roster
//!
//! ## Example
//!
//! ```
//! use quidditch_sim::{run_match, MatchConfig, Roster};
//!
//! let roster = Roster::from_json(r#"[
//!     {"Name": "Harpies",
//!      "Chaser": [{"base": 2, "mod": 0, "temp": 0}],
//!      "Beater": [{"base": 1, "mod": 0, "temp": 0}],
//!      "Keeper": {"base": 1, "mod": 0, "temp": 0},
//!      "Seeker": {"base": 2, "mod": 0, "temp": 0, "streak": 0}},
//!     {"Name": "Falcons",
//!      "Chaser": [{"base": 1, "mod": 1, "temp": 0}],
//!      "Beater": [{"base": 2, "mod": 0, "temp": 0}],
//!      "Keeper": {"base": 2, "mod": 0, "temp": 0},
//!      "Seeker": {"base": 1, "mod": 0, "temp": 0, "streak": 0}}
//! ]"#).unwrap();
//!
//! let result = run_match(roster, MatchConfig::default().with_weather(true)).unwrap();
//! assert!(result.ending_team == "Harpies" || result.ending_team == "Falcons");
//! ```

pub mod core;
pub mod roster;
pub mod actions;
pub mod events;
pub mod engine;
pub mod series;

// Re-export commonly used types
pub use crate::core::{DiceSource, MatchConfig, MatchError, MatchRng, RosterError, ScriptedDice, Side, SideMap};

pub use crate::roster::{PlayerRecord, Role, Roster, SeekerRecord, Team, TeamInput};

pub use crate::actions::{ActionReport, BeaterStrategy, Outcome, ScoreDelta, SeekerHunter, StandardBeater};

pub use crate::events::{EventLog, EventSink, MatchEvent, NullSink};

pub use crate::engine::{
    run_match, run_match_with, MatchContext, MatchEngine, MatchPhase, MatchResult, MatchState, PlayerHistory,
    RoundReport, Weather,
};

pub use crate::series::{run_series, SeriesSummary};
