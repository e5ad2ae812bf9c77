//! Core engine types: sides, dice, configuration, errors.
//!
//! Everything here is independent of the rules of the sport; the roster,
//! action and engine modules build on top of it.

pub mod side;
pub mod rng;
pub mod config;
pub mod error;

pub use side::{Side, SideMap};
pub use rng::{DiceSource, MatchRng, RngState, ScriptedDice};
pub use config::MatchConfig;
pub use error::{MatchError, RosterError};
