//! Action resolution.
//!
//! One resolver per role. Each takes a player record, the weather and the
//! dice, and returns what happened without touching match state:
//! - `resolve_chaser`, `resolve_beater`, `resolve_keeper`: score changes
//! - `resolve_seeker`: streak updates or the snitch
//!
//! Beater turns go through a `BeaterStrategy` so the house rules can swap
//! in a different action for that role only.

pub mod outcome;
pub mod role;
pub mod beater;

pub use outcome::{ActionReport, Outcome, ScoreDelta};
pub use role::{
    resolve_beater, resolve_chaser, resolve_keeper, resolve_seeker, Beater, Chaser, Keeper, RoleAction, Seeker,
    SeekerEffect, SeekerReport, Tier, FAILED_SEEK_PENALTY, SEARCH_PROGRESS_ROLL, SNITCH_BONUS,
};
pub use beater::{
    next_escalation, seeker_vulnerability, BeaterPlay, BeaterStrategy, BeaterTurn, SeekerHit, SeekerHunt,
    SeekerHunter, SeekerTarget, StandardBeater, SEEKER_TARGET_THRESHOLD,
};
