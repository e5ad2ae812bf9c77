//! Mutable match state.

use serde::{Deserialize, Serialize};

use super::history::PlayerHistory;
use super::pregame::Weather;
use crate::core::{Side, SideMap};
use crate::roster::{Roster, Team};

/// Where a match is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchPhase {
    #[default]
    NotStarted,
    PreGame,
    InProgress,
    Finished,
}

/// Everything that changes while a match is played.
///
/// Owned by the engine; read it through `MatchEngine::state`.
#[derive(Clone, Debug, Serialize)]
pub struct MatchState {
    pub phase: MatchPhase,

    /// The match's own copy of the roster. Modifiers change as the match goes.
    pub teams: SideMap<Team>,

    pub score: SideMap<i64>,

    /// Completed rounds.
    pub round_count: u32,

    pub weather: Weather,

    pub starting_side: Side,

    /// Next chaser / beater per side (duplicate-role mode only).
    pub chaser_rotation: SideMap<usize>,
    pub beater_rotation: SideMap<usize>,

    /// House-rule seeker-targeting counter per side.
    pub escalation: SideMap<i32>,

    pub snitch_caught: bool,

    pub ending_side: Option<Side>,

    /// Present when metadata collection is on.
    pub history: Option<PlayerHistory>,
}

impl MatchState {
    /// Fresh state for a roster.
    #[must_use]
    pub fn new(roster: Roster, collect_metadata: bool) -> Self {
        let teams = roster.into_teams();
        let history = collect_metadata.then(|| PlayerHistory::for_teams(&teams));

        Self {
            phase: MatchPhase::NotStarted,
            teams,
            score: SideMap::with_value(0),
            round_count: 0,
            weather: Weather::Fair,
            starting_side: Side::Home,
            chaser_rotation: SideMap::with_value(0),
            beater_rotation: SideMap::with_value(0),
            escalation: SideMap::with_value(0),
            snitch_caught: false,
            ending_side: None,
            history,
        }
    }

    /// Weather modifier in effect.
    #[must_use]
    pub fn weather_modifier(&self) -> i32 {
        self.weather.modifier()
    }

    /// Team name for a side.
    #[must_use]
    pub fn team_name(&self, side: Side) -> &str {
        &self.teams[side].name
    }

    /// Apply an action's score changes for the acting side.
    pub fn apply_delta(&mut self, side: Side, own: i64, other: i64) {
        self.score[side] += own;
        self.score[side.opponent()] += other;
    }

    /// Floor both scores at 0.
    pub fn clamp_scores(&mut self) {
        for (_, score) in self.score.iter_mut() {
            *score = (*score).max(0);
        }
    }

    /// Record an outcome if history is being collected.
    pub fn record_outcome(&mut self, side: Side, player: &str, outcome: crate::actions::Outcome) {
        if let Some(history) = self.history.as_mut() {
            history.record(&self.teams[side].name, player, outcome);
        }
    }
}
