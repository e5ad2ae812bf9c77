//! Match results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::history::PlayerHistory;
use crate::actions::Outcome;
use crate::core::{Side, SideMap};
use crate::roster::Role;

/// Final record of a finished match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Team that caught the snitch.
    pub ending_team: String,
    pub round_count: u32,
    /// Final score by team name.
    pub score: BTreeMap<String, i64>,
    pub starting_team: String,
    pub weather_modifier: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_history: Option<PlayerHistory>,
}

impl MatchResult {
    /// Score of a team, if it played.
    #[must_use]
    pub fn score_of(&self, team: &str) -> Option<i64> {
        self.score.get(team).copied()
    }

    /// Pretty JSON with keys sorted at every level.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        // Going through Value sorts map keys, including the history maps
        let value = serde_json::to_value(self)?;
        serde_json::to_string_pretty(&value)
    }
}

/// One action as seen from the round report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSummary {
    pub side: Side,
    pub role: Role,
    pub player: String,
    pub roll: i32,
    pub outcome: Outcome,
}

/// What happened in one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: u32,
    /// Actions in the order they were resolved. A full round has eight.
    pub actions: SmallVec<[ActionSummary; 8]>,
    /// Side that caught the snitch this round.
    pub snitch: Option<Side>,
    /// Scores at the end of the round.
    pub scores: SideMap<i64>,
}

impl RoundReport {
    #[must_use]
    pub fn new(round: u32) -> Self {
        Self {
            round,
            actions: SmallVec::new(),
            snitch: None,
            scores: SideMap::with_value(0),
        }
    }

    /// Whether this round ended the match.
    #[must_use]
    pub fn ended_match(&self) -> bool {
        self.snitch.is_some()
    }

    /// Actions of one role, in resolution order.
    pub fn actions_of(&self, role: Role) -> impl Iterator<Item = &ActionSummary> {
        self.actions.iter().filter(move |a| a.role == role)
    }
}
