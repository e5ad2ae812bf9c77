//! Play-by-play event records.
//!
//! Events are plain data. `Display` renders the one-line narration a
//! human reads; anything machine-facing should use the fields (or serde).

use serde::{Deserialize, Serialize};

use crate::actions::{Outcome, SeekerTarget};
use crate::core::{Side, SideMap};
use crate::engine::Weather;
use crate::roster::Role;

/// A team's name and score at some point of the match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamScore {
    pub team: String,
    pub score: i64,
}

/// Something that happened during a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// Pre-game weather roll.
    Weather { roll: i32, weather: Weather },

    /// One attempt at deciding the starting side. Ties are rolled again.
    StartingRoll { home: i32, away: i32 },

    /// The starting side is settled.
    StartingSide { side: Side, team: String },

    /// A player acted.
    Action {
        round: u32,
        side: Side,
        team: String,
        role: Role,
        player: String,
        roll: i32,
        outcome: Outcome,
        text: String,
    },

    /// A house-rule beater hurt a seeker.
    SeekerTargeted {
        round: u32,
        /// Side of the beater.
        side: Side,
        target: SeekerTarget,
        penalty: i32,
    },

    /// The match-ending catch.
    SnitchCaught { round: u32, side: Side, team: String },

    /// Scores after a completed round.
    RoundSummary { round: u32, scores: SideMap<TeamScore> },

    /// Final result.
    MatchEnded {
        rounds: u32,
        team: String,
        scores: SideMap<TeamScore>,
    },
}

impl MatchEvent {
    /// Round the event belongs to. Pre-game events have none.
    #[must_use]
    pub fn round(&self) -> Option<u32> {
        match self {
            MatchEvent::Weather { .. } | MatchEvent::StartingRoll { .. } | MatchEvent::StartingSide { .. } => None,
            MatchEvent::Action { round, .. }
            | MatchEvent::SeekerTargeted { round, .. }
            | MatchEvent::SnitchCaught { round, .. }
            | MatchEvent::RoundSummary { round, .. } => Some(*round),
            MatchEvent::MatchEnded { rounds, .. } => Some(*rounds),
        }
    }
}

fn score_line(f: &mut std::fmt::Formatter<'_>, scores: &SideMap<TeamScore>) -> std::fmt::Result {
    let home = &scores[Side::Home];
    let away = &scores[Side::Away];
    write!(f, "{}: {} - {}: {}", home.team, home.score, away.team, away.score)
}

impl std::fmt::Display for MatchEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchEvent::Weather { weather, .. } => match weather {
                Weather::Severe => write!(f, "Really bad weather conditions"),
                Weather::Poor => write!(f, "Bad weather conditions"),
                Weather::Fair => write!(f, "Good weather conditions"),
            },
            MatchEvent::StartingRoll { home, away } => {
                write!(f, "Starting roll: Home Team {} - Guest Team {}", home, away)
            }
            MatchEvent::StartingSide { side, team } => write!(f, "the {} Team ({}) starts", side, team),
            MatchEvent::Action { team, text, .. } => write!(f, "{}: {}", team, text),
            MatchEvent::SeekerTargeted { side, target, penalty, .. } => {
                let victim = match target {
                    SeekerTarget::Enemy => side.opponent(),
                    SeekerTarget::Own => *side,
                };
                write!(f, "the {} Team seeker takes {} to their next search", victim, penalty)
            }
            MatchEvent::SnitchCaught { team, .. } => write!(f, "{} caught the Snitch!", team),
            MatchEvent::RoundSummary { round, scores } => {
                write!(f, "Round {} Score Summary: ", round)?;
                score_line(f, scores)
            }
            MatchEvent::MatchEnded { team, scores, .. } => {
                write!(f, "{} ended the Game! Final score: ", team)?;
                score_line(f, scores)
            }
        }
    }
}
