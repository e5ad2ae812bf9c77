//! Error types.

use thiserror::Error;

use crate::roster::{Role, MIN_SEEKER_RATING, MODIFIER_LIMIT};

/// A roster that cannot be played.
///
/// Always reported before any round runs; no partial results exist.
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("a match needs exactly 2 teams, found {found}")]
    TeamCount { found: usize },

    #[error("team {index} has no name")]
    EmptyTeamName { index: usize },

    #[error("both teams are called {name:?}")]
    DuplicateTeamName { name: String },

    #[error("team {team:?} is missing its {role}")]
    MissingRole { team: String, role: Role },

    #[error("team {team:?} has no {role}s")]
    EmptyRole { team: String, role: Role },

    #[error("team {team:?}: {role} {player:?} has a modifier outside -{limit}..={limit}", limit = MODIFIER_LIMIT)]
    ModifierOutOfRange { team: String, role: Role, player: String },

    #[error("team {team:?} has two players called {player:?}")]
    DuplicatePlayer { team: String, player: String },

    #[error("team {team:?}: seeker rating {rating} is below {min} and can never catch the snitch", min = MIN_SEEKER_RATING)]
    HopelessSeeker { team: String, rating: i32 },

    #[error("roster is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised by the match engine.
#[derive(Error, Debug)]
pub enum MatchError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error("the match is already finished")]
    AlreadyFinished,

    #[error("the match has not finished yet")]
    NotFinished,
}
