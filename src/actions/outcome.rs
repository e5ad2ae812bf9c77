//! Results of a single role action.

use serde::{Deserialize, Serialize};

use crate::roster::Role;

/// How a roll turned out.
///
/// The numeric code is what per-player history records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Outcome {
    Fail,
    Partial,
    Success,
    /// Seeker only: the snitch is caught and the match ends.
    Snitch,
}

impl Outcome {
    /// History code: 0 fail, 1 partial, 2 success, 3 snitch.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Outcome::Fail => 0,
            Outcome::Partial => 1,
            Outcome::Success => 2,
            Outcome::Snitch => 3,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Outcome::Fail => "Fail",
            Outcome::Partial => "Partial Success",
            Outcome::Success => "Success",
            Outcome::Snitch => "caught the Snitch!",
        };
        f.write_str(text)
    }
}

/// Score changes produced by one action, relative to the acting side.
///
/// `own` is added to the acting side, `other` to the opposing side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreDelta {
    pub own: i64,
    pub other: i64,
}

impl ScoreDelta {
    pub const NONE: ScoreDelta = ScoreDelta { own: 0, other: 0 };

    #[must_use]
    pub const fn new(own: i64, other: i64) -> Self {
        Self { own, other }
    }
}

/// Result of a chaser, beater or keeper action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionReport {
    pub role: Role,
    pub player: String,
    /// Final roll, modifiers included.
    pub roll: i32,
    pub outcome: Outcome,
    pub delta: ScoreDelta,
    pub text: String,
}
