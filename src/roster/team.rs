//! Teams and the validated two-team roster.
//!
//! A `Roster` can only be built through validation, so everything
//! downstream may assume exactly two named teams with every role filled.
//!
//! Validation also bounds every modifier to `MODIFIER_LIMIT`, so no sum the
//! engine forms can overflow, and requires each seeker to reach at least
//! `MIN_SEEKER_RATING`, so every match can end.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::player::{PlayerRecord, Role, SeekerRecord};
use crate::actions::{FAILED_SEEK_PENALTY, SEARCH_PROGRESS_ROLL};
use crate::core::{RosterError, Side, SideMap};
use crate::engine::Weather;

/// Largest magnitude accepted for `base`, `mod`, `temp` and `streak`.
pub const MODIFIER_LIMIT: i32 = 100;

/// Lowest `base + mod` a seeker may have.
///
/// A double six in severe weather, straight after a failed search, must
/// still make progress; otherwise the streak can never build.
pub const MIN_SEEKER_RATING: i32 = SEARCH_PROGRESS_ROLL - 12 - Weather::Severe.modifier() + FAILED_SEEK_PENALTY;

fn in_range(value: i32) -> bool {
    (-MODIFIER_LIMIT..=MODIFIER_LIMIT).contains(&value)
}

/// A full team.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub chasers: Vec<PlayerRecord>,
    pub beaters: Vec<PlayerRecord>,
    pub keeper: PlayerRecord,
    pub seeker: SeekerRecord,
}

impl Team {
    /// Create a team.
    pub fn new(
        name: impl Into<String>,
        chasers: Vec<PlayerRecord>,
        beaters: Vec<PlayerRecord>,
        keeper: PlayerRecord,
        seeker: impl Into<SeekerRecord>,
    ) -> Self {
        Self {
            name: name.into(),
            chasers,
            beaters,
            keeper,
            seeker: seeker.into(),
        }
    }

    /// Players of a rotating role.
    ///
    /// Keeper and seeker are single players and have no list.
    #[must_use]
    pub fn lineup(&self, role: Role) -> &[PlayerRecord] {
        match role {
            Role::Chaser => &self.chasers,
            Role::Beater => &self.beaters,
            Role::Keeper | Role::Seeker => &[],
        }
    }

    /// Every player with its role and label, in turn order.
    pub fn players(&self) -> impl Iterator<Item = (Role, &PlayerRecord, String)> + '_ {
        Role::TURN_ORDER.into_iter().flat_map(move |role| {
            let players: Vec<(Role, &PlayerRecord, String)> = match role {
                Role::Chaser | Role::Beater => self
                    .lineup(role)
                    .iter()
                    .enumerate()
                    .map(|(i, player)| (role, player, player.label(role, i)))
                    .collect(),
                Role::Keeper => vec![(role, &self.keeper, self.keeper.label(role, 0))],
                Role::Seeker => vec![(role, &self.seeker.player, self.seeker.label())],
            };
            players
        })
    }

    fn validate(&self, index: usize) -> Result<(), RosterError> {
        if self.name.trim().is_empty() {
            return Err(RosterError::EmptyTeamName { index });
        }
        for role in [Role::Chaser, Role::Beater] {
            if self.lineup(role).is_empty() {
                return Err(RosterError::EmptyRole {
                    team: self.name.clone(),
                    role,
                });
            }
        }

        // History is keyed by label, so labels must be unique
        let mut labels = FxHashSet::default();
        for (role, player, label) in self.players() {
            let streak = if role == Role::Seeker { self.seeker.streak } else { 0 };
            if ![player.base, player.modifier, player.temp, streak].into_iter().all(in_range) {
                return Err(RosterError::ModifierOutOfRange {
                    team: self.name.clone(),
                    role,
                    player: label,
                });
            }
            if !labels.insert(label.clone()) {
                return Err(RosterError::DuplicatePlayer {
                    team: self.name.clone(),
                    player: label,
                });
            }
        }

        let rating = self.seeker.player.base + self.seeker.player.modifier;
        if rating < MIN_SEEKER_RATING {
            return Err(RosterError::HopelessSeeker {
                team: self.name.clone(),
                rating,
            });
        }
        Ok(())
    }
}

/// Team entry as it appears in a roster file.
///
/// Every role is optional here so a missing one can be reported by name
/// instead of as a generic parse failure.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TeamInput {
    #[serde(rename = "Name", alias = "name", default)]
    pub name: String,

    #[serde(rename = "Chaser", alias = "chasers", alias = "chaser")]
    pub chasers: Option<Vec<PlayerRecord>>,

    #[serde(rename = "Beater", alias = "beaters", alias = "beater")]
    pub beaters: Option<Vec<PlayerRecord>>,

    #[serde(rename = "Keeper", alias = "keeper")]
    pub keeper: Option<PlayerRecord>,

    #[serde(rename = "Seeker", alias = "seeker")]
    pub seeker: Option<SeekerRecord>,
}

impl TeamInput {
    fn into_team(self) -> Result<Team, RosterError> {
        let missing = |role| RosterError::MissingRole {
            team: self.name.clone(),
            role,
        };
        let chasers = self.chasers.ok_or_else(|| missing(Role::Chaser))?;
        let beaters = self.beaters.ok_or_else(|| missing(Role::Beater))?;
        let keeper = self.keeper.ok_or_else(|| missing(Role::Keeper))?;
        let seeker = self.seeker.ok_or_else(|| missing(Role::Seeker))?;

        Ok(Team {
            name: self.name,
            chasers,
            beaters,
            keeper,
            seeker,
        })
    }
}

/// Exactly two validated teams.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Roster {
    teams: SideMap<Team>,
}

impl Roster {
    /// Validate a list of teams.
    ///
    /// The first team plays as `Side::Home`, the second as `Side::Away`.
    pub fn new(teams: Vec<Team>) -> Result<Self, RosterError> {
        if teams.len() != 2 {
            return Err(RosterError::TeamCount { found: teams.len() });
        }
        for (index, team) in teams.iter().enumerate() {
            team.validate(index)?;
        }
        if teams[0].name == teams[1].name {
            return Err(RosterError::DuplicateTeamName {
                name: teams[0].name.clone(),
            });
        }

        let mut teams = teams.into_iter();
        match (teams.next(), teams.next()) {
            (Some(home), Some(away)) => Ok(Self {
                teams: SideMap::from_pair(home, away),
            }),
            _ => Err(RosterError::TeamCount { found: 0 }),
        }
    }

    /// Validate raw roster entries.
    pub fn from_input(entries: Vec<TeamInput>) -> Result<Self, RosterError> {
        if entries.len() != 2 {
            return Err(RosterError::TeamCount { found: entries.len() });
        }
        let teams = entries
            .into_iter()
            .map(TeamInput::into_team)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(teams)
    }

    /// Parse and validate a JSON roster (a list of two team objects).
    pub fn from_json(json: &str) -> Result<Self, RosterError> {
        let entries: Vec<TeamInput> = serde_json::from_str(json)?;
        Self::from_input(entries)
    }

    /// Get a team by side.
    #[must_use]
    pub fn team(&self, side: Side) -> &Team {
        &self.teams[side]
    }

    /// Both teams.
    #[must_use]
    pub fn teams(&self) -> &SideMap<Team> {
        &self.teams
    }

    /// Consume the roster, returning both teams.
    #[must_use]
    pub fn into_teams(self) -> SideMap<Team> {
        self.teams
    }

    /// "Home_vs_Away", for naming a match's output files.
    #[must_use]
    pub fn matchup_label(&self) -> String {
        format!("{}_vs_{}", self.teams[Side::Home].name, self.teams[Side::Away].name)
    }
}
