//! Player records and roles.

use serde::{Deserialize, Serialize};

/// The four positions of a team.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    Chaser,
    Beater,
    Keeper,
    Seeker,
}

impl Role {
    /// Roles in the order they act within a round.
    pub const TURN_ORDER: [Role; 4] = [Role::Chaser, Role::Beater, Role::Keeper, Role::Seeker];
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::Chaser => "Chaser",
            Role::Beater => "Beater",
            Role::Keeper => "Keeper",
            Role::Seeker => "Seeker",
        };
        f.write_str(name)
    }
}

/// Modifiers of a single player.
///
/// - `base`: fixed skill rating for the role
/// - `modifier`: standing condition adjustment (injuries, form)
/// - `temp`: transient adjustment, consumed by the player's next action
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub base: i32,

    #[serde(rename = "mod", default)]
    pub modifier: i32,

    #[serde(default)]
    pub temp: i32,

    #[serde(rename = "Name", alias = "name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl PlayerRecord {
    /// Create an unnamed player with only a base rating.
    #[must_use]
    pub fn new(base: i32) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    /// Set the player's name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the standing condition modifier.
    #[must_use]
    pub fn with_modifier(mut self, modifier: i32) -> Self {
        self.modifier = modifier;
        self
    }

    /// Set the transient modifier.
    #[must_use]
    pub fn with_temp(mut self, temp: i32) -> Self {
        self.temp = temp;
        self
    }

    /// `base + mod + temp`.
    #[must_use]
    pub fn modifier_sum(&self) -> i32 {
        self.base + self.modifier + self.temp
    }

    /// Name used in narration and history.
    ///
    /// Unnamed chasers and beaters are numbered from 1 by their position in
    /// the team list; unnamed keepers and seekers go by their role.
    #[must_use]
    pub fn label(&self, role: Role, index: usize) -> String {
        match (&self.name, role) {
            (Some(name), _) => name.clone(),
            (None, Role::Chaser | Role::Beater) => format!("{} {}", role, index + 1),
            (None, _) => role.to_string(),
        }
    }
}

/// A seeker: a player plus the streak bonus built up by consecutive
/// successful searches.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeekerRecord {
    #[serde(flatten)]
    pub player: PlayerRecord,

    #[serde(default)]
    pub streak: i32,
}

impl SeekerRecord {
    /// Create a seeker with no streak.
    #[must_use]
    pub fn new(player: PlayerRecord) -> Self {
        Self { player, streak: 0 }
    }

    /// Set the starting streak.
    #[must_use]
    pub fn with_streak(mut self, streak: i32) -> Self {
        self.streak = streak;
        self
    }

    /// `base + mod + temp + streak`.
    #[must_use]
    pub fn modifier_sum(&self) -> i32 {
        self.player.modifier_sum() + self.streak
    }

    /// Name used in narration and history.
    #[must_use]
    pub fn label(&self) -> String {
        self.player.label(Role::Seeker, 0)
    }
}

impl From<PlayerRecord> for SeekerRecord {
    fn from(player: PlayerRecord) -> Self {
        Self::new(player)
    }
}
