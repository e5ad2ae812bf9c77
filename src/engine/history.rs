//! Per-player outcome history.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::actions::Outcome;
use crate::core::SideMap;
use crate::roster::{Role, Team};

/// Outcome codes per player per team: team name -> player name -> codes.
///
/// Players are keyed by their narration label, so two unnamed chasers are
/// "Chaser 1" and "Chaser 2".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerHistory {
    teams: FxHashMap<String, FxHashMap<String, Vec<u8>>>,
}

impl PlayerHistory {
    /// Empty history with an entry for every player of both teams.
    #[must_use]
    pub fn for_teams(teams: &SideMap<Team>) -> Self {
        let mut history = Self::default();
        for (_, team) in teams.iter() {
            let players = history.teams.entry(team.name.clone()).or_default();
            for (index, chaser) in team.chasers.iter().enumerate() {
                players.entry(chaser.label(Role::Chaser, index)).or_default();
            }
            for (index, beater) in team.beaters.iter().enumerate() {
                players.entry(beater.label(Role::Beater, index)).or_default();
            }
            players.entry(team.keeper.label(Role::Keeper, 0)).or_default();
            players.entry(team.seeker.label()).or_default();
        }
        history
    }

    /// Append an outcome to a player's history.
    pub fn record(&mut self, team: &str, player: &str, outcome: Outcome) {
        self.teams
            .entry(team.to_string())
            .or_default()
            .entry(player.to_string())
            .or_default()
            .push(outcome.code());
    }

    /// Codes recorded for a player.
    #[must_use]
    pub fn get(&self, team: &str, player: &str) -> Option<&[u8]> {
        self.teams.get(team)?.get(player).map(Vec::as_slice)
    }

    /// All players of a team.
    #[must_use]
    pub fn team(&self, team: &str) -> Option<&FxHashMap<String, Vec<u8>>> {
        self.teams.get(team)
    }

    /// Total number of recorded actions.
    #[must_use]
    pub fn total_actions(&self) -> usize {
        self.teams.values().flat_map(|players| players.values()).map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::PlayerRecord;

    fn teams() -> SideMap<Team> {
        let team = |name: &str| {
            Team::new(
                name,
                vec![PlayerRecord::new(1).named("Ginny"), PlayerRecord::new(1)],
                vec![PlayerRecord::new(1)],
                PlayerRecord::new(1),
                PlayerRecord::new(1).named("Harry"),
            )
        };
        SideMap::from_pair(team("Lions"), team("Snakes"))
    }

    #[test]
    fn test_every_player_has_an_entry() {
        let history = PlayerHistory::for_teams(&teams());

        let lions = history.team("Lions").unwrap();
        assert_eq!(lions.len(), 5);
        assert!(lions.contains_key("Ginny"));
        assert!(lions.contains_key("Chaser 2"));
        assert!(lions.contains_key("Beater 1"));
        assert!(lions.contains_key("Keeper"));
        assert!(lions.contains_key("Harry"));
        assert_eq!(history.total_actions(), 0);
    }

    #[test]
    fn test_record() {
        let mut history = PlayerHistory::for_teams(&teams());

        history.record("Lions", "Harry", Outcome::Partial);
        history.record("Lions", "Harry", Outcome::Snitch);
        history.record("Snakes", "Keeper", Outcome::Fail);

        assert_eq!(history.get("Lions", "Harry"), Some(&[1u8, 3][..]));
        assert_eq!(history.get("Snakes", "Keeper"), Some(&[0u8][..]));
        assert_eq!(history.get("Snakes", "Nobody"), None);
        assert_eq!(history.total_actions(), 3);
    }

    #[test]
    fn test_serializes_as_nested_map() {
        let mut history = PlayerHistory::default();
        history.record("Lions", "Harry", Outcome::Success);

        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(json["Lions"]["Harry"], serde_json::json!([2]));
    }
}
