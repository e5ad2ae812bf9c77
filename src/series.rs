//! Running many matches from one roster.
//!
//! Every match gets its own roster copy and its own dice, forked from a
//! master `MatchRng` seeded with `config.seed`, so a series is reproducible
//! and no match sees another's state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::{MatchConfig, MatchError, MatchRng};
use crate::engine::{run_match_with, MatchContext, MatchResult};
use crate::events::NullSink;
use crate::roster::Roster;

/// Aggregate of a series of matches.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSummary {
    pub matches: usize,
    /// Snitch catches per team. Every team of the roster has an entry.
    pub wins: BTreeMap<String, usize>,
    pub mean_rounds: f64,
    pub mean_score: BTreeMap<String, f64>,
}

impl SeriesSummary {
    /// Share of matches a team ended. 0.0 for unknown teams or empty series.
    #[must_use]
    pub fn win_rate(&self, team: &str) -> f64 {
        if self.matches == 0 {
            return 0.0;
        }
        self.wins.get(team).copied().unwrap_or(0) as f64 / self.matches as f64
    }

    fn from_results(roster: &Roster, results: &[MatchResult]) -> Self {
        let mut wins: BTreeMap<String, usize> = BTreeMap::new();
        let mut totals: BTreeMap<String, i64> = BTreeMap::new();
        for (_, team) in roster.teams().iter() {
            wins.insert(team.name.clone(), 0);
            totals.insert(team.name.clone(), 0);
        }

        let mut rounds = 0u64;
        for result in results {
            *wins.entry(result.ending_team.clone()).or_default() += 1;
            for (team, score) in &result.score {
                *totals.entry(team.clone()).or_default() += score;
            }
            rounds += u64::from(result.round_count);
        }

        let count = results.len().max(1) as f64;
        Self {
            matches: results.len(),
            wins,
            mean_rounds: rounds as f64 / count,
            mean_score: totals.into_iter().map(|(team, total)| (team, total as f64 / count)).collect(),
        }
    }
}

/// Play `matches` independent matches and return every result.
pub fn play_series(roster: &Roster, config: &MatchConfig, matches: usize) -> Result<Vec<MatchResult>, MatchError> {
    let mut master = MatchRng::new(config.seed);

    (0..matches)
        .map(|index| {
            let dice = master.fork();
            log::debug!("series match {} with seed {}", index + 1, dice.seed());
            run_match_with(roster.clone(), config.clone(), MatchContext::new(dice, NullSink))
        })
        .collect()
}

/// Play `matches` independent matches and summarise them.
pub fn run_series(roster: &Roster, config: &MatchConfig, matches: usize) -> Result<SeriesSummary, MatchError> {
    let results = play_series(roster, config, matches)?;
    let summary = SeriesSummary::from_results(roster, &results);
    log::info!(
        "series of {} matches ({}): mean {:.1} rounds",
        summary.matches,
        roster.matchup_label(),
        summary.mean_rounds
    );
    Ok(summary)
}
