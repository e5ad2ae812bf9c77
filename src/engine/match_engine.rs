//! The match engine.
//!
//! `MatchEngine` owns the match state and drives the action resolvers:
//!
//! ```text
//! NotStarted -> PreGame -> InProgress -> Finished
//! ```
//!
//! ## Rounds
//!
//! Each round resolves chasers, beaters, keepers and seekers in that order,
//! the starting side first in every pair. Scores are floored at 0 after the
//! round, never in the middle of it. A seeker roll of 15+ ends the match at
//! once: the other seeker does not act, the catching side gets
//! `SNITCH_BONUS` on top of its floored score, and the phase moves to
//! `Finished`.
//!
//! ## Temp modifiers
//!
//! A player's `temp` is used by its next action and then cleared. Penalties
//! produced by an action (a failed search, a bludger hit) are added after
//! the clear, so they carry into the following action only.

use std::collections::BTreeMap;

use super::context::MatchContext;
use super::history::PlayerHistory;
use super::pregame::{roll_starting_side, roll_weather};
use super::result::{ActionSummary, MatchResult, RoundReport};
use super::state::{MatchPhase, MatchState};
use crate::actions::{
    next_escalation, resolve_chaser, resolve_keeper, resolve_seeker, ActionReport, BeaterStrategy, BeaterTurn,
    ScoreDelta, SeekerHunter, SeekerTarget, StandardBeater, SNITCH_BONUS,
};
use crate::core::{DiceSource, MatchConfig, MatchError, MatchRng, Side, SideMap};
use crate::events::{EventLog, EventSink, MatchEvent, NullSink, TeamScore};
use crate::roster::{Role, Roster, Team};

/// Plays one match.
///
/// ```
/// use quidditch_sim::core::MatchConfig;
/// use quidditch_sim::engine::MatchEngine;
/// use quidditch_sim::roster::{PlayerRecord, Roster, Team};
///
/// let team = |name: &str| {
///     Team::new(name, vec![PlayerRecord::new(1)], vec![PlayerRecord::new(1)], PlayerRecord::new(1), PlayerRecord::new(2))
/// };
/// let roster = Roster::new(vec![team("Harpies"), team("Falcons")]).unwrap();
///
/// let mut engine = MatchEngine::seeded(roster, MatchConfig::default());
/// let result = engine.run().unwrap();
/// assert!(result.round_count >= 1);
/// assert!(result.score_of(&result.ending_team).unwrap() >= 150);
/// ```
pub struct MatchEngine<D, S> {
    config: MatchConfig,
    state: MatchState,
    context: MatchContext<D, S>,
    beater: Box<dyn BeaterStrategy>,
}

impl MatchEngine<MatchRng, EventLog> {
    /// Engine with dice seeded from `config.seed` and an in-memory event log.
    #[must_use]
    pub fn seeded(roster: Roster, config: MatchConfig) -> Self {
        let context = MatchContext::seeded(config.seed);
        Self::new(roster, config, context)
    }
}

impl<D: DiceSource, S: EventSink> MatchEngine<D, S> {
    /// Create an engine for a validated roster.
    ///
    /// The beater strategy follows `config.house_rules`.
    pub fn new(roster: Roster, config: MatchConfig, context: MatchContext<D, S>) -> Self {
        let beater: Box<dyn BeaterStrategy> = if config.house_rules {
            Box::new(SeekerHunter::new(config.randomized_targeting_gate))
        } else {
            Box::new(StandardBeater)
        };
        let state = MatchState::new(roster, config.collect_metadata);

        Self {
            config,
            state,
            context,
            beater,
        }
    }

    /// Validate raw teams and create an engine.
    pub fn from_teams(teams: Vec<Team>, config: MatchConfig, context: MatchContext<D, S>) -> Result<Self, MatchError> {
        let roster = Roster::new(teams)?;
        Ok(Self::new(roster, config, context))
    }

    /// Replace the beater strategy.
    #[must_use]
    pub fn with_beater_strategy(mut self, strategy: impl BeaterStrategy + 'static) -> Self {
        self.beater = Box::new(strategy);
        self
    }

    #[must_use]
    pub fn phase(&self) -> MatchPhase {
        self.state.phase
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn context(&self) -> &MatchContext<D, S> {
        &self.context
    }

    /// Give back the dice and the sink.
    pub fn into_context(self) -> MatchContext<D, S> {
        self.context
    }

    /// Run the pre-game: weather (if enabled) and the starting side.
    ///
    /// Does nothing once the match is under way.
    pub fn start(&mut self) -> Result<(), MatchError> {
        match self.state.phase {
            MatchPhase::Finished => return Err(MatchError::AlreadyFinished),
            MatchPhase::PreGame | MatchPhase::InProgress => return Ok(()),
            MatchPhase::NotStarted => {}
        }
        self.state.phase = MatchPhase::PreGame;

        if self.config.use_weather {
            let (roll, weather) = roll_weather(&mut self.context.dice);
            log::debug!("weather roll {} -> {} ({})", roll, weather, weather.modifier());
            self.state.weather = weather;
            self.context.emit_with(|| MatchEvent::Weather { roll, weather });
        }

        let events = &mut self.context.events;
        let starting = roll_starting_side(&mut self.context.dice, |home, away| {
            log::debug!("starting roll: home {} - away {}", home, away);
            if events.enabled() {
                events.emit(MatchEvent::StartingRoll { home, away });
            }
        });
        self.state.starting_side = starting;

        let state = &self.state;
        self.context.emit_with(|| MatchEvent::StartingSide {
            side: starting,
            team: state.team_name(starting).to_string(),
        });

        self.state.phase = MatchPhase::InProgress;
        Ok(())
    }

    /// Play a single round, starting the match first if needed.
    pub fn play_round(&mut self) -> Result<RoundReport, MatchError> {
        self.start()?;

        let round = self.state.round_count + 1;
        let order = Side::order_from(self.state.starting_side);
        let mut report = RoundReport::new(round);

        'round: for role in Role::TURN_ORDER {
            for side in order {
                if self.take_turn(role, side, round, &mut report) {
                    report.snitch = Some(side);
                    break 'round;
                }
            }
        }

        self.state.round_count = round;
        self.state.clamp_scores();

        match report.snitch {
            Some(side) => self.finish(side, round),
            None => {
                log::info!(
                    "round {} score: {} {} - {} {}",
                    round,
                    self.state.team_name(Side::Home),
                    self.state.score[Side::Home],
                    self.state.team_name(Side::Away),
                    self.state.score[Side::Away]
                );
                let scores = self.team_scores();
                self.context.emit_with(|| MatchEvent::RoundSummary { round, scores });
            }
        }

        report.scores = self.state.score;
        Ok(report)
    }

    /// Play rounds until the snitch is caught and return the result.
    pub fn run(&mut self) -> Result<MatchResult, MatchError> {
        if self.state.phase == MatchPhase::Finished {
            return Err(MatchError::AlreadyFinished);
        }
        while self.state.phase != MatchPhase::Finished {
            self.play_round()?;
        }
        self.result()
    }

    /// Result record of a finished match.
    pub fn result(&self) -> Result<MatchResult, MatchError> {
        let ending = match (self.state.phase, self.state.ending_side) {
            (MatchPhase::Finished, Some(side)) => side,
            _ => return Err(MatchError::NotFinished),
        };

        let score: BTreeMap<String, i64> = self
            .state
            .teams
            .iter()
            .map(|(side, team)| (team.name.clone(), self.state.score[side]))
            .collect();

        Ok(MatchResult {
            ending_team: self.state.team_name(ending).to_string(),
            round_count: self.state.round_count,
            score,
            starting_team: self.state.team_name(self.state.starting_side).to_string(),
            weather_modifier: self.state.weather_modifier(),
            player_history: self.state.history.clone(),
        })
    }

    /// Outcome history, when metadata collection is on.
    #[must_use]
    pub fn history(&self) -> Option<&PlayerHistory> {
        self.state.history.as_ref()
    }

    /// Index of the acting chaser or beater; advances the rotation in
    /// duplicate-role mode.
    fn active_index(&mut self, side: Side, role: Role) -> usize {
        if !self.config.duplicate_roles {
            return 0;
        }
        let len = self.state.teams[side].lineup(role).len().max(1);
        let rotation = match role {
            Role::Beater => &mut self.state.beater_rotation,
            _ => &mut self.state.chaser_rotation,
        };
        let index = rotation[side] % len;
        rotation[side] = (index + 1) % len;
        index
    }

    /// One player's action. Returns `true` only when a seeker catches the snitch.
    fn take_turn(&mut self, role: Role, side: Side, round: u32, report: &mut RoundReport) -> bool {
        match role {
            Role::Chaser => self.chaser_turn(side, round, report),
            Role::Beater => self.beater_turn(side, round, report),
            Role::Keeper => self.keeper_turn(side, round, report),
            Role::Seeker => return self.seeker_turn(side, round, report),
        }
        false
    }

    fn chaser_turn(&mut self, side: Side, round: u32, report: &mut RoundReport) {
        let weather = self.state.weather_modifier();
        let index = self.active_index(side, Role::Chaser);

        let record = &mut self.state.teams[side].chasers[index];
        let action = resolve_chaser(record, index, weather, &mut self.context.dice);
        record.temp = 0;

        self.apply_action(side, round, action, report);
    }

    fn beater_turn(&mut self, side: Side, round: u32, report: &mut RoundReport) {
        let weather = self.state.weather_modifier();
        let index = self.active_index(side, Role::Beater);

        let turn = BeaterTurn {
            beater: &self.state.teams[side].beaters[index],
            index,
            enemy_seeker: &self.state.teams[side.opponent()].seeker,
            weather,
            escalation: self.state.escalation[side],
        };
        let play = self.beater.play(&turn, &mut self.context.dice);

        self.state.teams[side].beaters[index].temp = 0;
        self.state.escalation[side] = next_escalation(self.state.escalation[side], play.hunted());
        self.apply_action(side, round, play.report, report);

        if let Some(hit) = play.hit {
            let victim = match hit.target {
                SeekerTarget::Enemy => side.opponent(),
                SeekerTarget::Own => side,
            };
            self.state.teams[victim].seeker.player.temp += hit.penalty;
            log::debug!("{} seeker takes {} to its next search", self.state.team_name(victim), hit.penalty);
            self.context.emit_with(|| MatchEvent::SeekerTargeted {
                round,
                side,
                target: hit.target,
                penalty: hit.penalty,
            });
        }
    }

    fn keeper_turn(&mut self, side: Side, round: u32, report: &mut RoundReport) {
        let weather = self.state.weather_modifier();

        let record = &mut self.state.teams[side].keeper;
        let action = resolve_keeper(record, weather, &mut self.context.dice);
        record.temp = 0;

        self.apply_action(side, round, action, report);
    }

    /// Returns true if the seeker caught the snitch.
    fn seeker_turn(&mut self, side: Side, round: u32, report: &mut RoundReport) -> bool {
        let weather = self.state.weather_modifier();

        let seeker = &mut self.state.teams[side].seeker;
        let search = resolve_seeker(seeker, weather, &mut self.context.dice);
        seeker.streak = search.streak;
        seeker.player.temp = search.temp_penalty;

        let caught = search.snitch_caught;
        let action = ActionReport {
            role: Role::Seeker,
            player: search.player,
            roll: search.roll,
            outcome: search.outcome,
            delta: ScoreDelta::NONE,
            text: search.text,
        };
        self.apply_action(side, round, action, report);
        caught
    }

    fn apply_action(&mut self, side: Side, round: u32, action: ActionReport, report: &mut RoundReport) {
        self.state.apply_delta(side, action.delta.own, action.delta.other);
        self.state.record_outcome(side, &action.player, action.outcome);

        report.actions.push(ActionSummary {
            side,
            role: action.role,
            player: action.player.clone(),
            roll: action.roll,
            outcome: action.outcome,
        });

        let state = &self.state;
        self.context.emit_with(|| MatchEvent::Action {
            round,
            side,
            team: state.team_name(side).to_string(),
            role: action.role,
            player: action.player,
            roll: action.roll,
            outcome: action.outcome,
            text: action.text,
        });
    }

    fn finish(&mut self, side: Side, round: u32) {
        self.state.score[side] += SNITCH_BONUS;
        self.state.snitch_caught = true;
        self.state.ending_side = Some(side);
        self.state.phase = MatchPhase::Finished;

        let team = self.state.team_name(side).to_string();
        log::info!("match finished after {} rounds, {} caught the snitch", round, team);

        let scores = self.team_scores();
        let caught_by = team.clone();
        self.context.emit_with(|| MatchEvent::SnitchCaught {
            round,
            side,
            team: caught_by,
        });
        self.context.emit_with(|| MatchEvent::MatchEnded {
            rounds: round,
            team,
            scores,
        });
    }

    fn team_scores(&self) -> SideMap<TeamScore> {
        SideMap::new(|side| TeamScore {
            team: self.state.team_name(side).to_string(),
            score: self.state.score[side],
        })
    }
}

/// Play a full match with seeded dice and no event log.
pub fn run_match(roster: Roster, config: MatchConfig) -> Result<MatchResult, MatchError> {
    let context = MatchContext::new(MatchRng::new(config.seed), NullSink);
    run_match_with(roster, config, context)
}

/// Play a full match with the given dice and sink.
///
/// Pass `MatchContext::new(&mut dice, &mut log)` to keep both afterwards.
pub fn run_match_with<D: DiceSource, S: EventSink>(
    roster: Roster,
    config: MatchConfig,
    context: MatchContext<D, S>,
) -> Result<MatchResult, MatchError> {
    MatchEngine::new(roster, config, context).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::Outcome;
    use crate::core::ScriptedDice;
    use crate::engine::Weather;
    use crate::roster::{PlayerRecord, SeekerRecord};

    fn team(name: &str, seeker_base: i32) -> Team {
        Team::new(
            name,
            vec![PlayerRecord::new(0)],
            vec![PlayerRecord::new(0)],
            PlayerRecord::new(0),
            PlayerRecord::new(seeker_base),
        )
    }

    fn roster(home_seeker: i32, away_seeker: i32) -> Roster {
        Roster::new(vec![team("A", home_seeker), team("B", away_seeker)]).unwrap()
    }

    fn scripted(rolls: Vec<i32>) -> MatchContext<ScriptedDice, EventLog> {
        MatchContext::new(ScriptedDice::new(rolls), EventLog::new())
    }

    #[test]
    fn test_snitch_in_first_round() {
        // Home starts (9 vs 4); chasers partial, beaters and keepers fail, home seeker 13 + 2
        let rolls = vec![9, 4, 7, 7, 6, 6, 6, 6, 13];
        let mut engine = MatchEngine::new(roster(2, 0), MatchConfig::default(), scripted(rolls));

        let result = engine.run().unwrap();

        assert_eq!(result.ending_team, "A");
        assert_eq!(result.round_count, 1);
        assert_eq!(result.score_of("A"), Some(30 + SNITCH_BONUS));
        assert_eq!(result.score_of("B"), Some(30));
        assert_eq!(result.starting_team, "A");
        assert_eq!(result.weather_modifier, 0);
        assert_eq!(engine.phase(), MatchPhase::Finished);

        // The away seeker never acted
        let events = &engine.context().events;
        let seekers = events
            .iter()
            .filter(|e| matches!(e, MatchEvent::Action { role: Role::Seeker, .. }))
            .count();
        assert_eq!(seekers, 1);
        assert!(matches!(events.last(), Some(MatchEvent::MatchEnded { rounds: 1, .. })));
    }

    #[test]
    fn test_scores_are_floored_after_the_round() {
        let rolls = vec![9, 4, 7, 2, 10, 7, 10, 8, 7, 7];
        let mut engine = MatchEngine::new(roster(0, 0), MatchConfig::default(), scripted(rolls));

        let report = engine.play_round().unwrap();

        assert_eq!(report.round, 1);
        assert_eq!(report.actions.len(), 8);
        assert_eq!(report.scores, SideMap::from_pair(30, 0));
        assert!(!report.ended_match());
        assert_eq!(engine.phase(), MatchPhase::InProgress);
    }

    #[test]
    fn test_starting_side_acts_first() {
        // Away starts (3 vs 10)
        let rolls = vec![3, 10, 7, 7, 7, 7, 7, 7, 7, 7];
        let mut engine = MatchEngine::new(roster(0, 0), MatchConfig::default(), scripted(rolls));

        let report = engine.play_round().unwrap();

        let sides: Vec<Side> = report.actions.iter().map(|a| a.side).collect();
        assert_eq!(sides, [Side::Away, Side::Home].repeat(4));
        assert_eq!(engine.result().unwrap_err().to_string(), "the match has not finished yet");
    }

    #[test]
    fn test_weather_applies_to_every_roll() {
        let rolls = vec![5, 9, 4, 9, 9, 9, 9, 9, 9, 9, 9];
        let config = MatchConfig::default().with_weather(true);
        let mut engine = MatchEngine::new(roster(0, 0), config, scripted(rolls));

        let report = engine.play_round().unwrap();

        assert_eq!(engine.state().weather, Weather::Severe);
        assert!(report.actions.iter().all(|a| a.roll == 7));
        assert!(matches!(
            engine.context().events.iter().next(),
            Some(MatchEvent::Weather { roll: 5, weather: Weather::Severe })
        ));
    }

    #[test]
    fn test_rotation_only_with_duplicate_roles() {
        let chasers = vec![PlayerRecord::new(0); 3];
        let make = |name: &str| {
            Team::new(
                name,
                chasers.clone(),
                vec![PlayerRecord::new(0); 2],
                PlayerRecord::new(0),
                PlayerRecord::new(0),
            )
        };
        // Home starts 3-2; each round then sees six 7s and searches of 3 and 2
        let rolls = vec![3, 2, 7, 7, 7, 7, 7, 7];

        for duplicate in [false, true] {
            let config = MatchConfig::default().with_duplicate_roles(duplicate);
            let mut engine =
                MatchEngine::from_teams(vec![make("A"), make("B")], config, scripted(rolls.clone())).unwrap();

            let mut chasers_seen = Vec::new();
            for _ in 0..4 {
                let report = engine.play_round().unwrap();
                let chaser = report.actions_of(Role::Chaser).find(|a| a.side == Side::Home).unwrap();
                chasers_seen.push(chaser.player.clone());
            }

            if duplicate {
                assert_eq!(chasers_seen, ["Chaser 1", "Chaser 2", "Chaser 3", "Chaser 1"]);
                assert_eq!(engine.state().chaser_rotation[Side::Home], 1);
                assert_eq!(engine.state().beater_rotation[Side::Home], 0);
            } else {
                assert!(chasers_seen.iter().all(|p| p == "Chaser 1"));
                assert_eq!(engine.state().chaser_rotation[Side::Home], 0);
            }
        }
    }

    #[test]
    fn test_temp_is_used_once() {
        let home = Team::new(
            "A",
            vec![PlayerRecord::new(0).with_temp(3)],
            vec![PlayerRecord::new(0)],
            PlayerRecord::new(0),
            SeekerRecord::new(PlayerRecord::new(0)).with_streak(1),
        );
        let config = MatchConfig::default();
        let rolls = vec![9, 4, 4, 7, 7, 7, 7, 7, 5, 7];
        let mut engine = MatchEngine::from_teams(vec![home, team("B", 0)], config, scripted(rolls)).unwrap();

        let report = engine.play_round().unwrap();

        // 4 + 3 temp -> partial
        assert_eq!(report.actions[0].roll, 7);
        assert_eq!(report.actions[0].outcome, Outcome::Partial);

        let state = engine.state();
        assert_eq!(state.teams[Side::Home].chasers[0].temp, 0);

        // 5 + 1 streak -> failed search
        let seeker = &state.teams[Side::Home].seeker;
        assert_eq!(seeker.streak, 0);
        assert_eq!(seeker.player.temp, -2);
        assert_eq!(state.teams[Side::Away].seeker.streak, 1);
    }

    #[test]
    fn test_finished_match_rejects_more_rounds() {
        let rolls = vec![9, 4, 7, 7, 7, 7, 7, 7, 15];
        let mut engine = MatchEngine::new(roster(0, 0), MatchConfig::default(), scripted(rolls));
        engine.run().unwrap();

        assert!(matches!(engine.play_round(), Err(MatchError::AlreadyFinished)));
        assert!(matches!(engine.run(), Err(MatchError::AlreadyFinished)));
        assert!(matches!(engine.start(), Err(MatchError::AlreadyFinished)));
        assert!(engine.result().is_ok());
    }

    #[test]
    fn test_metadata_collection() {
        let rolls = vec![9, 4, 7, 7, 7, 7, 7, 7, 15];
        let config = MatchConfig::default().with_metadata(true);
        let mut engine = MatchEngine::new(roster(0, 0), config, scripted(rolls));

        let result = engine.run().unwrap();
        let history = result.player_history.unwrap();

        assert_eq!(history.get("A", "Seeker"), Some(&[3u8][..]));
        assert_eq!(history.get("B", "Seeker"), Some(&[][..]));
        assert_eq!(history.get("A", "Chaser 1"), Some(&[1u8][..]));
        assert_eq!(history.total_actions(), 7);
    }

    #[test]
    fn test_house_rules_hit_enemy_seeker() {
        // Away seeker base 4 is worth hunting; home beater rolls 10
        let rolls = vec![9, 4, 7, 7, 10, 7, 7, 7, 7, 7];
        let config = MatchConfig::default().with_house_rules(true);
        let mut engine = MatchEngine::new(roster(0, 4), config, scripted(rolls));

        let report = engine.play_round().unwrap();

        let state = engine.state();
        assert_eq!(state.escalation[Side::Home], 2);
        // The hit was consumed by the away search that same round
        assert_eq!(state.teams[Side::Away].seeker.player.temp, 0);
        // Away search: 7 + 4 - 3 = 8
        let away_search = report.actions_of(Role::Seeker).find(|a| a.side == Side::Away).unwrap();
        assert_eq!(away_search.roll, 8);
        assert!(engine
            .context()
            .events
            .iter()
            .any(|e| matches!(e, MatchEvent::SeekerTargeted { side: Side::Home, penalty: -3, .. })));
    }
}
