//! Role actions and their threshold tables.
//!
//! Every role works the same way: roll 2d6, add the player's modifiers and
//! the weather, and look the total up in a table of tiers. Roles only
//! differ in which modifiers count and what each tier does, which is what
//! `RoleAction` captures.
//!
//! | Role   | >= 15  | >= 10              | >= 7        | below 7              |
//! |--------|--------|--------------------|-------------|----------------------|
//! | Chaser |        | own +20            | own +10     | other +10            |
//! | Beater |        | own +10, other -10 | own +10     | other +10            |
//! | Keeper |        | own +10, other -10 | other -10   | other +10            |
//! | Seeker | snitch | streak +2          | streak +1   | streak 0, temp -2    |

use crate::core::DiceSource;
use crate::roster::{PlayerRecord, Role, SeekerRecord};

use super::outcome::{ActionReport, Outcome, ScoreDelta};

/// Temp penalty a seeker takes into its next action after a failed search.
pub const FAILED_SEEK_PENALTY: i32 = 2;

/// Lowest search roll that builds a streak.
pub const SEARCH_PROGRESS_ROLL: i32 = 7;

/// Points for catching the snitch.
pub const SNITCH_BONUS: i64 = 150;

/// One row of a threshold table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tier<E> {
    /// Lowest roll that lands in this tier.
    pub min_roll: i32,
    pub outcome: Outcome,
    pub effect: E,
}

/// A role's rules: which modifiers it rolls with and what each roll does.
pub trait RoleAction {
    /// The acting player's record.
    type Record;
    /// What a tier does when hit.
    type Effect: Copy;

    fn role(&self) -> Role;

    /// Tiers from best to worst. The last tier catches everything.
    fn tiers(&self) -> &'static [Tier<Self::Effect>];

    /// Modifiers added to the dice, weather excluded.
    fn modifier_sum(&self, record: &Self::Record) -> i32;

    /// Look up the tier for a final roll.
    fn tier_for(&self, roll: i32) -> &'static Tier<Self::Effect> {
        let tiers = self.tiers();
        tiers
            .iter()
            .find(|tier| roll >= tier.min_roll)
            .unwrap_or(&tiers[tiers.len() - 1])
    }

    /// Roll for a player and return the final roll with its tier.
    fn roll<D: DiceSource + ?Sized>(
        &self,
        record: &Self::Record,
        weather: i32,
        dice: &mut D,
    ) -> (i32, &'static Tier<Self::Effect>) {
        let roll = dice.roll_with(self.modifier_sum(record) + weather);
        (roll, self.tier_for(roll))
    }
}

/// Scoring roles: the effect is a score change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chaser;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Beater;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Keeper;

static CHASER_TIERS: [Tier<ScoreDelta>; 3] = [
    Tier { min_roll: 10, outcome: Outcome::Success, effect: ScoreDelta::new(20, 0) },
    Tier { min_roll: 7, outcome: Outcome::Partial, effect: ScoreDelta::new(10, 0) },
    Tier { min_roll: i32::MIN, outcome: Outcome::Fail, effect: ScoreDelta::new(0, 10) },
];

static BEATER_TIERS: [Tier<ScoreDelta>; 3] = [
    Tier { min_roll: 10, outcome: Outcome::Success, effect: ScoreDelta::new(10, -10) },
    Tier { min_roll: 7, outcome: Outcome::Partial, effect: ScoreDelta::new(10, 0) },
    Tier { min_roll: i32::MIN, outcome: Outcome::Fail, effect: ScoreDelta::new(0, 10) },
];

static KEEPER_TIERS: [Tier<ScoreDelta>; 3] = [
    Tier { min_roll: 10, outcome: Outcome::Success, effect: ScoreDelta::new(10, -10) },
    Tier { min_roll: 7, outcome: Outcome::Partial, effect: ScoreDelta::new(0, -10) },
    Tier { min_roll: i32::MIN, outcome: Outcome::Fail, effect: ScoreDelta::new(0, 10) },
];

macro_rules! scoring_role {
    ($ty:ty, $role:expr, $tiers:expr) => {
        impl RoleAction for $ty {
            type Record = PlayerRecord;
            type Effect = ScoreDelta;

            fn role(&self) -> Role {
                $role
            }

            fn tiers(&self) -> &'static [Tier<ScoreDelta>] {
                &$tiers
            }

            fn modifier_sum(&self, record: &PlayerRecord) -> i32 {
                record.modifier_sum()
            }
        }
    };
}

scoring_role!(Chaser, Role::Chaser, CHASER_TIERS);
scoring_role!(Beater, Role::Beater, BEATER_TIERS);
scoring_role!(Keeper, Role::Keeper, KEEPER_TIERS);

/// What a seeker tier does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeekerEffect {
    CatchSnitch,
    Streak(i32),
    /// Streak back to 0 and a temp penalty for the next search.
    Reset { penalty: i32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Seeker;

static SEEKER_TIERS: [Tier<SeekerEffect>; 4] = [
    Tier { min_roll: 15, outcome: Outcome::Snitch, effect: SeekerEffect::CatchSnitch },
    Tier { min_roll: 10, outcome: Outcome::Success, effect: SeekerEffect::Streak(2) },
    Tier { min_roll: SEARCH_PROGRESS_ROLL, outcome: Outcome::Partial, effect: SeekerEffect::Streak(1) },
    Tier {
        min_roll: i32::MIN,
        outcome: Outcome::Fail,
        effect: SeekerEffect::Reset { penalty: FAILED_SEEK_PENALTY },
    },
];

impl RoleAction for Seeker {
    type Record = SeekerRecord;
    type Effect = SeekerEffect;

    fn role(&self) -> Role {
        Role::Seeker
    }

    fn tiers(&self) -> &'static [Tier<SeekerEffect>] {
        &SEEKER_TIERS
    }

    fn modifier_sum(&self, record: &SeekerRecord) -> i32 {
        record.modifier_sum()
    }
}

/// Result of a seeker action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeekerReport {
    pub player: String,
    pub roll: i32,
    pub outcome: Outcome,
    pub snitch_caught: bool,
    /// Streak after this search. Left unchanged when the snitch is caught.
    pub streak: i32,
    /// Penalty to add to the seeker's temp for its next search (0 or negative).
    pub temp_penalty: i32,
    pub text: String,
}

/// Narration line for an action: "Chaser Katie Success", or
/// "Chaser 2 Fail" for an unnamed player.
fn headline(role: Role, record: &PlayerRecord, label: &str, outcome: Outcome) -> String {
    match record.name {
        Some(_) => format!("{} {} {}", role, label, outcome),
        None => format!("{} {}", label, outcome),
    }
}

fn resolve_scoring<A, D>(action: A, record: &PlayerRecord, index: usize, weather: i32, dice: &mut D) -> ActionReport
where
    A: RoleAction<Record = PlayerRecord, Effect = ScoreDelta>,
    D: DiceSource + ?Sized,
{
    let role = action.role();
    let (roll, tier) = action.roll(record, weather, dice);
    let player = record.label(role, index);
    let text = headline(role, record, &player, tier.outcome);
    log::debug!("{} (roll {})", text, roll);

    ActionReport {
        role,
        player,
        roll,
        outcome: tier.outcome,
        delta: tier.effect,
        text,
    }
}

/// Resolve a chaser's attack on the hoops.
///
/// `index` is the chaser's position in the team list, used to name
/// unnamed players.
pub fn resolve_chaser<D: DiceSource + ?Sized>(
    record: &PlayerRecord,
    index: usize,
    weather: i32,
    dice: &mut D,
) -> ActionReport {
    resolve_scoring(Chaser, record, index, weather, dice)
}

/// Resolve a beater's bludger play.
pub fn resolve_beater<D: DiceSource + ?Sized>(
    record: &PlayerRecord,
    index: usize,
    weather: i32,
    dice: &mut D,
) -> ActionReport {
    resolve_scoring(Beater, record, index, weather, dice)
}

/// Resolve a keeper defending the hoops.
pub fn resolve_keeper<D: DiceSource + ?Sized>(record: &PlayerRecord, weather: i32, dice: &mut D) -> ActionReport {
    resolve_scoring(Keeper, record, 0, weather, dice)
}

/// Resolve a seeker's search for the snitch.
///
/// The record is not modified; the caller applies `streak` and
/// `temp_penalty` from the report.
pub fn resolve_seeker<D: DiceSource + ?Sized>(record: &SeekerRecord, weather: i32, dice: &mut D) -> SeekerReport {
    let (roll, tier) = Seeker.roll(record, weather, dice);
    let player = record.label();

    let (snitch_caught, streak, temp_penalty) = match tier.effect {
        SeekerEffect::CatchSnitch => (true, record.streak, 0),
        SeekerEffect::Streak(gain) => (false, record.streak + gain, 0),
        SeekerEffect::Reset { penalty } => (false, 0, -penalty),
    };

    let text = match tier.effect {
        SeekerEffect::Streak(_) => format!(
            "{}, current streak bonus: {}",
            headline(Role::Seeker, &record.player, &player, tier.outcome),
            streak
        ),
        _ => headline(Role::Seeker, &record.player, &player, tier.outcome),
    };
    log::debug!("{} (roll {})", text, roll);

    SeekerReport {
        player,
        roll,
        outcome: tier.outcome,
        snitch_caught,
        streak,
        temp_penalty,
        text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScriptedDice;

    fn player(base: i32) -> PlayerRecord {
        PlayerRecord::new(base)
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Chaser.tier_for(10).outcome, Outcome::Success);
        assert_eq!(Chaser.tier_for(9).outcome, Outcome::Partial);
        assert_eq!(Chaser.tier_for(7).outcome, Outcome::Partial);
        assert_eq!(Chaser.tier_for(6).outcome, Outcome::Fail);
        assert_eq!(Chaser.tier_for(-20).outcome, Outcome::Fail);

        assert_eq!(Seeker.tier_for(15).outcome, Outcome::Snitch);
        assert_eq!(Seeker.tier_for(14).outcome, Outcome::Success);
        assert_eq!(Seeker.tier_for(10).outcome, Outcome::Success);
        assert_eq!(Seeker.tier_for(9).outcome, Outcome::Partial);
        assert_eq!(Seeker.tier_for(6).outcome, Outcome::Fail);
    }

    #[test]
    fn test_chaser_deltas() {
        let p = player(0).named("Katie");
        let mut dice = ScriptedDice::new(vec![10, 7, 6]);

        let full = resolve_chaser(&p, 0, 0, &mut dice);
        assert_eq!(full.outcome, Outcome::Success);
        assert_eq!(full.delta, ScoreDelta::new(20, 0));
        assert_eq!(full.player, "Katie");
        assert_eq!(full.text, "Chaser Katie Success");

        let partial = resolve_chaser(&p, 0, 0, &mut dice);
        assert_eq!(partial.delta, ScoreDelta::new(10, 0));

        let fail = resolve_chaser(&p, 0, 0, &mut dice);
        assert_eq!(fail.outcome, Outcome::Fail);
        assert_eq!(fail.delta, ScoreDelta::new(0, 10));
    }

    #[test]
    fn test_beater_deltas() {
        let p = player(0);
        let mut dice = ScriptedDice::new(vec![11, 8, 2]);

        let success = resolve_beater(&p, 1, 0, &mut dice);
        assert_eq!(success.delta, ScoreDelta::new(10, -10));
        assert_eq!(success.text, "Beater 2 Success");

        assert_eq!(resolve_beater(&p, 1, 0, &mut dice).delta, ScoreDelta::new(10, 0));
        assert_eq!(resolve_beater(&p, 1, 0, &mut dice).delta, ScoreDelta::new(0, 10));
    }

    #[test]
    fn test_keeper_deltas() {
        let p = player(0);
        let mut dice = ScriptedDice::new(vec![12, 9, 3]);

        let save = resolve_keeper(&p, 0, &mut dice);
        assert_eq!((save.outcome, save.delta), (Outcome::Success, ScoreDelta::new(10, -10)));

        let block = resolve_keeper(&p, 0, &mut dice);
        assert_eq!((block.outcome, block.delta), (Outcome::Partial, ScoreDelta::new(0, -10)));

        let miss = resolve_keeper(&p, 0, &mut dice);
        assert_eq!((miss.outcome, miss.delta), (Outcome::Fail, ScoreDelta::new(0, 10)));
    }

    #[test]
    fn test_modifiers_and_weather_count() {
        // 6 on the dice, +3 from the player, -2 from weather -> 7
        let p = player(2).with_modifier(-1).with_temp(2);
        let mut dice = ScriptedDice::new(vec![6]);

        let report = resolve_chaser(&p, 0, -2, &mut dice);
        assert_eq!(report.roll, 7);
        assert_eq!(report.outcome, Outcome::Partial);
    }

    #[test]
    fn test_seeker_streak_and_reset() {
        let seeker = SeekerRecord::new(player(0)).with_streak(1);
        let mut dice = ScriptedDice::new(vec![9, 6, 5]);

        // 9 + 1 streak -> success
        let success = resolve_seeker(&seeker, 0, &mut dice);
        assert_eq!(success.outcome, Outcome::Success);
        assert_eq!(success.streak, 3);
        assert_eq!(success.temp_penalty, 0);
        assert!(!success.snitch_caught);

        // 6 + 1 -> partial
        let partial = resolve_seeker(&seeker, 0, &mut dice);
        assert_eq!(partial.outcome, Outcome::Partial);
        assert_eq!(partial.streak, 2);
        assert_eq!(partial.text, "Seeker Partial Success, current streak bonus: 2");

        // 5 + 1 -> fail
        let fail = resolve_seeker(&seeker, 0, &mut dice);
        assert_eq!(fail.outcome, Outcome::Fail);
        assert_eq!(fail.streak, 0);
        assert_eq!(fail.temp_penalty, -FAILED_SEEK_PENALTY);
    }

    #[test]
    fn test_seeker_catches_snitch() {
        let seeker = SeekerRecord::new(player(2).named("Harry"));
        let mut dice = ScriptedDice::new(vec![13]);

        let report = resolve_seeker(&seeker, 0, &mut dice);
        assert!(report.snitch_caught);
        assert_eq!(report.outcome, Outcome::Snitch);
        assert_eq!(report.roll, 15);
        assert_eq!(report.text, "Seeker Harry caught the Snitch!");
    }

    #[test]
    fn test_resolvers_do_not_touch_records() {
        let seeker = SeekerRecord::new(player(1)).with_streak(4);
        let before = seeker.clone();
        let mut dice = ScriptedDice::new(vec![2]);

        let _ = resolve_seeker(&seeker, -1, &mut dice);
        assert_eq!(seeker, before);
    }
}
