//! Beater strategies.
//!
//! The beater is the only role with an alternate rule set. A strategy gets
//! everything the beater can see on its turn and decides what to do:
//! - `StandardBeater`: always plays the bludger for points
//! - `SeekerHunter`: house rules, goes after a dangerous enemy seeker
//!
//! ## Seeker hunting
//!
//! The enemy seeker's vulnerability is `base + mod + temp` plus its streak,
//! or plus the weather while the streak is 0. The beater hunts when the
//! vulnerability reaches `SEEKER_TARGET_THRESHOLD` plus the side's
//! escalation counter. Every hunt raises the counter by
//! `ESCALATION_STEP`; every round without one lowers it by 1.

use serde::{Deserialize, Serialize};

use crate::core::DiceSource;
use crate::roster::{PlayerRecord, Role, SeekerRecord};

use super::outcome::{ActionReport, Outcome, ScoreDelta};
use super::role::{resolve_beater, RoleAction, Tier};

/// Vulnerability at which a seeker becomes worth hunting.
pub const SEEKER_TARGET_THRESHOLD: i32 = 4;

/// Added to the escalation counter after a hunt.
pub const ESCALATION_STEP: i32 = 2;

/// Base the randomized gate roll has to beat, on top of the escalation.
pub const TARGETING_GATE_BASE: i32 = 6;

/// Enemy seeker temp penalty on a clean hit.
pub const STRONG_SEEKER_PENALTY: i32 = 3;

/// Enemy seeker temp penalty on a glancing hit.
pub const MILD_SEEKER_PENALTY: i32 = 1;

/// Own seeker temp penalty when the bludger comes back.
pub const BACKFIRE_PENALTY: i32 = 1;

/// Points the opposing side gets while the beater is busy hunting.
pub const SLIP_THROUGH_POINTS: i64 = 10;

/// Which seeker a hunt ended up hurting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeekerTarget {
    Enemy,
    Own,
}

/// Temp penalty a hunt puts on a seeker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeekerHit {
    pub target: SeekerTarget,
    /// Added to the seeker's temp (negative).
    pub penalty: i32,
}

/// What the beater sees on its turn.
#[derive(Clone, Copy, Debug)]
pub struct BeaterTurn<'a> {
    pub beater: &'a PlayerRecord,
    /// Position of the beater in its team list.
    pub index: usize,
    pub enemy_seeker: &'a SeekerRecord,
    pub weather: i32,
    /// The acting side's escalation counter.
    pub escalation: i32,
}

/// Result of a beater turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BeaterPlay {
    pub report: ActionReport,
    /// Set when the beater hunted a seeker.
    pub hit: Option<SeekerHit>,
}

impl BeaterPlay {
    /// Whether this turn was a seeker hunt.
    #[must_use]
    pub fn hunted(&self) -> bool {
        self.hit.is_some()
    }
}

/// How a beater spends its turn.
pub trait BeaterStrategy {
    fn play(&self, turn: &BeaterTurn<'_>, dice: &mut dyn DiceSource) -> BeaterPlay;
}

/// The regular beater action.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardBeater;

impl BeaterStrategy for StandardBeater {
    fn play(&self, turn: &BeaterTurn<'_>, dice: &mut dyn DiceSource) -> BeaterPlay {
        BeaterPlay {
            report: resolve_beater(turn.beater, turn.index, turn.weather, dice),
            hit: None,
        }
    }
}

/// `base + mod + temp`, plus the streak if there is one, else the weather.
#[must_use]
pub fn seeker_vulnerability(seeker: &SeekerRecord, weather: i32) -> i32 {
    let situational = if seeker.streak != 0 { seeker.streak } else { weather };
    seeker.player.modifier_sum() + situational
}

/// Escalation counter after a beater turn.
#[must_use]
pub fn next_escalation(current: i32, hunted: bool) -> i32 {
    if hunted {
        current + ESCALATION_STEP
    } else {
        (current - 1).max(0)
    }
}

/// Roll table of a seeker hunt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeekerHunt;

/// (points for the opposing side, seeker hit)
type HuntEffect = (i64, SeekerHit);

static HUNT_TIERS: [Tier<HuntEffect>; 3] = [
    Tier {
        min_roll: 10,
        outcome: Outcome::Success,
        effect: (
            SLIP_THROUGH_POINTS,
            SeekerHit { target: SeekerTarget::Enemy, penalty: -STRONG_SEEKER_PENALTY },
        ),
    },
    Tier {
        min_roll: 7,
        outcome: Outcome::Partial,
        effect: (0, SeekerHit { target: SeekerTarget::Enemy, penalty: -MILD_SEEKER_PENALTY }),
    },
    Tier {
        min_roll: i32::MIN,
        outcome: Outcome::Fail,
        effect: (0, SeekerHit { target: SeekerTarget::Own, penalty: -BACKFIRE_PENALTY }),
    },
];

impl RoleAction for SeekerHunt {
    type Record = PlayerRecord;
    type Effect = HuntEffect;

    fn role(&self) -> Role {
        Role::Beater
    }

    fn tiers(&self) -> &'static [Tier<HuntEffect>] {
        &HUNT_TIERS
    }

    fn modifier_sum(&self, record: &PlayerRecord) -> i32 {
        record.modifier_sum()
    }
}

/// House-rule beater.
#[derive(Clone, Copy, Debug, Default)]
pub struct SeekerHunter {
    /// Require an extra 2d6 roll above `TARGETING_GATE_BASE + escalation`
    /// before hunting.
    pub randomized_gate: bool,
}

impl SeekerHunter {
    #[must_use]
    pub fn new(randomized_gate: bool) -> Self {
        Self { randomized_gate }
    }

    fn wants_to_hunt(&self, turn: &BeaterTurn<'_>, dice: &mut dyn DiceSource) -> bool {
        let vulnerability = seeker_vulnerability(turn.enemy_seeker, turn.weather);
        if vulnerability < SEEKER_TARGET_THRESHOLD + turn.escalation {
            return false;
        }
        if self.randomized_gate {
            let gate = dice.roll_2d6();
            log::trace!("targeting gate {} vs {}", gate, TARGETING_GATE_BASE + turn.escalation);
            return gate > TARGETING_GATE_BASE + turn.escalation;
        }
        true
    }
}

impl BeaterStrategy for SeekerHunter {
    fn play(&self, turn: &BeaterTurn<'_>, dice: &mut dyn DiceSource) -> BeaterPlay {
        if !self.wants_to_hunt(turn, dice) {
            return StandardBeater.play(turn, dice);
        }

        let (roll, tier) = SeekerHunt.roll(turn.beater, turn.weather, dice);
        let (slip_through, hit) = tier.effect;
        let player = turn.beater.label(Role::Beater, turn.index);
        let text = match tier.outcome {
            Outcome::Success => format!("Beater {} hammers the enemy seeker, a chaser slips through", player),
            Outcome::Partial => format!("Beater {} clips the enemy seeker", player),
            _ => format!("Beater {} misses, the bludger hits their own seeker", player),
        };
        log::debug!("{} (roll {})", text, roll);

        BeaterPlay {
            report: ActionReport {
                role: Role::Beater,
                player,
                roll,
                outcome: tier.outcome,
                delta: ScoreDelta::new(0, slip_through),
                text,
            },
            hit: Some(hit),
        }
    }
}
