//! Pre-game rolls: weather and the starting side.

use serde::{Deserialize, Serialize};

use crate::core::{DiceSource, Side};

/// Match weather, fixed for the whole match once rolled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    #[default]
    Fair,
    Poor,
    Severe,
}

impl Weather {
    /// Weather for a 2d6 roll: 6 or less is severe, 7 to 9 poor, 10+ fair.
    #[must_use]
    pub const fn from_roll(roll: i32) -> Weather {
        if roll <= 6 {
            Weather::Severe
        } else if roll <= 9 {
            Weather::Poor
        } else {
            Weather::Fair
        }
    }

    /// Modifier added to every roll of the match.
    #[must_use]
    pub const fn modifier(self) -> i32 {
        match self {
            Weather::Fair => 0,
            Weather::Poor => -1,
            Weather::Severe => -2,
        }
    }
}

impl std::fmt::Display for Weather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Weather::Fair => write!(f, "fair"),
            Weather::Poor => write!(f, "poor"),
            Weather::Severe => write!(f, "severe"),
        }
    }
}

/// Roll for the weather. Returns the raw roll and the resulting weather.
pub fn roll_weather<D: DiceSource + ?Sized>(dice: &mut D) -> (i32, Weather) {
    let roll = dice.roll_2d6();
    (roll, Weather::from_roll(roll))
}

/// Both sides roll 2d6 until the rolls differ; the higher roll starts.
///
/// `on_roll` sees every attempt, ties included.
pub fn roll_starting_side<D: DiceSource + ?Sized>(dice: &mut D, mut on_roll: impl FnMut(i32, i32)) -> Side {
    loop {
        let home = dice.roll_2d6();
        let away = dice.roll_2d6();
        on_roll(home, away);
        if home != away {
            return if home > away { Side::Home } else { Side::Away };
        }
    }
}
