//! Dice for the match engine.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical roll sequence
//! - **Forkable**: Derive independent streams for separate matches
//! - **Serializable**: O(1) state capture and restore
//! - **Injectable**: The engine only sees the `DiceSource` trait, so tests
//!   can feed it a fixed roll stream via `ScriptedDice`
//!
//! ```
//! use quidditch_sim::core::{DiceSource, MatchRng};
//!
//! let mut dice = MatchRng::new(42);
//! let roll = dice.roll_2d6();
//! assert!((2..=12).contains(&roll));
//!
//! let mut again = MatchRng::new(42);
//! assert_eq!(again.roll_2d6(), roll);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of 2d6 totals.
///
/// Every roll in a match goes through this trait. Implementations must be
/// deterministic for a given construction so matches can be replayed.
pub trait DiceSource {
    /// Roll two six-sided dice and return their sum.
    fn roll_2d6(&mut self) -> i32;

    /// Roll 2d6 and add a modifier.
    fn roll_with(&mut self, modifier: i32) -> i32 {
        self.roll_2d6() + modifier
    }
}

impl<D: DiceSource + ?Sized> DiceSource for &mut D {
    fn roll_2d6(&mut self) -> i32 {
        (**self).roll_2d6()
    }
}

impl<D: DiceSource + ?Sized> DiceSource for Box<D> {
    fn roll_2d6(&mut self) -> i32 {
        (**self).roll_2d6()
    }
}

/// Seeded dice backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct MatchRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl MatchRng {
    /// Create new dice with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// The seed these dice were created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork to create an independent stream.
    ///
    /// Each fork produces a different but deterministic sequence. Used to
    /// give every match of a series its own dice.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Roll a single six-sided die.
    pub fn d6(&mut self) -> i32 {
        self.inner.gen_range(1..7)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> RngState {
        RngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &RngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

impl DiceSource for MatchRng {
    fn roll_2d6(&mut self) -> i32 {
        let total = self.d6() + self.d6();
        log::trace!("2d6 -> {}", total);
        total
    }
}

/// Serializable dice state for checkpointing.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many rolls have been made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    /// Seed the dice were created from
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
    /// Fork counter for deterministic branching
    pub fork_counter: u64,
}

/// Fixed roll stream.
///
/// Yields the given totals in order and starts over from the beginning once
/// exhausted. Totals are returned as-is, so a script may contain values a
/// real pair of dice could never produce.
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    rolls: Vec<i32>,
    cursor: usize,
    consumed: usize,
}

impl ScriptedDice {
    /// Create a scripted source.
    ///
    /// # Panics
    ///
    /// Panics if `rolls` is empty.
    pub fn new(rolls: impl Into<Vec<i32>>) -> Self {
        let rolls = rolls.into();
        assert!(!rolls.is_empty(), "ScriptedDice needs at least one roll");
        Self {
            rolls,
            cursor: 0,
            consumed: 0,
        }
    }

    /// Number of rolls handed out so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl DiceSource for ScriptedDice {
    fn roll_2d6(&mut self) -> i32 {
        let roll = self.rolls[self.cursor];
        self.cursor = (self.cursor + 1) % self.rolls.len();
        self.consumed += 1;
        roll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = MatchRng::new(42);
        let mut rng2 = MatchRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.roll_2d6(), rng2.roll_2d6());
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = MatchRng::new(1);
        let mut rng2 = MatchRng::new(2);

        let seq1: Vec<_> = (0..20).map(|_| rng1.roll_2d6()).collect();
        let seq2: Vec<_> = (0..20).map(|_| rng2.roll_2d6()).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_roll_range() {
        let mut rng = MatchRng::new(7);
        let mut seen = [false; 13];

        for _ in 0..2000 {
            let roll = rng.roll_2d6();
            assert!((2..=12).contains(&roll), "roll out of range: {}", roll);
            seen[roll as usize] = true;
        }

        // Every total from 2 to 12 should show up in 2000 rolls
        assert!(seen[2..].iter().all(|&s| s));
    }

    #[test]
    fn test_roll_with_modifier() {
        let mut dice = ScriptedDice::new(vec![7]);
        assert_eq!(dice.roll_with(-2), 5);
        assert_eq!(dice.roll_with(3), 10);
    }

    #[test]
    fn test_fork_produces_different_sequence() {
        let mut rng = MatchRng::new(42);
        let mut forked = rng.fork();

        let seq1: Vec<_> = (0..20).map(|_| rng.roll_2d6()).collect();
        let seq2: Vec<_> = (0..20).map(|_| forked.roll_2d6()).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut rng1 = MatchRng::new(42);
        let mut rng2 = MatchRng::new(42);

        let forked1 = rng1.fork();
        let forked2 = rng2.fork();

        assert_eq!(forked1.seed(), forked2.seed());
    }

    #[test]
    fn test_state_roundtrip() {
        let mut rng = MatchRng::new(42);
        for _ in 0..50 {
            rng.roll_2d6();
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.roll_2d6()).collect();

        let mut restored = MatchRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.roll_2d6()).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_state_serde() {
        let state = RngState {
            seed: 42,
            word_pos: 12345,
            fork_counter: 5,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: RngState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }

    #[test]
    fn test_scripted_dice_cycles() {
        let mut dice = ScriptedDice::new(vec![3, 9, 12]);

        let rolls: Vec<_> = (0..7).map(|_| dice.roll_2d6()).collect();
        assert_eq!(rolls, vec![3, 9, 12, 3, 9, 12, 3]);
        assert_eq!(dice.consumed(), 7);
    }

    #[test]
    fn test_dice_through_mut_ref() {
        fn roll_twice<D: DiceSource + ?Sized>(dice: &mut D) -> (i32, i32) {
            (dice.roll_2d6(), dice.roll_2d6())
        }

        let mut dice = ScriptedDice::new(vec![4, 8]);
        let dyn_dice: &mut dyn DiceSource = &mut dice;
        assert_eq!(roll_twice(dyn_dice), (4, 8));
    }

    #[test]
    #[should_panic(expected = "at least one roll")]
    fn test_scripted_dice_empty() {
        let _ = ScriptedDice::new(Vec::new());
    }
}
