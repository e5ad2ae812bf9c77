//! Team sides and per-side data storage.
//!
//! ## Side
//!
//! A match always has exactly two sides. `Side::Home` is the first team of
//! the roster, `Side::Away` the second.
//!
//! ## SideMap
//!
//! Two-slot storage indexed by `Side`, used for scores, rotation pointers
//! and anything else the engine tracks per team.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two teams in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    /// Both sides in roster order.
    pub const BOTH: [Side; 2] = [Side::Home, Side::Away];

    /// Roster index (0 for home, 1 for away).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::Home => 0,
            Side::Away => 1,
        }
    }

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    /// Both sides with `first` leading.
    #[must_use]
    pub const fn order_from(first: Side) -> [Side; 2] {
        [first, first.opponent()]
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Home => write!(f, "Home"),
            Side::Away => write!(f, "Guest"),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ```
/// use quidditch_sim::core::{Side, SideMap};
///
/// let mut score: SideMap<i64> = SideMap::with_value(0);
/// score[Side::Away] += 10;
/// assert_eq!(score[Side::Home], 0);
/// assert_eq!(score[Side::Away], 10);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create from explicit home and away values.
    pub fn from_pair(home: T, away: T) -> Self {
        Self { data: [home, away] }
    }

    /// Create with values from a factory function.
    pub fn new(factory: impl Fn(Side) -> T) -> Self {
        Self {
            data: [factory(Side::Home), factory(Side::Away)],
        }
    }

    /// Create with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            data: [value.clone(), value],
        }
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Iterate over (Side, &T) pairs in roster order.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::BOTH.into_iter().zip(self.data.iter())
    }

    /// Iterate over (Side, &mut T) pairs in roster order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Side, &mut T)> {
        Side::BOTH.into_iter().zip(self.data.iter_mut())
    }

    /// Map both entries to a new map.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> SideMap<U> {
        SideMap {
            data: [f(&self.data[0]), f(&self.data[1])],
        }
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_basics() {
        assert_eq!(Side::Home.index(), 0);
        assert_eq!(Side::Away.index(), 1);
        assert_eq!(Side::Home.opponent(), Side::Away);
        assert_eq!(Side::Away.opponent(), Side::Home);
        assert_eq!(format!("{}", Side::Away), "Guest");
    }

    #[test]
    fn test_order_from() {
        assert_eq!(Side::order_from(Side::Home), [Side::Home, Side::Away]);
        assert_eq!(Side::order_from(Side::Away), [Side::Away, Side::Home]);
    }

    #[test]
    fn test_side_map_new() {
        let map: SideMap<usize> = SideMap::new(|s| s.index() * 10);

        assert_eq!(map[Side::Home], 0);
        assert_eq!(map[Side::Away], 10);
    }

    #[test]
    fn test_side_map_mutation() {
        let mut map: SideMap<i64> = SideMap::with_value(0);

        map[Side::Home] += 20;
        map[Side::Away] -= 10;

        assert_eq!(map[Side::Home], 20);
        assert_eq!(map[Side::Away], -10);
    }

    #[test]
    fn test_side_map_iter_and_map() {
        let map = SideMap::from_pair(3, 4);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Side::Home, &3), (Side::Away, &4)]);

        let doubled = map.map(|v| v * 2);
        assert_eq!(doubled, SideMap::from_pair(6, 8));
    }

    #[test]
    fn test_side_map_serialization() {
        let map = SideMap::from_pair(1i64, 2i64);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: SideMap<i64> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
