//! Team rosters.
//!
//! Player and team records are typed and validated once, when the roster is
//! built. The engine only ever sees a valid `Roster`.

pub mod player;
pub mod team;

pub use player::{PlayerRecord, Role, SeekerRecord};
pub use team::{Roster, Team, TeamInput, MIN_SEEKER_RATING, MODIFIER_LIMIT};
