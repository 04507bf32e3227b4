//! Pure game logic: score accumulation, elimination, dealer rotation.
//!
//! Nothing in this module touches the database; services feed it loaded
//! state and persist what it decides.

pub mod dealer;
pub mod score_entry;
pub mod scoring;

use std::collections::BTreeMap;

/// Unique identifier for a player.
pub type PlayerId = i64;

/// Score deltas (or totals) keyed by player id. BTreeMap keeps iteration
/// deterministic.
pub type ScoreMap = BTreeMap<PlayerId, i32>;

/// A player whose cumulative total reaches this value loses and the game ends.
pub const ELIMINATION_THRESHOLD: i32 = 100;

pub use dealer::next_dealer;
pub use score_entry::parse_score_entries;
pub use scoring::{compute_totals, first_eliminated};
