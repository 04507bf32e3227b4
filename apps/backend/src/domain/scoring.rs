//! Score accumulation and elimination detection.

use crate::domain::{PlayerId, ScoreMap, ELIMINATION_THRESHOLD};

/// Sum per-player deltas across rounds.
///
/// Players that never appear in any round have no entry in the result;
/// callers treat a missing entry as 0. Addition commutes, so the result is
/// independent of round order and of map iteration order.
pub fn compute_totals<'a, I>(rounds: I) -> ScoreMap
where
    I: IntoIterator<Item = &'a ScoreMap>,
{
    let mut totals = ScoreMap::new();
    for round in rounds {
        for (player_id, delta) in round {
            *totals.entry(*player_id).or_insert(0) += delta;
        }
    }
    totals
}

/// First participant, in participant-list order, whose total reached the
/// elimination threshold.
///
/// The tie-break when one round pushes several players over the line is the
/// creation-time participant order, which is fixed and deterministic.
pub fn first_eliminated(totals: &ScoreMap, participants: &[PlayerId]) -> Option<PlayerId> {
    participants
        .iter()
        .find(|id| totals.get(id).copied().unwrap_or(0) >= ELIMINATION_THRESHOLD)
        .copied()
}
