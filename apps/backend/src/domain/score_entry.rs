//! Parsing of raw round submissions into score deltas.
//!
//! Clients submit one free-form text field per participant. Blank fields
//! mean "no score this round"; anything else must parse as an integer.

use crate::errors::domain::{DomainError, ValidationKind};

use crate::domain::{PlayerId, ScoreMap};

/// Parse the submitted values for one round.
///
/// `entries` carries one `(player_id, raw value)` pair per participant, in
/// participant order. Missing or blank values are skipped. A value that is
/// present but not an integer rejects the whole round — no partial commit.
/// A round with no parsed scores at all is rejected as empty.
pub fn parse_score_entries(entries: &[(PlayerId, Option<&str>)]) -> Result<ScoreMap, DomainError> {
    let mut scores = ScoreMap::new();

    for (player_id, raw) in entries {
        let raw = match raw {
            Some(value) if !value.trim().is_empty() => value.trim(),
            _ => continue,
        };

        let delta: i32 = raw.parse().map_err(|_| {
            DomainError::validation(
                ValidationKind::InvalidScore {
                    player_id: *player_id,
                },
                format!("score for player {player_id} is not a valid integer: '{raw}'"),
            )
        })?;

        scores.insert(*player_id, delta);
    }

    if scores.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::EmptyRound,
            "at least one score must be submitted",
        ));
    }

    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_submitted_scores() {
        let entries = [(1, Some("30")), (2, Some("40")), (3, Some("20"))];
        let scores = parse_score_entries(&entries).unwrap();
        assert_eq!(scores.get(&1), Some(&30));
        assert_eq!(scores.get(&2), Some(&40));
        assert_eq!(scores.get(&3), Some(&20));
    }

    #[test]
    fn blank_and_missing_fields_are_skipped() {
        let entries = [(1, Some("15")), (2, Some("   ")), (3, None)];
        let scores = parse_score_entries(&entries).unwrap();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores.get(&1), Some(&15));
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let entries = [(1, Some(" 12 "))];
        let scores = parse_score_entries(&entries).unwrap();
        assert_eq!(scores.get(&1), Some(&12));
    }

    #[test]
    fn negative_scores_are_accepted() {
        let entries = [(1, Some("-5"))];
        let scores = parse_score_entries(&entries).unwrap();
        assert_eq!(scores.get(&1), Some(&-5));
    }

    #[test]
    fn non_numeric_value_rejects_the_whole_round() {
        let entries = [(1, Some("30")), (2, Some("lots"))];
        let err = parse_score_entries(&entries).unwrap_err();
        match err {
            DomainError::Validation(ValidationKind::InvalidScore { player_id }, _) => {
                assert_eq!(player_id, 2);
            }
            other => panic!("expected InvalidScore, got {other:?}"),
        }
    }

    #[test]
    fn all_blank_round_is_empty() {
        let entries = [(1, Some("")), (2, None)];
        let err = parse_score_entries(&entries).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationKind::EmptyRound, _)
        ));
    }
}
