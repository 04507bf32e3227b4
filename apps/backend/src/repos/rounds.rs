//! Round repository functions for the domain layer.
//!
//! The per-round score map is stored as a JSON object. JSON object keys are
//! always strings, so player ids are stringified on write and parsed back
//! to `i64` on read; nothing above this layer ever sees a string id.

use sea_orm::ConnectionTrait;

use crate::adapters::rounds_sea as rounds_adapter;
use crate::domain::{PlayerId, ScoreMap};
use crate::entities::game_rounds;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Round domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub id: i64,
    pub game_id: i64,
    pub round_no: i16,
    pub scores: ScoreMap,
    pub created_at: time::OffsetDateTime,
}

// Free functions (generic) for round operations

/// All rounds of a game, ordered by round_no.
pub async fn find_all_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<Round>, DomainError> {
    let rounds = rounds_adapter::find_all_by_game(conn, game_id).await?;
    rounds.into_iter().map(Round::try_from_model).collect()
}

/// Append a round to a game.
pub async fn create_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    round_no: i16,
    scores: &ScoreMap,
) -> Result<Round, DomainError> {
    let dto = rounds_adapter::RoundCreate {
        game_id,
        round_no,
        scores: scores_to_json(scores),
    };
    let round = rounds_adapter::create_round(conn, dto).await?;
    Round::try_from_model(round)
}

/// Remove all rounds of a game (player-delete cascade).
pub async fn delete_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<u64, DomainError> {
    Ok(rounds_adapter::delete_by_game(conn, game_id).await?)
}

// Conversions between SeaORM models and domain models

fn scores_to_json(scores: &ScoreMap) -> sea_orm::prelude::Json {
    let map: serde_json::Map<String, serde_json::Value> = scores
        .iter()
        .map(|(player_id, delta)| (player_id.to_string(), serde_json::Value::from(*delta)))
        .collect();
    serde_json::Value::Object(map)
}

fn scores_from_json(value: &sea_orm::prelude::Json) -> Result<ScoreMap, DomainError> {
    let obj = value.as_object().ok_or_else(|| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            "round score map is not a JSON object",
        )
    })?;

    obj.iter()
        .map(|(key, val)| {
            let player_id: PlayerId = key.parse().map_err(|_| {
                DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!("round score key is not a player id: '{key}'"),
                )
            })?;
            let delta = val
                .as_i64()
                .and_then(|d| i32::try_from(d).ok())
                .ok_or_else(|| {
                    DomainError::infra(
                        InfraErrorKind::DataCorruption,
                        format!("round score for player {player_id} is not an integer: {val}"),
                    )
                })?;
            Ok((player_id, delta))
        })
        .collect()
}

impl Round {
    fn try_from_model(model: game_rounds::Model) -> Result<Self, DomainError> {
        let scores = scores_from_json(&model.scores)?;
        Ok(Self {
            id: model.id,
            game_id: model.game_id,
            round_no: model.round_no,
            scores,
            created_at: model.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn score_map_round_trip() {
        let mut scores = ScoreMap::new();
        scores.insert(12, 30);
        scores.insert(7, -5);

        let value = scores_to_json(&scores);
        assert_eq!(scores_from_json(&value).unwrap(), scores);
    }

    #[test]
    fn keys_are_strings_in_the_document() {
        let mut scores = ScoreMap::new();
        scores.insert(12, 30);

        let value = scores_to_json(&scores);
        assert_eq!(value, json!({"12": 30}));
    }

    #[test]
    fn non_numeric_key_is_rejected() {
        let value = json!({"twelve": 30});
        assert!(scores_from_json(&value).is_err());
    }

    #[test]
    fn non_integer_score_is_rejected() {
        let value = json!({"12": "thirty"});
        assert!(scores_from_json(&value).is_err());
    }
}
