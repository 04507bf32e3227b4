//! Game repository functions for the domain layer.
//!
//! The participant list is stored as a JSON array; ids are `i64` on this
//! side of the boundary and become JSON numbers/strings only inside the
//! persisted document.

use sea_orm::ConnectionTrait;

use crate::adapters::games_sea as games_adapter;
use crate::domain::PlayerId;
use crate::entities::games;
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};

/// Game domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: i64,
    pub started_at: time::OffsetDateTime,
    pub ended_at: Option<time::OffsetDateTime>,
    pub starting_dealer_id: PlayerId,
    pub current_dealer_id: PlayerId,
    pub loser_id: Option<PlayerId>,
    /// Fixed creation-time participant order; defines dealer rotation.
    pub participants: Vec<PlayerId>,
}

impl Game {
    /// A game with an end timestamp is terminal and immutable to rounds.
    pub fn is_finished(&self) -> bool {
        self.ended_at.is_some()
    }
}

// Free functions (generic) for game operations

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<Game>, DomainError> {
    let game = games_adapter::find_by_id(conn, game_id).await?;
    game.map(Game::try_from_model).transpose()
}

/// Find game by ID or return a typed not-found error.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Game, DomainError> {
    find_by_id(conn, game_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Game, format!("game {game_id} not found"))
    })
}

/// All games, most recently started first.
pub async fn find_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<Vec<Game>, DomainError> {
    let games = games_adapter::find_all(conn).await?;
    games.into_iter().map(Game::try_from_model).collect()
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    participants: &[PlayerId],
    dealer_id: PlayerId,
) -> Result<Game, DomainError> {
    let dto = games_adapter::GameCreate {
        starting_dealer_id: dealer_id,
        participants: participants_to_json(participants)?,
    };
    let game = games_adapter::create_game(conn, dto).await?;
    Game::try_from_model(game)
}

pub async fn update_dealer<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    dealer_id: PlayerId,
) -> Result<Game, DomainError> {
    let dto = games_adapter::GameUpdateDealer {
        id: game_id,
        current_dealer_id: dealer_id,
    };
    let game = games_adapter::update_dealer(conn, dto).await?;
    Game::try_from_model(game)
}

pub async fn finish_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    loser_id: PlayerId,
) -> Result<Game, DomainError> {
    let dto = games_adapter::GameFinish {
        id: game_id,
        loser_id,
    };
    let game = games_adapter::finish_game(conn, dto).await?;
    Game::try_from_model(game)
}

pub async fn delete_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<(), DomainError> {
    games_adapter::delete_game(conn, game_id).await?;
    Ok(())
}

// Conversions between SeaORM models and domain models

fn participants_to_json(participants: &[PlayerId]) -> Result<sea_orm::prelude::Json, DomainError> {
    serde_json::to_value(participants).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("failed to serialize participant list: {e}"),
        )
    })
}

fn participants_from_json(value: &sea_orm::prelude::Json) -> Result<Vec<PlayerId>, DomainError> {
    let items = value.as_array().ok_or_else(|| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            "participant list is not a JSON array",
        )
    })?;

    items
        .iter()
        .map(|item| {
            // Tolerate both representations: numbers (canonical) and the
            // string-typed ids legacy documents carry.
            if let Some(id) = item.as_i64() {
                return Ok(id);
            }
            if let Some(s) = item.as_str() {
                if let Ok(id) = s.parse::<PlayerId>() {
                    return Ok(id);
                }
            }
            Err(DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("participant entry is not a player id: {item}"),
            ))
        })
        .collect()
}

impl Game {
    fn try_from_model(model: games::Model) -> Result<Self, DomainError> {
        let participants = participants_from_json(&model.participants)?;
        Ok(Self {
            id: model.id,
            started_at: model.started_at,
            ended_at: model.ended_at,
            starting_dealer_id: model.starting_dealer_id,
            current_dealer_id: model.current_dealer_id,
            loser_id: model.loser_id,
            participants,
        })
    }
}
