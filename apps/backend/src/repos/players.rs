//! Player repository functions for the domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::players_sea as players_adapter;
use crate::entities::players;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Player domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub nick: String,
    pub created_at: time::OffsetDateTime,
}

// Free functions (generic) for player operations

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<Player>, DomainError> {
    let player = players_adapter::find_by_id(conn, player_id).await?;
    Ok(player.map(Player::from))
}

/// Find player by ID or return a typed not-found error.
pub async fn require_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Player, DomainError> {
    find_by_id(conn, player_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Player, format!("player {player_id} not found"))
    })
}

pub async fn find_by_nick<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    nick: &str,
) -> Result<Option<Player>, DomainError> {
    let player = players_adapter::find_by_nick(conn, nick).await?;
    Ok(player.map(Player::from))
}

/// All players, newest first.
pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Player>, DomainError> {
    let players = players_adapter::find_all(conn).await?;
    Ok(players.into_iter().map(Player::from).collect())
}

/// Players with the given ids, ordered by full name.
pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: &[i64],
) -> Result<Vec<Player>, DomainError> {
    let players = players_adapter::find_by_ids(conn, ids).await?;
    Ok(players.into_iter().map(Player::from).collect())
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    nick: &str,
) -> Result<Player, DomainError> {
    let dto = players_adapter::PlayerCreate {
        name: name.to_string(),
        nick: nick.to_string(),
    };
    let player = players_adapter::create_player(conn, dto).await?;
    Ok(Player::from(player))
}

pub async fn update_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    name: &str,
    nick: &str,
) -> Result<Player, DomainError> {
    let dto = players_adapter::PlayerUpdate {
        id: player_id,
        name: name.to_string(),
        nick: nick.to_string(),
    };
    let player = players_adapter::update_player(conn, dto).await?;
    Ok(Player::from(player))
}

pub async fn delete_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<(), DomainError> {
    players_adapter::delete_player(conn, player_id).await?;
    Ok(())
}

// Conversions between SeaORM models and domain models

impl From<players::Model> for Player {
    fn from(model: players::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            nick: model.nick,
            created_at: model.created_at,
        }
    }
}
