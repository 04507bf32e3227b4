//! SeaORM adapter for the game repository - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, QueryOrder, Set,
};

use crate::entities::games;

pub mod dto;

pub use dto::{GameCreate, GameFinish, GameUpdateDealer};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find_by_id(game_id).one(conn).await
}

/// Find game by ID or return RecordNotFound error.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<games::Model, sea_orm::DbErr> {
    find_by_id(conn, game_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Game not found".to_string()))
}

/// All games, most recently started first.
pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .order_by_desc(games::Column::StartedAt)
        .all(conn)
        .await
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let game = games::ActiveModel {
        id: NotSet,
        started_at: Set(now),
        ended_at: Set(None),
        starting_dealer_id: Set(dto.starting_dealer_id),
        current_dealer_id: Set(dto.starting_dealer_id),
        loser_id: Set(None),
        participants: Set(dto.participants),
    };

    game.insert(conn).await
}

/// Rotate the dealer for an in-progress game.
pub async fn update_dealer<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameUpdateDealer,
) -> Result<games::Model, sea_orm::DbErr> {
    let game = require_game(conn, dto.id).await?;

    let mut game: games::ActiveModel = game.into();
    game.current_dealer_id = Set(dto.current_dealer_id);

    game.update(conn).await
}

/// Mark a game as finished: ended_at and loser_id are set in one write.
pub async fn finish_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameFinish,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let game = require_game(conn, dto.id).await?;

    let mut game: games::ActiveModel = game.into();
    game.ended_at = Set(Some(now));
    game.loser_id = Set(Some(dto.loser_id));

    game.update(conn).await
}

/// Delete a game row. Returns the number of rows removed (0 or 1).
pub async fn delete_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = games::Entity::delete_by_id(game_id).exec(conn).await?;
    Ok(result.rows_affected)
}
