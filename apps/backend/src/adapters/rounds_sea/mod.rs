//! SeaORM adapter for the rounds repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::game_rounds;

pub mod dto;

pub use dto::RoundCreate;

/// Find all rounds for a game, ordered by round_no.
pub async fn find_all_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<game_rounds::Model>, sea_orm::DbErr> {
    game_rounds::Entity::find()
        .filter(game_rounds::Column::GameId.eq(game_id))
        .order_by_asc(game_rounds::Column::RoundNo)
        .all(conn)
        .await
}

/// Create a new round.
pub async fn create_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoundCreate,
) -> Result<game_rounds::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let round = game_rounds::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        round_no: Set(dto.round_no),
        scores: Set(dto.scores),
        created_at: Set(now),
    };

    round.insert(conn).await
}

/// Delete all rounds of a game. Returns the number of rows removed.
pub async fn delete_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = game_rounds::Entity::delete_many()
        .filter(game_rounds::Column::GameId.eq(game_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
