//! SeaORM adapter for the player repository - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::players;

pub mod dto;

pub use dto::{PlayerCreate, PlayerUpdate};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find_by_id(player_id).one(conn).await
}

pub async fn find_by_nick<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    nick: &str,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find()
        .filter(players::Column::Nick.eq(nick))
        .one(conn)
        .await
}

/// All players, newest first.
pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<players::Model>, sea_orm::DbErr> {
    players::Entity::find()
        .order_by_desc(players::Column::CreatedAt)
        .all(conn)
        .await
}

/// Players with the given ids, ordered by full name.
pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: &[i64],
) -> Result<Vec<players::Model>, sea_orm::DbErr> {
    players::Entity::find()
        .filter(players::Column::Id.is_in(ids.iter().copied()))
        .order_by_asc(players::Column::Name)
        .all(conn)
        .await
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PlayerCreate,
) -> Result<players::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let player = players::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        nick: Set(dto.nick),
        created_at: Set(now),
    };

    player.insert(conn).await
}

pub async fn update_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PlayerUpdate,
) -> Result<players::Model, sea_orm::DbErr> {
    let player = find_by_id(conn, dto.id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Player not found".to_string()))?;

    let mut player: players::ActiveModel = player.into();
    player.name = Set(dto.name);
    player.nick = Set(dto.nick);

    player.update(conn).await
}

/// Delete a player row. Returns the number of rows removed (0 or 1).
pub async fn delete_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = players::Entity::delete_by_id(player_id).exec(conn).await?;
    Ok(result.rows_affected)
}
