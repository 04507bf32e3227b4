use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "started_at")]
    pub started_at: OffsetDateTime,
    #[sea_orm(column_name = "ended_at")]
    pub ended_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "starting_dealer_id")]
    pub starting_dealer_id: i64,
    #[sea_orm(column_name = "current_dealer_id")]
    pub current_dealer_id: i64,
    #[sea_orm(column_name = "loser_id")]
    pub loser_id: Option<i64>,
    /// Ordered list of participant player ids, fixed at creation.
    pub participants: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::players::Entity",
        from = "Column::StartingDealerId",
        to = "super::players::Column::Id"
    )]
    StartingDealer,
    #[sea_orm(
        belongs_to = "super::players::Entity",
        from = "Column::CurrentDealerId",
        to = "super::players::Column::Id"
    )]
    CurrentDealer,
    #[sea_orm(
        belongs_to = "super::players::Entity",
        from = "Column::LoserId",
        to = "super::players::Column::Id"
    )]
    Loser,
    #[sea_orm(has_many = "super::game_rounds::Entity")]
    GameRounds,
}

impl Related<super::game_rounds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameRounds.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
