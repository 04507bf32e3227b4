//! DTOs for rounds_sea adapter.

use sea_orm::prelude::Json;

/// DTO for creating a new round.
///
/// `scores` is the JSON score map, already serialized by the repos layer.
#[derive(Debug, Clone)]
pub struct RoundCreate {
    pub game_id: i64,
    pub round_no: i16,
    pub scores: Json,
}
