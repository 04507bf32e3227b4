//! DTOs for games_sea adapter.

use sea_orm::prelude::Json;

/// DTO for creating a new game.
///
/// `participants` is the JSON array of player ids, already serialized by
/// the repos layer (the id-to-string boundary lives there).
#[derive(Debug, Clone)]
pub struct GameCreate {
    pub starting_dealer_id: i64,
    pub participants: Json,
}

/// DTO for rotating the dealer.
#[derive(Debug, Clone)]
pub struct GameUpdateDealer {
    pub id: i64,
    pub current_dealer_id: i64,
}

/// DTO for finishing a game. Sets ended_at and loser together; they are
/// never written separately.
#[derive(Debug, Clone)]
pub struct GameFinish {
    pub id: i64,
    pub loser_id: i64,
}
