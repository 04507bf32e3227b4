//! DTOs for players_sea adapter.

/// DTO for creating a new player.
#[derive(Debug, Clone)]
pub struct PlayerCreate {
    pub name: String,
    pub nick: String,
}

/// DTO for updating a player's identity.
#[derive(Debug, Clone)]
pub struct PlayerUpdate {
    pub id: i64,
    pub name: String,
    pub nick: String,
}
