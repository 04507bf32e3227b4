pub mod games_sea;
pub mod players_sea;
pub mod rounds_sea;
