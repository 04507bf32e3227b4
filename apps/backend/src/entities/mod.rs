pub mod game_rounds;
pub mod games;
pub mod players;
