pub mod games;
pub mod players;
pub mod rounds;
