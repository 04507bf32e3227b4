//! Game read services: history and per-game detail.
//!
//! Totals are never stored; every read recomputes them from the persisted
//! rounds.

use sea_orm::DatabaseTransaction;

use crate::domain::{compute_totals, ScoreMap};
use crate::errors::domain::DomainError;
use crate::repos::games::{self, Game};
use crate::repos::players::{self, Player};
use crate::repos::rounds::{self, Round};

/// Everything the game page needs: the game, its players (by name), the
/// rounds in order, and the recomputed running totals.
#[derive(Debug, Clone, PartialEq)]
pub struct GameDetail {
    pub game: Game,
    pub players: Vec<Player>,
    pub rounds: Vec<Round>,
    pub totals: ScoreMap,
}

/// Game query service.
pub struct GameService;

impl GameService {
    pub fn new() -> Self {
        Self
    }

    /// All games, most recently started first.
    pub async fn history(&self, txn: &DatabaseTransaction) -> Result<Vec<Game>, DomainError> {
        games::find_all(txn).await
    }

    /// Load one game with players, rounds and totals.
    pub async fn game_detail(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
    ) -> Result<GameDetail, DomainError> {
        let game = games::require_game(txn, game_id).await?;
        let game_players = players::find_by_ids(txn, &game.participants).await?;
        let game_rounds = rounds::find_all_by_game(txn, game_id).await?;
        let totals = compute_totals(game_rounds.iter().map(|r| &r.scores));

        Ok(GameDetail {
            game,
            players: game_players,
            rounds: game_rounds,
            totals,
        })
    }
}

impl Default for GameService {
    fn default() -> Self {
        Self::new()
    }
}
