//! Player domain service: registration, identity edits, deletion with its
//! game cascade, and the loss ranking.

use sea_orm::DatabaseTransaction;
use tracing::info;

use crate::domain::PlayerId;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::repos::players::{self, Player};
use crate::repos::{games, rounds};

/// One row of the loss ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingEntry {
    pub player_id: PlayerId,
    pub nick: String,
    pub losses: u32,
}

/// Result of deleting a player.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletedPlayer {
    pub player: Player,
    /// Games removed by the cascade (every game the player participated in).
    pub games_removed: usize,
}

/// Player domain service.
pub struct PlayerService;

impl PlayerService {
    pub fn new() -> Self {
        Self
    }

    /// Register a new player. The nick is the unique public handle.
    pub async fn register(
        &self,
        txn: &DatabaseTransaction,
        name: &str,
        nick: &str,
    ) -> Result<Player, DomainError> {
        let (name, nick) = validated_identity(name, nick)?;

        if players::find_by_nick(txn, nick).await?.is_some() {
            return Err(DomainError::conflict(
                ConflictKind::NickTaken,
                format!("the nick '{nick}' is already in use"),
            ));
        }

        let player = players::create_player(txn, name, nick).await?;
        info!(player_id = player.id, nick = %player.nick, "player registered");
        Ok(player)
    }

    /// Update a player's name and nick.
    pub async fn update(
        &self,
        txn: &DatabaseTransaction,
        player_id: PlayerId,
        name: &str,
        nick: &str,
    ) -> Result<Player, DomainError> {
        let (name, nick) = validated_identity(name, nick)?;

        let existing = players::require_player(txn, player_id).await?;

        // Only reject the nick when it would collide with someone else.
        if nick != existing.nick && players::find_by_nick(txn, nick).await?.is_some() {
            return Err(DomainError::conflict(
                ConflictKind::NickTaken,
                format!("the nick '{nick}' is already in use"),
            ));
        }

        players::update_player(txn, player_id, name, nick).await
    }

    /// Fetch one player by id.
    pub async fn get(
        &self,
        txn: &DatabaseTransaction,
        player_id: PlayerId,
    ) -> Result<Player, DomainError> {
        players::require_player(txn, player_id).await
    }

    /// All players, newest first.
    pub async fn list(&self, txn: &DatabaseTransaction) -> Result<Vec<Player>, DomainError> {
        players::find_all(txn).await
    }

    /// Delete a player.
    ///
    /// Cascades within the caller's transaction: every game whose
    /// participant list contains the player is removed, together with its
    /// rounds, before the player row itself.
    pub async fn delete(
        &self,
        txn: &DatabaseTransaction,
        player_id: PlayerId,
    ) -> Result<DeletedPlayer, DomainError> {
        let player = players::require_player(txn, player_id).await?;

        let mut games_removed = 0;
        for game in games::find_all(txn).await? {
            if game.participants.contains(&player_id) {
                rounds::delete_by_game(txn, game.id).await?;
                games::delete_game(txn, game.id).await?;
                games_removed += 1;
            }
        }

        players::delete_player(txn, player_id).await?;
        info!(player_id, games_removed, "player deleted");

        Ok(DeletedPlayer {
            player,
            games_removed,
        })
    }

    /// Loss ranking: one entry per registered player, fewest losses first.
    pub async fn ranking(
        &self,
        txn: &DatabaseTransaction,
    ) -> Result<Vec<RankingEntry>, DomainError> {
        let all_players = players::find_all(txn).await?;
        let all_games = games::find_all(txn).await?;

        let mut entries: Vec<RankingEntry> = all_players
            .into_iter()
            .map(|player| {
                let losses = all_games
                    .iter()
                    .filter(|game| game.loser_id == Some(player.id))
                    .count() as u32;
                RankingEntry {
                    player_id: player.id,
                    nick: player.nick,
                    losses,
                }
            })
            .collect();

        // Ties broken by nick for a stable output.
        entries.sort_by(|a, b| a.losses.cmp(&b.losses).then_with(|| a.nick.cmp(&b.nick)));
        Ok(entries)
    }
}

impl Default for PlayerService {
    fn default() -> Self {
        Self::new()
    }
}

fn validated_identity<'a>(name: &'a str, nick: &'a str) -> Result<(&'a str, &'a str), DomainError> {
    let name = name.trim();
    let nick = nick.trim();

    if name.is_empty() || nick.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::Other("MISSING_FIELDS".to_string()),
            "both name and nick are required",
        ));
    }

    Ok((name, nick))
}
