//! Game lifecycle mutations: creation, round recording, termination.
//!
//! Every operation takes the caller's transaction; the round insert and any
//! resulting game mutation commit together or not at all.

use std::collections::{BTreeMap, BTreeSet};

use sea_orm::DatabaseTransaction;
use tracing::{debug, info};

use crate::domain::{
    compute_totals, first_eliminated, next_dealer, parse_score_entries, PlayerId, ScoreMap,
};
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::repos::games::{self, Game};
use crate::repos::{players, rounds};

/// Outcome of a recorded round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundResult {
    pub round_no: i16,
    pub totals: ScoreMap,
    pub game_over: bool,
    pub loser_id: Option<PlayerId>,
    /// Dealer for the next round; unchanged when the game just ended.
    pub current_dealer_id: PlayerId,
}

/// Game flow domain service.
pub struct GameFlowService;

impl GameFlowService {
    pub fn new() -> Self {
        Self
    }

    /// Create a game over a fixed, ordered participant list.
    ///
    /// The list order defines dealer rotation. The chosen dealer opens the
    /// game and is also recorded as the starting dealer.
    pub async fn create_game(
        &self,
        txn: &DatabaseTransaction,
        participants: &[PlayerId],
        dealer_id: PlayerId,
    ) -> Result<Game, DomainError> {
        if participants.len() < 2 {
            return Err(DomainError::validation(
                ValidationKind::TooFewParticipants,
                "a game needs at least 2 participants",
            ));
        }

        let distinct: BTreeSet<PlayerId> = participants.iter().copied().collect();
        if distinct.len() != participants.len() {
            return Err(DomainError::validation(
                ValidationKind::DuplicateParticipant,
                "the participant list contains the same player twice",
            ));
        }

        if !participants.contains(&dealer_id) {
            return Err(DomainError::validation(
                ValidationKind::DealerNotParticipant,
                format!("dealer {dealer_id} is not in the participant list"),
            ));
        }

        let found = players::find_by_ids(txn, participants).await?;
        if found.len() != participants.len() {
            let known: BTreeSet<PlayerId> = found.iter().map(|p| p.id).collect();
            let missing: Vec<String> = participants
                .iter()
                .filter(|id| !known.contains(id))
                .map(|id| id.to_string())
                .collect();
            return Err(DomainError::not_found(
                NotFoundKind::Player,
                format!("unknown participant(s): {}", missing.join(", ")),
            ));
        }

        let game = games::create_game(txn, participants, dealer_id).await?;
        info!(
            game_id = game.id,
            dealer_id,
            participants = participants.len(),
            "game created"
        );
        Ok(game)
    }

    /// Record one round of scores for an in-progress game.
    ///
    /// `submitted` maps player id to the raw value entered for that player;
    /// blank or missing values mean "no score this round". Entries for ids
    /// outside the participant list are ignored.
    pub async fn record_round(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        submitted: &BTreeMap<PlayerId, Option<String>>,
    ) -> Result<RoundResult, DomainError> {
        let game = games::require_game(txn, game_id).await?;

        if game.is_finished() {
            return Err(DomainError::conflict(
                ConflictKind::GameFinished,
                format!("game {game_id} is already finished"),
            ));
        }

        let entries: Vec<(PlayerId, Option<&str>)> = game
            .participants
            .iter()
            .map(|id| (*id, submitted.get(id).and_then(|v| v.as_deref())))
            .collect();
        let scores = parse_score_entries(&entries)?;

        // Sequence numbers are 1-based and contiguous.
        let prior = rounds::find_all_by_game(txn, game_id).await?;
        let round_no = prior.len() as i16 + 1;

        let round = rounds::create_round(txn, game_id, round_no, &scores).await?;

        let totals = compute_totals(prior.iter().map(|r| &r.scores).chain([&round.scores]));

        if let Some(loser_id) = first_eliminated(&totals, &game.participants) {
            games::finish_game(txn, game_id, loser_id).await?;
            info!(game_id, round_no, loser_id, "game finished");
            return Ok(RoundResult {
                round_no,
                totals,
                game_over: true,
                loser_id: Some(loser_id),
                current_dealer_id: game.current_dealer_id,
            });
        }

        let dealer_id = next_dealer(&game.participants, game.current_dealer_id).ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("game {game_id} has an empty participant list"),
            )
        })?;
        games::update_dealer(txn, game_id, dealer_id).await?;

        debug!(game_id, round_no, dealer_id, "round recorded, dealer rotated");
        Ok(RoundResult {
            round_no,
            totals,
            game_over: false,
            loser_id: None,
            current_dealer_id: dealer_id,
        })
    }
}

impl Default for GameFlowService {
    fn default() -> Self {
        Self::new()
    }
}
