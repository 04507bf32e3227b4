//! Game-related HTTP routes.

use std::collections::BTreeMap;

use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::domain::{PlayerId, ScoreMap};
use crate::error::AppError;
use crate::repos::games::Game;
use crate::repos::rounds::Round;
use crate::services::game_flow::GameFlowService;
use crate::services::games::GameService;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct CreateGameRequest {
    /// Ordered participant list; the order defines dealer rotation.
    participants: Vec<PlayerId>,
    dealer_id: PlayerId,
}

#[derive(Debug, Serialize)]
struct GameResponse {
    id: i64,
    #[serde(with = "time::serde::rfc3339")]
    started_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    ended_at: Option<time::OffsetDateTime>,
    starting_dealer_id: PlayerId,
    current_dealer_id: PlayerId,
    loser_id: Option<PlayerId>,
    participants: Vec<PlayerId>,
}

impl From<Game> for GameResponse {
    fn from(game: Game) -> Self {
        Self {
            id: game.id,
            started_at: game.started_at,
            ended_at: game.ended_at,
            starting_dealer_id: game.starting_dealer_id,
            current_dealer_id: game.current_dealer_id,
            loser_id: game.loser_id,
            participants: game.participants,
        }
    }
}

#[derive(Debug, Serialize)]
struct RoundResponse {
    round_no: i16,
    scores: ScoreMap,
}

impl From<Round> for RoundResponse {
    fn from(round: Round) -> Self {
        Self {
            round_no: round.round_no,
            scores: round.scores,
        }
    }
}

#[derive(Debug, Serialize)]
struct PlayerSummary {
    id: PlayerId,
    nick: String,
}

#[derive(Debug, Serialize)]
struct GameDetailResponse {
    #[serde(flatten)]
    game: GameResponse,
    players: Vec<PlayerSummary>,
    rounds: Vec<RoundResponse>,
    totals: ScoreMap,
}

/// POST /api/games
///
/// Create a game over an ordered participant list with the chosen dealer.
async fn create_game(
    http_req: HttpRequest,
    body: web::Json<CreateGameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let game = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = GameFlowService::new();
            Ok(service
                .create_game(txn, &body.participants, body.dealer_id)
                .await?)
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(GameResponse::from(game)))
}

/// GET /api/games
///
/// Game history, most recently started first.
async fn history(
    http_req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Vec<GameResponse>>, AppError> {
    let games = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = GameService::new();
            Ok(service.history(txn).await?)
        })
    })
    .await?;

    Ok(web::Json(games.into_iter().map(GameResponse::from).collect()))
}

/// GET /api/games/{game_id}
///
/// One game with its players, rounds and recomputed totals.
async fn game_detail(
    http_req: HttpRequest,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<GameDetailResponse>, AppError> {
    let game_id = path.into_inner();

    let detail = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = GameService::new();
            Ok(service.game_detail(txn, game_id).await?)
        })
    })
    .await?;

    Ok(web::Json(GameDetailResponse {
        game: GameResponse::from(detail.game),
        players: detail
            .players
            .into_iter()
            .map(|p| PlayerSummary {
                id: p.id,
                nick: p.nick,
            })
            .collect(),
        rounds: detail.rounds.into_iter().map(RoundResponse::from).collect(),
        totals: detail.totals,
    }))
}

#[derive(Debug, Deserialize)]
struct RecordRoundRequest {
    /// Raw values keyed by player id; blank or null means no score.
    scores: BTreeMap<PlayerId, Option<String>>,
}

#[derive(Debug, Serialize)]
struct RoundRecordedResponse {
    round_no: i16,
    game_over: bool,
    loser_id: Option<PlayerId>,
    totals: ScoreMap,
    current_dealer_id: PlayerId,
}

/// POST /api/games/{game_id}/rounds
///
/// Record one round of scores. Ends the game when a total reaches the
/// elimination threshold; otherwise rotates the dealer.
async fn record_round(
    http_req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<RecordRoundRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let game_id = path.into_inner();
    let body = body.into_inner();

    let result = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = GameFlowService::new();
            Ok(service.record_round(txn, game_id, &body.scores).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(RoundRecordedResponse {
        round_no: result.round_no,
        game_over: result.game_over,
        loser_id: result.loser_id,
        totals: result.totals,
        current_dealer_id: result.current_dealer_id,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(create_game))
            .route(web::get().to(history)),
    );
    cfg.service(web::resource("/{game_id}").route(web::get().to(game_detail)));
    cfg.service(web::resource("/{game_id}/rounds").route(web::post().to(record_round)));
}
