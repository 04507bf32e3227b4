//! Player-related HTTP routes.

use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::repos::players::Player;
use crate::services::players::PlayerService;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct PlayerRequest {
    name: String,
    nick: String,
}

#[derive(Debug, Serialize)]
struct PlayerResponse {
    id: i64,
    name: String,
    nick: String,
    #[serde(with = "time::serde::rfc3339")]
    created_at: time::OffsetDateTime,
}

impl From<Player> for PlayerResponse {
    fn from(player: Player) -> Self {
        Self {
            id: player.id,
            name: player.name,
            nick: player.nick,
            created_at: player.created_at,
        }
    }
}

/// POST /api/players
///
/// Register a new player. The nick is the unique public handle; a taken
/// nick yields a 409 conflict.
async fn register_player(
    http_req: HttpRequest,
    body: web::Json<PlayerRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let player = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PlayerService::new();
            Ok(service.register(txn, &body.name, &body.nick).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(PlayerResponse::from(player)))
}

/// GET /api/players
///
/// All registered players, newest first.
async fn list_players(
    http_req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Vec<PlayerResponse>>, AppError> {
    let players = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PlayerService::new();
            Ok(service.list(txn).await?)
        })
    })
    .await?;

    Ok(web::Json(
        players.into_iter().map(PlayerResponse::from).collect(),
    ))
}

/// GET /api/players/{player_id}
async fn get_player(
    http_req: HttpRequest,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<PlayerResponse>, AppError> {
    let player_id = path.into_inner();

    let player = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PlayerService::new();
            Ok(service.get(txn, player_id).await?)
        })
    })
    .await?;

    Ok(web::Json(PlayerResponse::from(player)))
}

/// PUT /api/players/{player_id}
///
/// Update a player's name and nick.
async fn update_player(
    http_req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<PlayerRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<PlayerResponse>, AppError> {
    let player_id = path.into_inner();
    let body = body.into_inner();

    let player = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PlayerService::new();
            Ok(service.update(txn, player_id, &body.name, &body.nick).await?)
        })
    })
    .await?;

    Ok(web::Json(PlayerResponse::from(player)))
}

#[derive(Debug, Serialize)]
struct PlayerDeletedResponse {
    id: i64,
    nick: String,
    games_removed: usize,
}

/// DELETE /api/players/{player_id}
///
/// Delete a player and, transactionally, every game the player
/// participated in (with its rounds).
async fn delete_player(
    http_req: HttpRequest,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<PlayerDeletedResponse>, AppError> {
    let player_id = path.into_inner();

    let deleted = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PlayerService::new();
            Ok(service.delete(txn, player_id).await?)
        })
    })
    .await?;

    Ok(web::Json(PlayerDeletedResponse {
        id: deleted.player.id,
        nick: deleted.player.nick,
        games_removed: deleted.games_removed,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(register_player))
            .route(web::get().to(list_players)),
    );
    cfg.service(
        web::resource("/{player_id}")
            .route(web::get().to(get_player))
            .route(web::put().to(update_player))
            .route(web::delete().to(delete_player)),
    );
}
