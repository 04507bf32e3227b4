//! Loss ranking route.

use actix_web::{web, HttpRequest, Result};
use serde::Serialize;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::services::players::PlayerService;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct RankingEntryResponse {
    player_id: i64,
    nick: String,
    losses: u32,
}

/// GET /api/ranking
///
/// One entry per registered player with the count of finished games lost,
/// fewest losses first.
async fn ranking(
    http_req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Vec<RankingEntryResponse>>, AppError> {
    let entries = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PlayerService::new();
            Ok(service.ranking(txn).await?)
        })
    })
    .await?;

    Ok(web::Json(
        entries
            .into_iter()
            .map(|e| RankingEntryResponse {
                player_id: e.player_id,
                nick: e.nick,
                losses: e.losses,
            })
            .collect(),
    ))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::get().to(ranking)));
}
