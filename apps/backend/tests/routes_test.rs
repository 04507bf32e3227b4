//! HTTP-level tests: the JSON surface, status codes, and problem+json
//! error rendering.

use actix_web::{test, web, App};
use backend::routes;
use backend::state::app_state::AppState;
use backend::test_support::connect_test_db;
use serde_json::{json, Value};

macro_rules! test_app {
    () => {{
        let db = connect_test_db().await;
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new(db)))
                .configure(routes::configure),
        )
        .await
    }};
}

async fn register_player<S, B>(app: &S, name: &str, nick: &str) -> i64
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: actix_web::body::MessageBody + Unpin,
{
    let req = test::TestRequest::post()
        .uri("/api/players")
        .set_json(json!({"name": name, "nick": nick}))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 201, "player registration should succeed");
    let body: Value = test::read_body_json(resp).await;
    body["id"].as_i64().expect("player id")
}

#[actix_web::test]
async fn register_create_and_play_a_game() {
    let app = test_app!();

    let p1 = register_player(&app, "Ana Souza", "ana").await;
    let p2 = register_player(&app, "Bruno Lima", "bru").await;

    // Create the game
    let req = test::TestRequest::post()
        .uri("/api/games")
        .set_json(json!({"participants": [p1, p2], "dealer_id": p1}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let game: Value = test::read_body_json(resp).await;
    let game_id = game["id"].as_i64().unwrap();
    assert_eq!(game["current_dealer_id"].as_i64(), Some(p1));
    assert!(game["ended_at"].is_null());

    // A quiet round rotates the dealer
    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{game_id}/rounds"))
        .set_json(json!({"scores": {p1.to_string(): "30", p2.to_string(): "40"}}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let round: Value = test::read_body_json(resp).await;
    assert_eq!(round["round_no"].as_i64(), Some(1));
    assert_eq!(round["game_over"].as_bool(), Some(false));
    assert_eq!(round["current_dealer_id"].as_i64(), Some(p2));

    // The next round pushes p1 to the threshold
    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{game_id}/rounds"))
        .set_json(json!({"scores": {p1.to_string(): "70"}}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let round: Value = test::read_body_json(resp).await;
    assert_eq!(round["game_over"].as_bool(), Some(true));
    assert_eq!(round["loser_id"].as_i64(), Some(p1));

    // Detail view recomputes totals and shows the finished game
    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{game_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let detail: Value = test::read_body_json(resp).await;
    assert_eq!(detail["totals"][p1.to_string()].as_i64(), Some(100));
    assert_eq!(detail["rounds"].as_array().unwrap().len(), 2);
    assert!(!detail["ended_at"].is_null());

    // A finished game rejects further rounds
    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{game_id}/rounds"))
        .set_json(json!({"scores": {p2.to_string(): "10"}}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);
    let problem: Value = test::read_body_json(resp).await;
    assert_eq!(problem["code"].as_str(), Some("GAME_ALREADY_FINISHED"));

    // History and ranking reflect the result
    let req = test::TestRequest::get().uri("/api/games").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let history: Value = test::read_body_json(resp).await;
    assert_eq!(history.as_array().unwrap().len(), 1);

    let req = test::TestRequest::get().uri("/api/ranking").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let ranking: Value = test::read_body_json(resp).await;
    let entries = ranking.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["nick"].as_str(), Some("bru"));
    assert_eq!(entries[0]["losses"].as_u64(), Some(0));
    assert_eq!(entries[1]["nick"].as_str(), Some("ana"));
    assert_eq!(entries[1]["losses"].as_u64(), Some(1));
}

#[actix_web::test]
async fn errors_render_problem_details() {
    let app = test_app!();

    let p1 = register_player(&app, "Ana Souza", "ana").await;
    let p2 = register_player(&app, "Bruno Lima", "bru").await;

    // Duplicate nick -> 409 NICK_TAKEN
    let req = test::TestRequest::post()
        .uri("/api/players")
        .set_json(json!({"name": "Another Ana", "nick": "ana"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert_eq!(content_type, "application/problem+json");
    let problem: Value = test::read_body_json(resp).await;
    assert_eq!(problem["code"].as_str(), Some("NICK_TAKEN"));
    assert_eq!(problem["status"].as_u64(), Some(409));

    // Single participant -> 422 TOO_FEW_PARTICIPANTS
    let req = test::TestRequest::post()
        .uri("/api/games")
        .set_json(json!({"participants": [p1], "dealer_id": p1}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);
    let problem: Value = test::read_body_json(resp).await;
    assert_eq!(problem["code"].as_str(), Some("TOO_FEW_PARTICIPANTS"));

    // Non-numeric score -> 422 INVALID_SCORE, whole round rejected
    let req = test::TestRequest::post()
        .uri("/api/games")
        .set_json(json!({"participants": [p1, p2], "dealer_id": p1}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let game: Value = test::read_body_json(resp).await;
    let game_id = game["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{game_id}/rounds"))
        .set_json(json!({"scores": {p1.to_string(): "30", p2.to_string(): "a lot"}}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);
    let problem: Value = test::read_body_json(resp).await;
    assert_eq!(problem["code"].as_str(), Some("INVALID_SCORE"));

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{game_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let detail: Value = test::read_body_json(resp).await;
    assert_eq!(detail["rounds"].as_array().unwrap().len(), 0);

    // Unknown game -> 404 GAME_NOT_FOUND
    let req = test::TestRequest::get().uri("/api/games/9999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let problem: Value = test::read_body_json(resp).await;
    assert_eq!(problem["code"].as_str(), Some("GAME_NOT_FOUND"));
}

#[actix_web::test]
async fn health_endpoint_reports_ok() {
    let app = test_app!();

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let health: Value = test::read_body_json(resp).await;
    assert_eq!(health["status"].as_str(), Some("ok"));
    assert_eq!(health["db"].as_str(), Some("ok"));
    assert!(health["migrations"].as_str().unwrap().contains("init"));
}
