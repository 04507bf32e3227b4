use actix_web::web;

pub mod games;
pub mod health;
pub mod players;
pub mod ranking;

/// Configure application routes for tests and non-HttpServer contexts.
///
/// In production, `main.rs` wires these under the same paths with the
/// middleware stack (CORS, structured logging, request tracing). For tests
/// we register the same paths without those wrappers so that endpoint
/// behavior can be exercised directly.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Root greeting
    cfg.service(web::resource("/").route(web::get().to(health::root)));

    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Player routes: /api/players/**
    cfg.service(web::scope("/api/players").configure(players::configure_routes));

    // Game routes: /api/games/**
    cfg.service(web::scope("/api/games").configure(games::configure_routes));

    // Ranking routes: /api/ranking
    cfg.service(web::scope("/api/ranking").configure(ranking::configure_routes));
}
