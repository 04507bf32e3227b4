//! Player service tests: registration, identity edits, the delete cascade,
//! and the loss ranking.

use std::collections::BTreeMap;

use backend::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use backend::repos::{games, rounds};
use backend::services::game_flow::GameFlowService;
use backend::services::players::PlayerService;
use backend::test_support::connect_test_db;
use sea_orm::TransactionTrait;

fn submitted(entries: &[(i64, &str)]) -> BTreeMap<i64, Option<String>> {
    entries
        .iter()
        .map(|(id, value)| (*id, Some(value.to_string())))
        .collect()
}

#[tokio::test]
async fn register_and_list_players() {
    let db = connect_test_db().await;
    let txn = db.begin().await.unwrap();
    let service = PlayerService::new();

    let ana = service.register(&txn, "Ana Souza", "ana").await.unwrap();
    let bruno = service.register(&txn, "Bruno Lima", "bru").await.unwrap();

    let listed = service.list(&txn).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().any(|p| p.id == ana.id));
    assert!(listed.iter().any(|p| p.id == bruno.id));
    // Newest first
    assert!(listed[0].created_at >= listed[1].created_at);

    txn.commit().await.unwrap();
}

#[tokio::test]
async fn blank_fields_are_rejected() {
    let db = connect_test_db().await;
    let txn = db.begin().await.unwrap();
    let service = PlayerService::new();

    let err = service.register(&txn, "  ", "ana").await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_, _)));

    let err = service.register(&txn, "Ana", "").await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_, _)));

    txn.commit().await.unwrap();
}

#[tokio::test]
async fn duplicate_nick_is_rejected() {
    let db = connect_test_db().await;
    let txn = db.begin().await.unwrap();
    let service = PlayerService::new();

    service.register(&txn, "Ana Souza", "ana").await.unwrap();
    let err = service.register(&txn, "Another Ana", "ana").await.unwrap_err();

    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::NickTaken, _)
    ));

    txn.commit().await.unwrap();
}

#[tokio::test]
async fn update_checks_nick_conflicts_against_others_only() {
    let db = connect_test_db().await;
    let txn = db.begin().await.unwrap();
    let service = PlayerService::new();

    let ana = service.register(&txn, "Ana Souza", "ana").await.unwrap();
    service.register(&txn, "Bruno Lima", "bru").await.unwrap();

    // Keeping the own nick while renaming is fine
    let updated = service
        .update(&txn, ana.id, "Ana S. Lima", "ana")
        .await
        .unwrap();
    assert_eq!(updated.name, "Ana S. Lima");
    assert_eq!(updated.nick, "ana");

    // Taking someone else's nick is a conflict
    let err = service
        .update(&txn, ana.id, "Ana S. Lima", "bru")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::NickTaken, _)
    ));

    // Unknown player id
    let err = service.update(&txn, 9999, "Ghost", "ghost").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Player, _)));

    txn.commit().await.unwrap();
}

#[tokio::test]
async fn delete_player_cascades_to_their_games() {
    let db = connect_test_db().await;
    let txn = db.begin().await.unwrap();
    let players = PlayerService::new();
    let flow = GameFlowService::new();

    let ana = players.register(&txn, "Ana", "ana").await.unwrap();
    let bruno = players.register(&txn, "Bruno", "bru").await.unwrap();
    let carla = players.register(&txn, "Carla", "carla").await.unwrap();

    // Bruno plays in both games; Carla only in the second
    let game1 = flow.create_game(&txn, &[ana.id, bruno.id], ana.id).await.unwrap();
    let game2 = flow
        .create_game(&txn, &[bruno.id, carla.id], bruno.id)
        .await
        .unwrap();
    flow.record_round(&txn, game1.id, &submitted(&[(ana.id, "10")]))
        .await
        .unwrap();

    let deleted = players.delete(&txn, bruno.id).await.unwrap();
    assert_eq!(deleted.player.id, bruno.id);
    assert_eq!(deleted.games_removed, 2);

    // Games and their rounds are gone; other players survive
    assert!(games::find_by_id(&txn, game1.id).await.unwrap().is_none());
    assert!(games::find_by_id(&txn, game2.id).await.unwrap().is_none());
    assert!(rounds::find_all_by_game(&txn, game1.id).await.unwrap().is_empty());

    let remaining = players.list(&txn).await.unwrap();
    let ids: Vec<i64> = remaining.iter().map(|p| p.id).collect();
    assert!(ids.contains(&ana.id));
    assert!(ids.contains(&carla.id));
    assert!(!ids.contains(&bruno.id));

    txn.commit().await.unwrap();
}

#[tokio::test]
async fn deleting_unknown_player_is_not_found() {
    let db = connect_test_db().await;
    let txn = db.begin().await.unwrap();

    let err = PlayerService::new().delete(&txn, 424242).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Player, _)));

    txn.commit().await.unwrap();
}

#[tokio::test]
async fn ranking_counts_losses_ascending() {
    let db = connect_test_db().await;
    let txn = db.begin().await.unwrap();
    let players = PlayerService::new();
    let flow = GameFlowService::new();

    let ana = players.register(&txn, "Ana", "ana").await.unwrap();
    let bruno = players.register(&txn, "Bruno", "bru").await.unwrap();
    let carla = players.register(&txn, "Carla", "carla").await.unwrap();

    // Ana loses one game; the other game is still in progress
    let lost = flow
        .create_game(&txn, &[ana.id, bruno.id], ana.id)
        .await
        .unwrap();
    flow.record_round(&txn, lost.id, &submitted(&[(ana.id, "100")]))
        .await
        .unwrap();

    let open = flow
        .create_game(&txn, &[bruno.id, carla.id], bruno.id)
        .await
        .unwrap();
    flow.record_round(&txn, open.id, &submitted(&[(carla.id, "50")]))
        .await
        .unwrap();

    let ranking = players.ranking(&txn).await.unwrap();
    assert_eq!(ranking.len(), 3);

    // Zero-loss players first (tie broken by nick), the loser last
    assert_eq!(ranking[0].nick, "bru");
    assert_eq!(ranking[0].losses, 0);
    assert_eq!(ranking[1].nick, "carla");
    assert_eq!(ranking[1].losses, 0);
    assert_eq!(ranking[2].nick, "ana");
    assert_eq!(ranking[2].losses, 1);

    txn.commit().await.unwrap();
}
