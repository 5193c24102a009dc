use mafia::repos::SessionStore;
use mafia::{Choice, GameCache, GameSession, Phase, RoleId};

use crate::support::session_setup::{open_table, settings_for};

const TABLE: &[RoleId] = &[
    RoleId::Don,
    RoleId::Doctor,
    RoleId::Civilian,
    RoleId::Civilian,
    RoleId::Civilian,
];

#[tokio::test]
async fn nothing_saved_restores_nothing() {
    let table = open_table(TABLE, 5).await.expect("table opens");
    let restored = GameSession::restore(table.chat_id - 1, settings_for(TABLE), table.deps.clone())
        .await
        .expect("store readable");
    assert!(restored.is_none());
}

#[tokio::test]
async fn unresolved_first_night_is_rewound_to_the_lobby() {
    let table = open_table(TABLE, 5).await.expect("table opens");
    let don = table.holder(RoleId::Don).await;
    let civilian = table.holder(RoleId::Civilian).await;
    let night = table.session.begin_night().await.expect("night opens");
    table
        .session
        .submit_action(don, RoleId::Don, Choice::Target { player: civilian }, night)
        .await
        .expect("don acts");

    let restored = GameSession::restore(table.chat_id, settings_for(TABLE), table.deps.clone())
        .await
        .expect("store readable")
        .expect("session saved");
    let game = restored.snapshot().await;
    assert_eq!(game.phase, Phase::Lobby);
    assert_eq!(game.night, 0);
    assert!(game.pending.is_empty());
    assert!(game.tracking.is_empty());
    assert!(game.prompts.is_empty());
    assert_eq!(table.messenger.deleted().len(), 2, "stale prompts are removed");

    let night = restored.begin_night().await.expect("night reopens");
    assert_eq!(night, 1);
    assert!(restored.snapshot().await.players.values().all(|p| p.alive));
}

#[tokio::test]
async fn unresolved_vote_is_rewound_and_ballots_dropped() {
    let table = open_table(TABLE, 5).await.expect("table opens");
    let don = table.holder(RoleId::Don).await;
    let civilian = table.holder(RoleId::Civilian).await;
    table.session.begin_night().await.expect("night opens");
    table.session.close_night().await.expect("night closes");
    let day = table.session.begin_vote().await.expect("vote opens");
    table.session.cast_ballot(civilian, don, day).await.expect("ballot");

    let restored = GameSession::restore(table.chat_id, settings_for(TABLE), table.deps.clone())
        .await
        .expect("store readable")
        .expect("session saved");
    let game = restored.snapshot().await;
    assert_eq!(game.phase, Phase::NightTally);
    assert_eq!(game.night, 1);
    assert!(game.ballots.is_empty());
    assert_eq!(restored.begin_vote().await.expect("vote reopens"), 1);
}

#[tokio::test]
async fn resolved_night_is_kept() {
    let table = open_table(TABLE, 5).await.expect("table opens");
    let don = table.holder(RoleId::Don).await;
    let civilian = table.holder(RoleId::Civilian).await;
    let night = table.session.begin_night().await.expect("night opens");
    table
        .session
        .submit_action(don, RoleId::Don, Choice::Target { player: civilian }, night)
        .await
        .expect("don acts");
    table.session.close_night().await.expect("night closes");

    let restored = GameSession::restore(table.chat_id, settings_for(TABLE), table.deps.clone())
        .await
        .expect("store readable")
        .expect("session saved");
    let game = restored.snapshot().await;
    assert_eq!(game.phase, Phase::NightTally);
    assert!(!game.is_alive(civilian));
}

#[tokio::test]
async fn finished_game_is_discarded_on_restore() {
    let table = open_table(TABLE, 5).await.expect("table opens");
    let mut game: GameCache = table.session.snapshot().await;
    game.phase = Phase::GameOver;
    table.store.save(&game).await.expect("saved");

    let restored = GameSession::restore(table.chat_id, settings_for(TABLE), table.deps.clone())
        .await
        .expect("store readable");
    assert!(restored.is_none());
    assert!(table.store.is_empty());
}

#[tokio::test]
async fn corrupted_state_is_fatal() {
    let table = open_table(TABLE, 5).await.expect("table opens");
    table.store.put_raw(table.chat_id, "{not json");
    let err = GameSession::restore(table.chat_id, settings_for(TABLE), table.deps.clone())
        .await
        .err()
        .expect("unreadable state");
    assert!(err.is_fatal());
    assert_eq!(err.code().as_str(), "STORE_CORRUPTED");
}
