use std::ops::ControlFlow;

use mafia::{Choice, Faction, Phase, RoleId};

use crate::support::session_setup::open_table;

const TABLE: &[RoleId] = &[
    RoleId::Don,
    RoleId::Doctor,
    RoleId::Civilian,
    RoleId::Civilian,
    RoleId::Civilian,
    RoleId::Civilian,
];

#[tokio::test]
async fn every_player_learns_their_role() {
    let table = open_table(TABLE, 6).await.expect("table opens");
    let game = table.session.snapshot().await;
    assert_eq!(game.phase, Phase::Lobby);
    assert_eq!(game.players.len(), 6);
    for id in &game.seating {
        assert!(table
            .messenger
            .texts_to(*id)
            .iter()
            .any(|t| t.starts_with("Your role:")));
    }
    assert_eq!(table.store.len(), 1);
}

#[tokio::test]
async fn unreachable_chats_do_not_stop_the_night() {
    let table = open_table(TABLE, 6).await.expect("table opens");
    let don = table.holder(RoleId::Don).await;
    let doctor = table.holder(RoleId::Doctor).await;
    table.messenger.set_unreachable(doctor);
    table.messenger.set_unreachable(table.chat_id);

    let night = table.session.begin_night().await.expect("night opens");
    assert_eq!(night, 1);
    assert!(table.messenger.prompts_to(doctor).is_empty());
    let game = table.session.snapshot().await;
    assert_eq!(game.phase, Phase::Night);
    assert!(game.prompts.iter().any(|p| p.recipient == don));
    assert!(game.prompts.iter().all(|p| p.recipient != doctor));
}

#[tokio::test]
async fn healed_night_then_the_town_hangs_the_don() {
    let table = open_table(TABLE, 6).await.expect("table opens");
    let don = table.holder(RoleId::Don).await;
    let doctor = table.holder(RoleId::Doctor).await;
    let civilians = table.holders(RoleId::Civilian).await;
    let victim = civilians[0];

    let night = table.session.begin_night().await.expect("night opens");
    assert_eq!(night, 1);
    assert_eq!(table.messenger.prompts_to(don).len(), 1);
    assert_eq!(table.messenger.prompts_to(doctor).len(), 1);
    assert!(table.messenger.prompts_to(victim).is_empty());

    table
        .session
        .submit_action(don, RoleId::Don, Choice::Target { player: victim }, night)
        .await
        .expect("don acts");
    table
        .session
        .submit_action(doctor, RoleId::Doctor, Choice::Target { player: victim }, night)
        .await
        .expect("doctor acts");
    assert_eq!(table.messenger.edited().len(), 2);

    let step = table.session.close_night().await.expect("night closes");
    assert_eq!(step, ControlFlow::Continue(()));
    let game = table.session.snapshot().await;
    assert!(game.players.values().all(|p| p.alive));
    assert!(game.prompts.is_empty());
    assert_eq!(table.messenger.deleted().len(), 2);
    assert!(table
        .messenger
        .texts_to(table.chat_id)
        .iter()
        .any(|t| t.contains("Nobody died")));

    let day = table.session.begin_vote().await.expect("vote opens");
    assert_eq!(day, 1);
    for voter in game.seating.iter().copied().filter(|id| *id != don) {
        table.session.cast_ballot(voter, don, day).await.expect("ballot");
    }
    table
        .session
        .cast_ballot(don, victim, day)
        .await
        .expect("don votes too");

    let outcome = match table.session.close_vote().await.expect("vote closes") {
        ControlFlow::Break(outcome) => outcome,
        ControlFlow::Continue(()) => panic!("hanging the only criminal ends the game"),
    };
    assert_eq!(outcome.winner, Faction::Civilians);
    assert_eq!(table.session.snapshot().await.phase, Phase::GameOver);

    let summary = table.session.finish(outcome).await.expect("settled");
    assert_eq!(summary.nights, 1);
    assert_eq!(summary.results.len(), 6);
    assert!(table.store.is_empty(), "finished sessions are removed");
    assert_eq!(table.results.results().len(), 6);

    let don_result = summary
        .results
        .iter()
        .find(|r| r.player_id == don)
        .expect("don settled");
    assert!(!don_result.is_winner);
    assert_eq!(table.results.balance(don), 0);

    // doctor: saved a civilian (5), bounty on the don (15), victory (20), one night (4)
    assert_eq!(table.results.balance(doctor), 5 + 15 + 20 + 4);
    // civilian: bounty (15), victory (20), one night (12)
    assert_eq!(table.results.balance(victim), 15 + 20 + 12);
}

#[tokio::test]
async fn offline_results_store_does_not_block_settlement() {
    let table = open_table(TABLE, 6).await.expect("table opens");
    let don = table.holder(RoleId::Don).await;
    table.results.set_offline(true);

    table.session.begin_night().await.expect("night opens");
    table.session.drop_out(don).await.expect("don leaves");
    let outcome = match table.session.close_night().await.expect("night closes") {
        ControlFlow::Break(outcome) => outcome,
        ControlFlow::Continue(()) => panic!("the family is gone"),
    };

    let summary = table.session.finish(outcome).await.expect("settled");
    assert_eq!(summary.results.len(), 6);
    assert!(table.results.results().is_empty());
    assert!(table.store.is_empty());
    for result in &summary.results {
        assert!(table
            .messenger
            .texts_to(result.player_id)
            .contains(&result.summary));
    }
}

#[tokio::test]
async fn unprotected_victim_dies_on_night_one() {
    let table = open_table(TABLE, 6).await.expect("table opens");
    let don = table.holder(RoleId::Don).await;
    let doctor = table.holder(RoleId::Doctor).await;
    let civilians = table.holders(RoleId::Civilian).await;

    let night = table.session.begin_night().await.expect("night opens");
    table
        .session
        .submit_action(don, RoleId::Don, Choice::Target { player: civilians[0] }, night)
        .await
        .expect("don acts");
    table
        .session
        .submit_action(doctor, RoleId::Doctor, Choice::Target { player: civilians[1] }, night)
        .await
        .expect("doctor acts");
    table.session.close_night().await.expect("night closes");

    let game = table.session.snapshot().await;
    let victim = game.player(civilians[0]).expect("seated");
    assert!(!victim.alive);
    assert_eq!(victim.night_of_death, Some(1));
    assert_eq!(game.player(don).map(|p| p.money), Some(5));
    assert!(table
        .messenger
        .texts_to(civilians[0])
        .iter()
        .any(|t| t == "You were killed tonight."));
}

#[tokio::test]
async fn idle_table_ends_when_the_family_is_dropped() {
    let table = open_table(TABLE, 6).await.expect("table opens");
    let don = table.holder(RoleId::Don).await;

    let summary = table.session.run().await.expect("game finishes");
    assert_eq!(summary.outcome.winner, Faction::Civilians);
    assert_eq!(summary.nights, 1);

    let don_result = summary
        .results
        .iter()
        .find(|r| r.player_id == don)
        .expect("don settled");
    assert!(!don_result.is_winner);
    let winners = summary.results.iter().filter(|r| r.is_winner).count();
    assert_eq!(winners, 4);
    assert!(table
        .messenger
        .texts_to(table.chat_id)
        .iter()
        .any(|t| t.contains("slept through the game")));
}

#[tokio::test]
async fn leaving_the_game_counts_at_the_next_tally() {
    let table = open_table(TABLE, 6).await.expect("table opens");
    let don = table.holder(RoleId::Don).await;

    table.session.begin_night().await.expect("night opens");
    table.session.drop_out(don).await.expect("don leaves");
    let game = table.session.snapshot().await;
    assert!(game.player(don).is_some_and(|p| p.dropped_out && !p.alive));
    assert!(table
        .messenger
        .texts_to(table.chat_id)
        .iter()
        .any(|t| t.contains("left the game")));

    match table.session.close_night().await.expect("night closes") {
        ControlFlow::Break(outcome) => assert_eq!(outcome.winner, Faction::Civilians),
        ControlFlow::Continue(()) => panic!("no criminals are left"),
    }
}
