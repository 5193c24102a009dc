use crate::domain::test_state_helpers::cache_with_roles;
use crate::domain::{DeathCause, Faction, GameCache, Phase, Prediction, RoleId};
use crate::errors::domain::RejectionKind;
use crate::services::action_collector::{cast_ballot, retract_ballot};
use crate::services::vote_resolver::{resolve_vote, tally};
use crate::GameError;

fn voting(roles: &[RoleId]) -> GameCache {
    let mut game = cache_with_roles(roles);
    game.phase = Phase::Vote;
    game
}

fn vote(game: &mut GameCache, voter: i64, target: i64) {
    let night = game.night;
    cast_ballot(game, night, voter, target).expect("ballot accepted");
}

fn rejection(err: GameError) -> RejectionKind {
    match err {
        GameError::Rejected(r) => r.kind,
        other => panic!("expected a rejection, got {other:?}"),
    }
}

#[test]
fn even_split_lynches_nobody() {
    let mut game = voting(&[
        RoleId::Don,
        RoleId::Mafia,
        RoleId::Civilian,
        RoleId::Civilian,
        RoleId::Civilian,
        RoleId::Civilian,
        RoleId::Civilian,
    ]);
    for voter in [1, 2, 5] {
        vote(&mut game, voter, 3);
    }
    for voter in [3, 6, 7] {
        vote(&mut game, voter, 4);
    }
    let report = resolve_vote(&mut game);

    assert_eq!(report.tally.get(&3), Some(&3));
    assert_eq!(report.tally.get(&4), Some(&3));
    assert_eq!(report.lynched, None);
    assert!(game.players.values().all(|p| p.alive));
    assert!(report
        .outbox
        .notices()
        .iter()
        .any(|n| n.text.contains("Nobody was lynched")));
    assert!(game.ballots.is_empty());
}

#[test]
fn prime_minister_counts_twice() {
    let mut game = voting(&[
        RoleId::Don,
        RoleId::PrimeMinister,
        RoleId::Civilian,
        RoleId::Civilian,
    ]);
    vote(&mut game, 1, 3);
    vote(&mut game, 4, 3);
    vote(&mut game, 2, 1);
    assert_eq!(tally(&game).get(&1), Some(&2));

    vote(&mut game, 3, 1);
    let report = resolve_vote(&mut game);
    assert_eq!(report.lynched, Some(1));
    let don = game.player(1).expect("seated");
    assert!(!don.alive);
    assert_eq!(don.death_cause, Some(DeathCause::Vote));
    assert_eq!(report.outcome.map(|o| o.winner), Some(Faction::Civilians));
}

#[test]
fn opposing_voters_collect_a_bounty() {
    let mut game = voting(&[
        RoleId::Don,
        RoleId::Mafia,
        RoleId::Civilian,
        RoleId::Civilian,
        RoleId::Civilian,
    ]);
    vote(&mut game, 2, 1);
    vote(&mut game, 3, 1);
    vote(&mut game, 4, 1);
    resolve_vote(&mut game);

    let money = |id: i64| game.player(id).map(|p| p.money);
    assert_eq!(money(3), Some(15));
    assert_eq!(money(4), Some(15));
    assert_eq!(money(2), Some(0), "no bounty for voting out your own");
    assert_eq!(money(5), Some(0));
}

#[test]
fn lawyer_shield_blocks_the_lynch() {
    let mut game = voting(&[
        RoleId::Don,
        RoleId::Lawyer,
        RoleId::Civilian,
        RoleId::Civilian,
    ]);
    game.vote_shield.insert(3);
    vote(&mut game, 1, 3);
    vote(&mut game, 4, 3);
    let report = resolve_vote(&mut game);

    assert_eq!(report.lynched, None);
    assert_eq!(report.shielded, Some(3));
    assert!(game.is_alive(3));
    assert_eq!(game.player(2).map(|p| p.money), Some(5));
    assert!(report
        .outbox
        .notices()
        .iter()
        .any(|n| n.text.contains("lawyer won the case")));
    assert!(game.vote_shield.is_empty());
}

#[test]
fn arrested_voter_cannot_vote_and_is_not_counted() {
    let mut game = voting(&[RoleId::Don, RoleId::Civilian, RoleId::Civilian, RoleId::Civilian]);
    game.arrested.insert(2);
    let err = cast_ballot(&mut game, 1, 2, 1).expect_err("arrested");
    assert_eq!(rejection(err), RejectionKind::VoterArrested);

    game.ballots.insert(2, 1);
    vote(&mut game, 3, 1);
    assert_eq!(tally(&game).get(&1), Some(&1));
}

#[test]
fn ballot_validation() {
    let mut game = voting(&[RoleId::Don, RoleId::Civilian, RoleId::Civilian, RoleId::Civilian]);
    assert_eq!(
        rejection(cast_ballot(&mut game, 1, 2, 2).expect_err("self vote")),
        RejectionKind::TargetExcluded
    );
    assert!(matches!(
        cast_ballot(&mut game, 7, 2, 1),
        Err(GameError::StaleSubmission { night: 7 })
    ));

    assert_eq!(cast_ballot(&mut game, 1, 2, 1).ok(), Some(false));
    assert_eq!(cast_ballot(&mut game, 1, 2, 3).ok(), Some(true), "revote replaces");
    assert!(retract_ballot(&mut game, 2).expect("vote is open"));
    assert!(!retract_ballot(&mut game, 2).expect("vote is open"));

    vote(&mut game, 3, 1);
    game.phase = Phase::VoteTally;
    let err = retract_ballot(&mut game, 3).expect_err("vote closed");
    assert_eq!(rejection(err), RejectionKind::PhaseMismatch);
    assert_eq!(game.ballots.get(&3), Some(&1));
    game.phase = Phase::Night;
    assert!(matches!(
        cast_ballot(&mut game, 1, 2, 1),
        Err(GameError::StaleSubmission { .. })
    ));
}

#[test]
fn lynched_masochist_wins_alone() {
    let mut game = voting(&[
        RoleId::Don,
        RoleId::Masochist,
        RoleId::Civilian,
        RoleId::Civilian,
        RoleId::Civilian,
    ]);
    vote(&mut game, 1, 2);
    vote(&mut game, 3, 2);
    let report = resolve_vote(&mut game);
    assert_eq!(report.lynched, Some(2));
    assert!(game.solo_winners.contains(&2));
    assert_eq!(report.outcome, None);
    assert!(report.outbox.for_player(2).any(|t| t.contains("Congratulations")));
}

#[test]
fn lynched_angel_is_granted_revenge() {
    let mut game = voting(&[
        RoleId::Don,
        RoleId::AngelOfDeath,
        RoleId::Civilian,
        RoleId::Civilian,
        RoleId::Civilian,
    ]);
    vote(&mut game, 1, 2);
    vote(&mut game, 3, 2);
    let report = resolve_vote(&mut game);
    assert!(game.revenge_pending.contains(&2));
    assert!(report.outbox.for_player(2).any(|t| t.contains("revenge")));
}

#[test]
fn analyst_hears_how_the_forecast_went() {
    let mut game = voting(&[RoleId::Don, RoleId::Analyst, RoleId::Civilian, RoleId::Civilian]);
    game.prediction = Some(Prediction::Lynch { player: 3 });
    vote(&mut game, 1, 3);
    let report = resolve_vote(&mut game);
    assert!(report.outbox.for_player(2).any(|t| t == "Brilliant deduction!"));
    assert_eq!(game.prediction, None);

    let mut game = voting(&[RoleId::Don, RoleId::Analyst, RoleId::Civilian, RoleId::Civilian]);
    game.prediction = Some(Prediction::NoLynch);
    vote(&mut game, 1, 3);
    let report = resolve_vote(&mut game);
    assert!(report
        .outbox
        .for_player(2)
        .any(|t| t == "Your intuition failed you today."));
}
