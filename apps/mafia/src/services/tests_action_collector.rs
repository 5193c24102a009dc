use crate::domain::test_state_helpers::{cache_with_roles, kill};
use crate::domain::{Choice, DeathCause, GameCache, Phase, RoleId};
use crate::error::GameError;
use crate::errors::RejectionKind;
use crate::roles::catalog;
use crate::services::action_collector::{allowed_targets, cancel, cast_ballot, eligible_actors, submit};

fn rejection(err: GameError) -> RejectionKind {
    match err {
        GameError::Rejected(r) => r.kind,
        other => panic!("expected a rejection, got {other:?}"),
    }
}

fn next_night(game: &mut GameCache) {
    game.pending.clear();
    game.night += 1;
}

fn target(player: i64) -> Choice {
    Choice::Target { player }
}

fn visitors(game: &GameCache, target: i64) -> Vec<i64> {
    game.tracking
        .on_night(game.night)
        .filter(|v| v.target == target)
        .map(|v| v.actor)
        .collect()
}

#[test]
fn doctor_self_heal_cooldown() {
    let mut game = cache_with_roles(&[RoleId::Don, RoleId::Doctor, RoleId::Civilian, RoleId::Civilian]);
    submit(&mut game, 1, 2, RoleId::Doctor, target(2)).expect("self heal on night 1");

    next_night(&mut game);
    let doctor = catalog::resolve(RoleId::Doctor);
    assert!(!allowed_targets(&game, 2, doctor).contains(&2));
    let err = submit(&mut game, 2, 2, RoleId::Doctor, target(2)).expect_err("self heal resting");
    assert_eq!(rejection(err), RejectionKind::TargetExcluded);

    next_night(&mut game);
    assert!(!allowed_targets(&game, 2, doctor).contains(&2));
    next_night(&mut game);
    assert!(allowed_targets(&game, 2, doctor).contains(&2));
}

#[test]
fn doctor_cannot_heal_the_same_player_two_nights_running() {
    let mut game = cache_with_roles(&[RoleId::Don, RoleId::Doctor, RoleId::Civilian, RoleId::Civilian]);
    submit(&mut game, 1, 2, RoleId::Doctor, target(3)).expect("night 1");
    next_night(&mut game);
    let doctor = catalog::resolve(RoleId::Doctor);
    assert_eq!(allowed_targets(&game, 2, doctor), vec![1, 2, 4]);
    next_night(&mut game);
    assert!(allowed_targets(&game, 2, doctor).contains(&3));
}

#[test]
fn resubmission_replaces_action_and_ledger_entry() {
    let mut game = cache_with_roles(&[RoleId::Don, RoleId::Doctor, RoleId::Civilian, RoleId::Civilian]);
    let first = submit(&mut game, 1, 1, RoleId::Don, target(3)).expect("first");
    assert!(!first.replaced);
    let second = submit(&mut game, 1, 1, RoleId::Don, target(4)).expect("second");
    assert!(second.replaced);
    assert!(second.seq > first.seq);
    assert_eq!(game.pending[&1].choice, target(4));
    assert!(visitors(&game, 3).is_empty());
    assert_eq!(visitors(&game, 4), vec![1]);
}

#[test]
fn rejected_resubmission_keeps_previous_action() {
    let mut game = cache_with_roles(&[RoleId::Don, RoleId::Doctor, RoleId::Civilian, RoleId::Civilian]);
    submit(&mut game, 1, 2, RoleId::Doctor, target(3)).expect("first");
    let err = submit(&mut game, 1, 2, RoleId::Doctor, target(99)).expect_err("unknown target");
    assert_eq!(rejection(err), RejectionKind::TargetNotAlive);
    assert_eq!(game.pending[&2].choice, target(3));
    assert_eq!(visitors(&game, 3), vec![2]);
}

#[test]
fn stale_submissions_are_flagged() {
    let mut game = cache_with_roles(&[RoleId::Don, RoleId::Doctor, RoleId::Civilian]);
    let err = submit(&mut game, 0, 1, RoleId::Don, target(3)).expect_err("old night");
    assert!(matches!(err, GameError::StaleSubmission { night: 0 }));
    game.phase = Phase::Vote;
    let err = submit(&mut game, 1, 1, RoleId::Don, target(3)).expect_err("wrong phase");
    assert!(matches!(err, GameError::StaleSubmission { .. }));
}

#[test]
fn only_the_boss_acts_for_single_actor_slots() {
    let mut game = cache_with_roles(&[RoleId::Don, RoleId::Doctor, RoleId::Nurse, RoleId::Civilian]);
    let err = submit(&mut game, 1, 3, RoleId::Nurse, target(4)).expect_err("nurse waits");
    assert_eq!(rejection(err), RejectionKind::NotRoleHolder);
    let err = submit(&mut game, 1, 2, RoleId::Don, target(4)).expect_err("not a don");
    assert_eq!(rejection(err), RejectionKind::NotRoleHolder);
}

#[test]
fn every_family_member_votes_for_the_kill() {
    let mut game = cache_with_roles(&[RoleId::Don, RoleId::Mafia, RoleId::Doctor, RoleId::Civilian]);
    let accepted = submit(&mut game, 1, 2, RoleId::Mafia, target(3)).expect("mafia votes");
    assert_eq!(accepted.night, 1);
    assert_eq!(game.pending[&2].slot, RoleId::Don);
    let err = submit(&mut game, 1, 1, RoleId::Don, target(2)).expect_err("teammate");
    assert_eq!(rejection(err), RejectionKind::TargetExcluded);
}

#[test]
fn traitor_rests_on_odd_nights() {
    let mut game = cache_with_roles(&[RoleId::Don, RoleId::Traitor, RoleId::Civilian, RoleId::Civilian]);
    let err = submit(&mut game, 1, 2, RoleId::Traitor, target(3)).expect_err("odd night");
    assert_eq!(rejection(err), RejectionKind::RoleResting);
    assert!(eligible_actors(&game).iter().all(|(_, role)| role.id != RoleId::Traitor));
    next_night(&mut game);
    submit(&mut game, 2, 2, RoleId::Traitor, target(3)).expect("even night");
}

#[test]
fn dead_players_and_unsupported_choices_are_rejected() {
    let mut game = cache_with_roles(&[RoleId::Don, RoleId::Doctor, RoleId::Civilian, RoleId::Civilian]);
    let err = submit(&mut game, 1, 2, RoleId::Doctor, Choice::Inspect { player: 3 })
        .expect_err("doctors do not inspect");
    assert_eq!(rejection(err), RejectionKind::ChoiceNotSupported);
    kill(&mut game, 2, DeathCause::Night);
    let err = submit(&mut game, 1, 2, RoleId::Doctor, target(3)).expect_err("dead doctor");
    assert_eq!(rejection(err), RejectionKind::ActorNotAlive);
}

#[test]
fn poison_release_needs_poisoned_players() {
    let mut game = cache_with_roles(&[RoleId::Don, RoleId::Poisoner, RoleId::Civilian, RoleId::Civilian]);
    let err = submit(&mut game, 1, 2, RoleId::Poisoner, Choice::ReleasePoison).expect_err("empty");
    assert_eq!(rejection(err), RejectionKind::ChoiceNotSupported);
    game.poisoned.push(3);
    submit(&mut game, 1, 2, RoleId::Poisoner, Choice::ReleasePoison).expect("release");
}

#[test]
fn cancel_withdraws_action() {
    let mut game = cache_with_roles(&[RoleId::Don, RoleId::Doctor, RoleId::Civilian]);
    submit(&mut game, 1, 2, RoleId::Doctor, target(3)).expect("submit");
    assert!(cancel(&mut game, 2).expect("night is open"));
    assert!(game.pending.is_empty());
    assert!(game.tracking.is_empty());
    assert!(!cancel(&mut game, 2).expect("night is open"));
}

#[test]
fn cancel_after_the_night_closed_keeps_the_cooldown() {
    let mut game = cache_with_roles(&[
        RoleId::Don,
        RoleId::Doctor,
        RoleId::Civilian,
        RoleId::Civilian,
        RoleId::Civilian,
        RoleId::Civilian,
    ]);
    submit(&mut game, 1, 2, RoleId::Doctor, target(3)).expect("heal");
    game.phase = Phase::Vote;

    let err = cancel(&mut game, 2).expect_err("window closed");
    assert_eq!(rejection(err), RejectionKind::PhaseMismatch);
    assert_eq!(game.tracking.len(), 1);

    next_night(&mut game);
    game.phase = Phase::Night;
    let allowed = allowed_targets(&game, 2, catalog::resolve(RoleId::Doctor));
    assert!(!allowed.contains(&3));
}

#[test]
fn ballots_follow_vote_rules() {
    let mut game = cache_with_roles(&[RoleId::Don, RoleId::Doctor, RoleId::Civilian, RoleId::Civilian]);
    game.phase = Phase::Vote;
    game.arrested.insert(4);
    assert!(!cast_ballot(&mut game, 1, 2, 1).expect("ballot"));
    assert!(cast_ballot(&mut game, 1, 2, 3).expect("overwrite"));
    let err = cast_ballot(&mut game, 1, 4, 1).expect_err("arrested");
    assert_eq!(rejection(err), RejectionKind::VoterArrested);
    let err = cast_ballot(&mut game, 1, 3, 3).expect_err("self");
    assert_eq!(rejection(err), RejectionKind::TargetExcluded);
    let err = cast_ballot(&mut game, 2, 3, 1).expect_err("stale");
    assert!(matches!(err, GameError::StaleSubmission { night: 2 }));
}
