use crate::config::RewardRules;
use crate::domain::test_state_helpers::{cache_with_roles, kill};
use crate::domain::{DeathCause, Faction, GameCache, Outcome, RoleId};
use crate::services::reward_ledger::{settle, PersonalResult};

fn result(results: &[PersonalResult], id: i64) -> &PersonalResult {
    results
        .iter()
        .find(|r| r.player_id == id)
        .expect("every seated player is settled")
}

fn civilian_win() -> (GameCache, Outcome) {
    let mut game = cache_with_roles(&[RoleId::Don, RoleId::Doctor, RoleId::Civilian, RoleId::Civilian]);
    game.night = 2;
    game.credit(&[2], 15, "Saved @p3 (Civilian)");
    game.credit(&[1], 5, "Murder of @p4 (Civilian)");
    kill(&mut game, 1, DeathCause::Vote);
    let outcome = Outcome {
        winner: Faction::Civilians,
        solo: None,
        night: 2,
    };
    (game, outcome)
}

#[test]
fn winners_keep_earnings_plus_victory_and_losers_forfeit() {
    let (game, outcome) = civilian_win();
    let results = settle(&game, &outcome, &RewardRules::default());
    assert_eq!(results.len(), 4);

    let don = result(&results, 1);
    assert!(!don.is_winner);
    assert_eq!(don.money, 0);
    assert_eq!(don.nights_lived, 2);

    let doctor = result(&results, 2);
    assert!(doctor.is_winner);
    assert_eq!(doctor.money, 15 + 20 + 4 * 2);
    assert_eq!(doctor.achievements.len(), 1);
    assert!(doctor.summary.starts_with("You won as Doctor"));

    let civilian = result(&results, 3);
    assert_eq!(civilian.money, 20 + 12 * 2);
    assert_eq!(civilian.total_nights, 2);
    assert_eq!(civilian.chat_id, game.chat_id);
}

#[test]
fn settling_twice_gives_identical_results() {
    let (game, outcome) = civilian_win();
    let rules = RewardRules::default();
    assert_eq!(settle(&game, &outcome, &rules), settle(&game, &outcome, &rules));
}

#[test]
fn drop_outs_lose_even_when_their_side_wins() {
    let (mut game, outcome) = civilian_win();
    kill(&mut game, 3, DeathCause::Dropout);
    if let Some(p) = game.player_mut(3) {
        p.dropped_out = true;
    }
    let results = settle(&game, &outcome, &RewardRules::default());
    let dropped = result(&results, 3);
    assert!(!dropped.is_winner);
    assert_eq!(dropped.money, 0);
}

#[test]
fn early_solo_winner_is_paid_and_reported_under_initial_role() {
    let mut game = cache_with_roles(&[
        RoleId::Don,
        RoleId::Masochist,
        RoleId::Civilian,
        RoleId::Civilian,
    ]);
    kill(&mut game, 2, DeathCause::Vote);
    game.solo_winners.insert(2);
    game.night = 3;
    let outcome = Outcome {
        winner: Faction::Criminals,
        solo: None,
        night: 3,
    };
    let results = settle(&game, &outcome, &RewardRules::default());
    let masochist = result(&results, 2);
    assert!(masochist.is_winner);
    assert_eq!(masochist.money, 30 - 5);
    assert_eq!(masochist.role, RoleId::Masochist);
    assert!(result(&results, 1).is_winner);
    assert!(!result(&results, 3).is_winner);
}

#[test]
fn killer_is_paid_only_for_a_solo_victory() {
    let game = cache_with_roles(&[RoleId::Killer, RoleId::Civilian, RoleId::Don, RoleId::Civilian]);
    let solo = Outcome {
        winner: Faction::Other,
        solo: Some(1),
        night: 1,
    };
    let results = settle(&game, &solo, &RewardRules::default());
    assert_eq!(result(&results, 1).money, 40 + 6);
    assert!(!result(&results, 2).is_winner);

    let lost = Outcome {
        winner: Faction::Civilians,
        solo: None,
        night: 1,
    };
    let results = settle(&game, &lost, &RewardRules::default());
    assert!(!result(&results, 1).is_winner);
    assert!(result(&results, 2).is_winner);
}
