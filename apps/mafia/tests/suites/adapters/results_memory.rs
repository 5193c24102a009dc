use mafia::adapters::InMemoryResults;
use mafia::repos::ResultsRepository;
use mafia::services::reward_ledger::PersonalResult;
use mafia::RoleId;

fn result(player_id: i64, money: i64) -> PersonalResult {
    PersonalResult {
        player_id,
        chat_id: -1,
        role: RoleId::Civilian,
        is_winner: money > 0,
        nights_lived: 2,
        total_nights: 2,
        money,
        achievements: Vec::new(),
        summary: String::new(),
    }
}

#[tokio::test]
async fn results_are_appended_and_balances_accumulate() {
    let repo = InMemoryResults::new();
    repo.record_personal_result(&result(1, 30)).await.expect("recorded");
    repo.record_personal_result(&result(2, 0)).await.expect("recorded");
    repo.adjust_balance(1, 30).await.expect("adjusted");
    repo.adjust_balance(1, 12).await.expect("adjusted");

    assert_eq!(repo.results().len(), 2);
    assert_eq!(repo.balance(1), 42);
    assert_eq!(repo.balance(2), 0);
}

#[tokio::test]
async fn offline_repository_refuses_writes() {
    let repo = InMemoryResults::new();
    repo.set_offline(true);
    let err = repo
        .record_personal_result(&result(1, 30))
        .await
        .expect_err("offline");
    assert_eq!(err.code().as_str(), "PERSISTENCE_FAILURE");
    assert!(repo.adjust_balance(1, 30).await.is_err());

    repo.set_offline(false);
    repo.adjust_balance(1, 30).await.expect("back online");
    assert_eq!(repo.balance(1), 30);
    assert!(repo.results().is_empty());
}
