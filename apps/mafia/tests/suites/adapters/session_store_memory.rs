use mafia::adapters::InMemorySessionStore;
use mafia::repos::SessionStore;
use mafia::{GameCache, Phase};

#[tokio::test]
async fn sessions_are_kept_per_chat() {
    let store = InMemorySessionStore::new();
    let mut first = GameCache::new(-1);
    first.phase = Phase::Night;
    first.night = 3;
    store.save(&first).await.expect("saved");
    store.save(&GameCache::new(-2)).await.expect("saved");
    assert_eq!(store.len(), 2);

    let loaded = store.load(-1).await.expect("readable").expect("present");
    assert_eq!(loaded, first);

    store.remove(-1).await.expect("removed");
    assert!(store.load(-1).await.expect("readable").is_none());
    assert!(store.load(-2).await.expect("readable").is_some());
}

#[tokio::test]
async fn saving_again_overwrites() {
    let store = InMemorySessionStore::new();
    let mut cache = GameCache::new(-5);
    store.save(&cache).await.expect("saved");
    cache.night = 2;
    store.save(&cache).await.expect("saved");
    assert_eq!(store.len(), 1);
    assert_eq!(store.load(-5).await.expect("readable").map(|c| c.night), Some(2));
}
