//! Builders for sessions wired to in-memory collaborators.

use std::sync::Arc;

use mafia::adapters::{InMemoryResults, InMemorySessionStore};
use mafia::messaging::memory::RecordingMessenger;
use mafia::scheduling::ImmediateScheduler;
use mafia::{ChatId, Collaborators, GameError, GameSession, GameSettings, PlayerId, RoleId};
use mafia_test_support::unique_helpers::{roster, unique_chat_id};

/// A session plus typed handles on its in-memory collaborators.
pub struct TestTable {
    pub chat_id: ChatId,
    pub session: Arc<GameSession>,
    pub deps: Collaborators,
    pub messenger: Arc<RecordingMessenger>,
    pub results: Arc<InMemoryResults>,
    pub store: Arc<InMemorySessionStore>,
}

pub struct TestDeps {
    pub deps: Collaborators,
    pub messenger: Arc<RecordingMessenger>,
    pub results: Arc<InMemoryResults>,
    pub store: Arc<InMemorySessionStore>,
}

pub fn test_deps() -> TestDeps {
    let messenger = Arc::new(RecordingMessenger::new());
    let results = Arc::new(InMemoryResults::new());
    let store = Arc::new(InMemorySessionStore::new());
    let deps = Collaborators::new(
        messenger.clone(),
        results.clone(),
        Arc::new(ImmediateScheduler),
        store.clone(),
    );
    TestDeps {
        deps,
        messenger,
        results,
        store,
    }
}

/// Fixed seed and deal order so a test knows which roles are at the table.
pub fn settings_for(order: &[RoleId]) -> GameSettings {
    GameSettings {
        seed: Some(7),
        role_order: Some(order.to_vec()),
        ..GameSettings::default()
    }
}

pub async fn open_table(order: &[RoleId], players: usize) -> Result<TestTable, GameError> {
    open_table_with(settings_for(order), players).await
}

pub async fn open_table_with(settings: GameSettings, players: usize) -> Result<TestTable, GameError> {
    let TestDeps {
        deps,
        messenger,
        results,
        store,
    } = test_deps();
    let chat_id = unique_chat_id();
    let session = GameSession::open(chat_id, settings, deps.clone(), roster(players)).await?;
    Ok(TestTable {
        chat_id,
        session,
        deps,
        messenger,
        results,
        store,
    })
}

impl TestTable {
    /// Players dealt `role`, in seating order.
    pub async fn holders(&self, role: RoleId) -> Vec<PlayerId> {
        let game = self.session.snapshot().await;
        game.seating
            .iter()
            .copied()
            .filter(|id| game.player(*id).map(|p| p.role) == Some(role))
            .collect()
    }

    pub async fn holder(&self, role: RoleId) -> PlayerId {
        self.holders(role)
            .await
            .first()
            .copied()
            .unwrap_or_else(|| panic!("no {role} at the table"))
    }
}
