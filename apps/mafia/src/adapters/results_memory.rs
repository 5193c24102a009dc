use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;

use crate::domain::PlayerId;
use crate::error::GameError;
use crate::repos::ResultsRepository;
use crate::services::reward_ledger::PersonalResult;

#[derive(Default)]
pub struct InMemoryResults {
    results: Mutex<Vec<PersonalResult>>,
    balances: DashMap<PlayerId, i64>,
    offline: AtomicBool,
}

impl InMemoryResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> Vec<PersonalResult> {
        self.results.lock().clone()
    }

    pub fn balance(&self, player_id: PlayerId) -> i64 {
        self.balances.get(&player_id).map(|b| *b).unwrap_or(0)
    }

    /// Make every write fail until switched back.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Relaxed);
    }

    fn check_online(&self) -> Result<(), GameError> {
        if self.offline.load(Ordering::Relaxed) {
            return Err(GameError::persistence("results repository is offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl ResultsRepository for InMemoryResults {
    async fn record_personal_result(&self, result: &PersonalResult) -> Result<(), GameError> {
        self.check_online()?;
        self.results.lock().push(result.clone());
        Ok(())
    }

    async fn adjust_balance(&self, player_id: PlayerId, delta: i64) -> Result<(), GameError> {
        self.check_online()?;
        *self.balances.entry(player_id).or_insert(0) += delta;
        Ok(())
    }
}
