//! Persistence seams. Implementations live in `adapters`.

use async_trait::async_trait;

use crate::domain::{ChatId, GameCache, PlayerId};
use crate::error::GameError;
use crate::services::reward_ledger::PersonalResult;

/// Per-chat game state, saved after every mutation and loaded on restore.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, chat_id: ChatId) -> Result<Option<GameCache>, GameError>;
    async fn save(&self, cache: &GameCache) -> Result<(), GameError>;
    async fn remove(&self, chat_id: ChatId) -> Result<(), GameError>;
}

/// Long-term results. Not idempotent: each call is made once per player per game.
#[async_trait]
pub trait ResultsRepository: Send + Sync {
    async fn record_personal_result(&self, result: &PersonalResult) -> Result<(), GameError>;
    async fn adjust_balance(&self, player_id: PlayerId, delta: i64) -> Result<(), GameError>;
}

/// Storage key for a chat's session.
pub fn session_key(chat_id: ChatId) -> String {
    format!("mafia:session:{chat_id}")
}
