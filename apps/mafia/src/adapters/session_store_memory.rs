use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{ChatId, GameCache};
use crate::error::GameError;
use crate::repos::SessionStore;

/// Keeps sessions as JSON text so a restore goes through the same encoding as redis.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<ChatId, String>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Overwrite the stored text directly.
    pub fn put_raw(&self, chat_id: ChatId, raw: impl Into<String>) {
        self.sessions.insert(chat_id, raw.into());
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, chat_id: ChatId) -> Result<Option<GameCache>, GameError> {
        let Some(raw) = self.sessions.get(&chat_id).map(|entry| entry.value().clone()) else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| GameError::store_corrupted(format!("session {chat_id} is unreadable"), e))
    }

    async fn save(&self, cache: &GameCache) -> Result<(), GameError> {
        let raw = serde_json::to_string(cache).map_err(|e| {
            GameError::store_corrupted(format!("session {} cannot be encoded", cache.chat_id), e)
        })?;
        self.sessions.insert(cache.chat_id, raw);
        Ok(())
    }

    async fn remove(&self, chat_id: ChatId) -> Result<(), GameError> {
        self.sessions.remove(&chat_id);
        Ok(())
    }
}
