use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::{ChatId, GameCache};
use crate::error::GameError;
use crate::repos::{session_key, SessionStore};

/// Session store backed by redis string keys (`mafia:session:{chat_id}`).
pub struct RedisSessionStore {
    conn: Mutex<ConnectionManager>,
}

impl RedisSessionStore {
    pub async fn connect(redis_url: &str) -> Result<Self, GameError> {
        let client = Client::open(redis_url)
            .map_err(|err| GameError::config(format!("Invalid REDIS_URL: {err}")))?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(|err| GameError::store_unavailable("Unable to initialize Redis connection manager", err))?;
        info!("Redis session store connected");
        Ok(Self {
            conn: Mutex::new(manager),
        })
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, chat_id: ChatId) -> Result<Option<GameCache>, GameError> {
        let mut conn = self.conn.lock().await;
        let raw: Option<String> = conn
            .get(session_key(chat_id))
            .await
            .map_err(|err| GameError::store_unavailable(format!("GET session {chat_id}"), err))?;
        match raw {
            Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|e| {
                GameError::store_corrupted(format!("session {chat_id} is unreadable"), e)
            }),
            None => Ok(None),
        }
    }

    async fn save(&self, cache: &GameCache) -> Result<(), GameError> {
        let raw = serde_json::to_string(cache).map_err(|e| {
            GameError::store_corrupted(format!("session {} cannot be encoded", cache.chat_id), e)
        })?;
        let mut conn = self.conn.lock().await;
        let _: () = conn
            .set(session_key(cache.chat_id), raw)
            .await
            .map_err(|err| GameError::store_unavailable(format!("SET session {}", cache.chat_id), err))?;
        Ok(())
    }

    async fn remove(&self, chat_id: ChatId) -> Result<(), GameError> {
        let mut conn = self.conn.lock().await;
        let _: () = conn
            .del(session_key(chat_id))
            .await
            .map_err(|err| GameError::store_unavailable(format!("DEL session {chat_id}"), err))?;
        Ok(())
    }
}
