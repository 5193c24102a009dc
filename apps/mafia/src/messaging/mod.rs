//! Outbound chat transport seam.

pub mod broadcast;
pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{ChatId, Choice, PlayerId};

pub type MessageId = i64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("delivery to {chat_id} failed: {detail}")]
pub struct TransportError {
    pub chat_id: ChatId,
    pub detail: String,
}

/// One selectable button on a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptChoice {
    pub label: String,
    pub choice: Choice,
}

/// Delivery options. A non-empty `choices` turns the message into a prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageOptions {
    pub choices: Vec<PromptChoice>,
    /// Context the transport echoes back with the answer.
    pub night: Option<u32>,
    pub silent: bool,
}

impl MessageOptions {
    pub fn prompt(night: u32, choices: Vec<PromptChoice>) -> Self {
        Self {
            choices,
            night: Some(night),
            silent: false,
        }
    }
}

/// Chat transport. Implementations must be safe to call concurrently.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send_private(
        &self,
        recipient: PlayerId,
        text: &str,
        options: &MessageOptions,
    ) -> Result<MessageId, TransportError>;

    async fn send_group(
        &self,
        chat_id: ChatId,
        text: &str,
        options: &MessageOptions,
    ) -> Result<MessageId, TransportError>;

    async fn edit_message(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        text: &str,
    ) -> Result<(), TransportError>;

    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> Result<(), TransportError>;
}
