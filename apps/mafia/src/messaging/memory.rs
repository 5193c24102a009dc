//! In-process messenger that records traffic. Optionally forwards prompts to a channel
//! so bots can answer them.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::domain::{ChatId, PlayerId};
use crate::messaging::{MessageId, MessageOptions, Messenger, TransportError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub chat_id: ChatId,
    pub message_id: MessageId,
    pub text: String,
    pub options: MessageOptions,
}

/// A private message that carried choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptEvent {
    pub recipient: PlayerId,
    pub message_id: MessageId,
    pub text: String,
    pub options: MessageOptions,
}

#[derive(Default)]
pub struct RecordingMessenger {
    next_id: AtomicI64,
    sent: Mutex<Vec<SentMessage>>,
    edited: Mutex<Vec<(ChatId, MessageId, String)>>,
    deleted: Mutex<Vec<(ChatId, MessageId)>>,
    unreachable: Mutex<BTreeSet<ChatId>>,
    prompts: Option<mpsc::UnboundedSender<PromptEvent>>,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prompt_channel() -> (Self, mpsc::UnboundedReceiver<PromptEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                prompts: Some(tx),
                ..Self::default()
            },
            rx,
        )
    }

    /// Make every send to `chat_id` fail.
    pub fn set_unreachable(&self, chat_id: ChatId) {
        self.unreachable.lock().insert(chat_id);
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().clone()
    }

    pub fn texts_to(&self, chat_id: ChatId) -> Vec<String> {
        self.sent
            .lock()
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .map(|m| m.text.clone())
            .collect()
    }

    pub fn prompts_to(&self, recipient: PlayerId) -> Vec<SentMessage> {
        self.sent
            .lock()
            .iter()
            .filter(|m| m.chat_id == recipient && !m.options.choices.is_empty())
            .cloned()
            .collect()
    }

    pub fn deleted(&self) -> Vec<(ChatId, MessageId)> {
        self.deleted.lock().clone()
    }

    pub fn edited(&self) -> Vec<(ChatId, MessageId, String)> {
        self.edited.lock().clone()
    }

    fn record(&self, chat_id: ChatId, text: &str, options: &MessageOptions) -> Result<MessageId, TransportError> {
        if self.unreachable.lock().contains(&chat_id) {
            return Err(TransportError {
                chat_id,
                detail: "chat unreachable".to_string(),
            });
        }
        let message_id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.sent.lock().push(SentMessage {
            chat_id,
            message_id,
            text: text.to_string(),
            options: options.clone(),
        });
        Ok(message_id)
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_private(
        &self,
        recipient: PlayerId,
        text: &str,
        options: &MessageOptions,
    ) -> Result<MessageId, TransportError> {
        let message_id = self.record(recipient, text, options)?;
        if let Some(tx) = &self.prompts {
            if !options.choices.is_empty() {
                // A closed receiver just means nobody is answering.
                let _ = tx.send(PromptEvent {
                    recipient,
                    message_id,
                    text: text.to_string(),
                    options: options.clone(),
                });
            }
        }
        Ok(message_id)
    }

    async fn send_group(
        &self,
        chat_id: ChatId,
        text: &str,
        options: &MessageOptions,
    ) -> Result<MessageId, TransportError> {
        self.record(chat_id, text, options)
    }

    async fn edit_message(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        text: &str,
    ) -> Result<(), TransportError> {
        self.edited.lock().push((chat_id, message_id, text.to_string()));
        Ok(())
    }

    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> Result<(), TransportError> {
        self.deleted.lock().push((chat_id, message_id));
        Ok(())
    }
}
