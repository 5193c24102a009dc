//! Best-effort fan-out. One recipient failing never blocks the rest.

use futures::future::join_all;
use tracing::warn;

use crate::domain::{ChatId, Notice, PlayerId, Recipient};
use crate::errors::ErrorCode;
use crate::messaging::{MessageId, MessageOptions, Messenger};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: Vec<(PlayerId, MessageId)>,
    pub failed: Vec<(PlayerId, String)>,
    pub group_failures: usize,
}

impl DeliveryReport {
    pub fn merge(&mut self, other: DeliveryReport) {
        self.delivered.extend(other.delivered);
        self.failed.extend(other.failed);
        self.group_failures += other.group_failures;
    }

    pub fn message_id(&self, recipient: PlayerId) -> Option<MessageId> {
        self.delivered
            .iter()
            .find(|(id, _)| *id == recipient)
            .map(|(_, message)| *message)
    }
}

/// Send private messages concurrently and collect who got them.
pub async fn broadcast_private(
    messenger: &dyn Messenger,
    messages: Vec<(PlayerId, String, MessageOptions)>,
) -> DeliveryReport {
    let sends = messages.iter().map(|(recipient, text, options)| async move {
        (*recipient, messenger.send_private(*recipient, text, options).await)
    });
    let mut report = DeliveryReport::default();
    for (recipient, result) in join_all(sends).await {
        match result {
            Ok(message_id) => report.delivered.push((recipient, message_id)),
            Err(err) => {
                warn!(player_id = recipient, code = %ErrorCode::TransportFailure, error = %err, "Private delivery failed");
                report.failed.push((recipient, err.detail));
            }
        }
    }
    report
}

/// Deliver queued notices: group messages in order, then private ones concurrently.
pub async fn deliver(messenger: &dyn Messenger, chat_id: ChatId, notices: Vec<Notice>) -> DeliveryReport {
    let mut report = DeliveryReport::default();
    let mut private = Vec::new();
    for notice in notices {
        match notice.recipient {
            Recipient::Group => {
                if let Err(err) = messenger
                    .send_group(chat_id, &notice.text, &MessageOptions::default())
                    .await
                {
                    warn!(chat_id, code = %ErrorCode::TransportFailure, error = %err, "Group delivery failed");
                    report.group_failures += 1;
                }
            }
            Recipient::Player { id } => private.push((id, notice.text, MessageOptions::default())),
        }
    }
    report.merge(broadcast_private(messenger, private).await);
    report
}

/// Delete each message, ignoring failures.
pub async fn delete_all(messenger: &dyn Messenger, messages: &[(ChatId, MessageId)]) -> usize {
    let deletions = messages
        .iter()
        .map(|(chat, message)| messenger.delete_message(*chat, *message));
    let mut failures = 0;
    for result in join_all(deletions).await {
        if let Err(err) = result {
            warn!(code = %ErrorCode::TransportFailure, error = %err, "Prompt deletion failed");
            failures += 1;
        }
    }
    failures
}
