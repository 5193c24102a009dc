use serde::{Deserialize, Serialize};

use crate::domain::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "to", rename_all = "snake_case")]
pub enum Recipient {
    Group,
    Player { id: PlayerId },
}

/// Text queued by the pure resolvers for delivery once the state is saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub recipient: Recipient,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outbox {
    notices: Vec<Notice>,
}

impl Outbox {
    pub fn group(&mut self, text: impl Into<String>) {
        self.notices.push(Notice {
            recipient: Recipient::Group,
            text: text.into(),
        });
    }

    pub fn private(&mut self, id: PlayerId, text: impl Into<String>) {
        self.notices.push(Notice {
            recipient: Recipient::Player { id },
            text: text.into(),
        });
    }

    pub fn extend(&mut self, other: Outbox) {
        self.notices.extend(other.notices);
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn into_notices(self) -> Vec<Notice> {
        self.notices
    }

    pub fn for_player(&self, id: PlayerId) -> impl Iterator<Item = &str> {
        self.notices
            .iter()
            .filter(move |n| n.recipient == Recipient::Player { id })
            .map(|n| n.text.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}
