use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder shown instead of the id of an archived user.
pub const DELETED_USER: &str = "deleted";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    /// Set when the user is soft-deleted. Archived users are never removed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender: String,
    pub recipient: String,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

/// Full history between one unordered pair of users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub participants: [String; 2],
    pub updated: DateTime<Utc>,
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Keep only the `limit` most recent messages. Zero keeps everything.
    pub fn truncate_to_recent(&mut self, limit: usize) {
        if limit > 0 && self.messages.len() > limit {
            let excess = self.messages.len() - limit;
            self.messages.drain(..excess);
        }
    }
}
