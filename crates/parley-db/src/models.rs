//! Internal record types. The public shapes live in parley-types; these
//! carry the indexing details the store needs.

use chrono::{DateTime, Utc};
use parley_types::models::Message;
use uuid::Uuid;

/// Unordered pair of user ids, stored smaller-first so (a, b) and (b, a)
/// hash to the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairKey {
    low: String,
    high: String,
}

impl PairKey {
    pub fn new(a: &str, b: &str) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self {
            low: low.to_string(),
            high: high.to_string(),
        }
    }

    pub fn contains(&self, user_id: &str) -> bool {
        self.low == user_id || self.high == user_id
    }

    pub fn ids(&self) -> [&str; 2] {
        [&self.low, &self.high]
    }
}

pub struct ConversationRecord {
    pub id: String,
    pub pair: PairKey,
    pub updated: DateTime<Utc>,
    /// Message ids in append order; bodies live in the message table.
    pub message_ids: Vec<String>,
}

impl ConversationRecord {
    pub fn new(pair: PairKey, now: DateTime<Utc>) -> Self {
        Self {
            id: new_id(),
            pair,
            updated: now,
            message_ids: Vec::new(),
        }
    }

    pub fn append(&mut self, message: &Message) {
        self.message_ids.push(message.id.clone());
        if message.sent_at > self.updated {
            self.updated = message.sent_at;
        }
    }
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
