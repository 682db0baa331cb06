use chrono::Utc;
use tracing::{debug, info};

use parley_types::models::{Conversation, DELETED_USER, Message, User};

use crate::models::{ConversationRecord, PairKey, new_id};
use crate::{Result, Store, StoreError, Tables, TimeRange};

impl Store {
    // -- Users --

    pub fn create_user(&self, username: &str, email: &str) -> Result<User> {
        let username = require_text(username, "username is required")?;
        let email = require_text(email, "email is required")?;

        self.with_tables_mut(|t| {
            if t.usernames.contains_key(username) {
                return Err(StoreError::BadRequest("username is already taken"));
            }

            let user = User {
                id: new_id(),
                username: username.to_string(),
                email: email.to_string(),
                archived_at: None,
            };
            t.usernames.insert(user.username.clone(), user.id.clone());
            t.users.insert(user.id.clone(), user.clone());

            debug!("Created user {} ({})", user.id, user.username);
            Ok(user)
        })
    }

    /// Archived users are invisible here even though their record remains.
    pub fn get_user(&self, id: &str) -> Result<User> {
        require_id(id)?;
        self.with_tables(|t| t.active_user(id).cloned())
    }

    /// Soft delete. Calling it again moves `archived_at` forward.
    pub fn delete_user(&self, id: &str) -> Result<()> {
        require_id(id)?;
        self.with_tables_mut(|t| {
            let user = t.users.get_mut(id).ok_or(StoreError::NotFound)?;
            user.archived_at = Some(Utc::now());
            info!("Archived user {}", id);
            Ok(())
        })
    }

    // -- Messages --

    /// Stores a message and appends it to the pair's conversation, creating
    /// the conversation on first contact. An unknown sender and an unknown
    /// recipient both yield `NotFound` so callers can't tell which was wrong.
    pub fn create_message(&self, sender: &str, recipient: &str, content: &str) -> Result<Message> {
        require_id(sender)?;
        require_id(recipient)?;
        require_text(content, "content is required")?;

        self.with_tables_mut(|t| {
            t.active_user(sender)?;
            t.active_user(recipient)?;

            let message = Message {
                id: new_id(),
                sender: sender.to_string(),
                recipient: recipient.to_string(),
                content: content.to_string(),
                sent_at: Utc::now(),
            };

            let key = PairKey::new(sender, recipient);
            let conversation = t.conversations.entry(key).or_insert_with_key(|key| {
                let record = ConversationRecord::new(key.clone(), message.sent_at);
                debug!("Opened conversation {} between {} and {}", record.id, sender, recipient);
                record
            });
            conversation.append(&message);
            t.messages.insert(message.id.clone(), message.clone());

            debug!("Stored message {} from {} to {}", message.id, sender, recipient);
            Ok(message)
        })
    }

    pub fn get_message(&self, id: &str) -> Result<Message> {
        require_id(id)?;
        self.with_tables(|t| {
            let message = t.messages.get(id).ok_or(StoreError::NotFound)?;
            Ok(t.redact(message))
        })
    }

    /// Messages addressed to `recipient` within `range`, oldest first.
    /// A non-zero `limit` keeps only the most recent `limit` of them.
    pub fn list_messages(&self, recipient: &str, range: TimeRange, limit: usize) -> Result<Vec<Message>> {
        require_id(recipient)?;
        let bounds = range.resolve(Utc::now())?;

        self.with_tables(|t| {
            t.known_user(recipient)?;

            let mut matching: Vec<&Message> = t
                .messages
                .values()
                .filter(|m| m.recipient == recipient && bounds.contains(m.sent_at))
                .collect();
            matching.sort_by_key(|m| m.sent_at);

            let skip = match limit {
                0 => 0,
                n => matching.len().saturating_sub(n),
            };
            Ok(matching[skip..].iter().map(|m| t.redact(m)).collect())
        })
    }

    // -- Conversations --

    /// Opens an empty conversation. Fails if the pair already has one.
    pub fn create_conversation(&self, sender: &str, recipient: &str) -> Result<Conversation> {
        require_id(sender)?;
        require_id(recipient)?;

        self.with_tables_mut(|t| {
            t.active_user(sender)?;
            t.active_user(recipient)?;

            let key = PairKey::new(sender, recipient);
            if t.conversations.contains_key(&key) {
                return Err(StoreError::BadRequest("conversation already exists"));
            }

            let record = ConversationRecord::new(key.clone(), Utc::now());
            debug!("Opened conversation {} between {} and {}", record.id, sender, recipient);
            let rendered = t.render(&record);
            t.conversations.insert(key, record);
            Ok(rendered)
        })
    }

    /// The conversation between two users, if it was updated within `range`.
    /// Argument order does not matter.
    pub fn get_conversation(&self, sender: &str, recipient: &str, range: TimeRange) -> Result<Conversation> {
        require_id(sender)?;
        require_id(recipient)?;
        let bounds = range.resolve(Utc::now())?;

        self.with_tables(|t| {
            t.known_user(sender)?;
            t.known_user(recipient)?;

            let record = t
                .conversations
                .get(&PairKey::new(sender, recipient))
                .filter(|c| bounds.contains(c.updated))
                .ok_or(StoreError::NotFound)?;
            Ok(t.render(record))
        })
    }

    /// Every conversation `recipient` takes part in that was updated within
    /// `range`, most recently updated first.
    pub fn list_conversations(&self, recipient: &str, range: TimeRange) -> Result<Vec<Conversation>> {
        require_id(recipient)?;
        let bounds = range.resolve(Utc::now())?;

        self.with_tables(|t| {
            t.known_user(recipient)?;

            let mut conversations: Vec<Conversation> = t
                .conversations
                .values()
                .filter(|c| c.pair.contains(recipient) && bounds.contains(c.updated))
                .map(|c| t.render(c))
                .collect();
            conversations.sort_by(|a, b| b.updated.cmp(&a.updated));
            Ok(conversations)
        })
    }
}

impl Tables {
    /// Any user with a record, archived or not.
    fn known_user(&self, id: &str) -> Result<&User> {
        self.users.get(id).ok_or(StoreError::NotFound)
    }

    fn active_user(&self, id: &str) -> Result<&User> {
        self.users
            .get(id)
            .filter(|u| !u.is_archived())
            .ok_or(StoreError::NotFound)
    }

    fn display_id(&self, id: &str) -> String {
        match self.users.get(id) {
            Some(user) if user.is_archived() => DELETED_USER.to_string(),
            _ => id.to_string(),
        }
    }

    /// Copy of `message` with an archived sender hidden. Content is kept.
    fn redact(&self, message: &Message) -> Message {
        Message {
            sender: self.display_id(&message.sender),
            ..message.clone()
        }
    }

    fn render(&self, record: &ConversationRecord) -> Conversation {
        let [low, high] = record.pair.ids();
        Conversation {
            id: record.id.clone(),
            participants: [self.display_id(low), self.display_id(high)],
            updated: record.updated,
            messages: record
                .message_ids
                .iter()
                .filter_map(|id| self.messages.get(id))
                .map(|m| self.redact(m))
                .collect(),
        }
    }
}

fn require_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(StoreError::BadRequest("id is required"));
    }
    Ok(())
}

fn require_text<'a>(value: &'a str, reason: &'static str) -> Result<&'a str> {
    if value.is_empty() {
        return Err(StoreError::BadRequest(reason));
    }
    Ok(value)
}
