pub mod error;
pub mod models;
pub mod queries;
pub mod range;

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use parley_types::models::{Message, User};

pub use error::{Result, StoreError};
pub use range::TimeRange;

use crate::models::{ConversationRecord, PairKey};

/// In-memory store for users, messages and conversations.
///
/// Every table sits behind one reader/writer lock, so a mutation is never
/// observed half-applied across tables.
pub struct Store {
    tables: RwLock<Tables>,
}

#[derive(Default)]
pub(crate) struct Tables {
    pub(crate) users: HashMap<String, User>,
    /// username -> user id, archived users included
    pub(crate) usernames: HashMap<String, String>,
    pub(crate) messages: HashMap<String, Message>,
    /// One entry per unordered pair, always under the canonical key
    pub(crate) conversations: HashMap<PairKey, ConversationRecord>,
}

impl Store {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }

    pub(crate) fn with_tables<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Tables) -> Result<T>,
    {
        // Nothing panics while holding the guard, so a poisoned lock still
        // guards consistent tables.
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        f(&tables)
    }

    pub(crate) fn with_tables_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Tables) -> Result<T>,
    {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut tables)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
