use std::sync::Arc;

use tracing::{error, warn};

use crate::domain::UserRecord;
use crate::storage::KeyValueStore;

/// The whole user collection, stored as one JSON array under one key.
///
/// Failures never reach the caller: a missing or unreadable collection reads
/// as empty, and a failed write is logged and dropped.
#[derive(Clone)]
pub struct UserStore {
    storage: Arc<dyn KeyValueStore>,
    key: String,
}

impl UserStore {
    pub fn new(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn get_all(&self) -> Vec<UserRecord> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Error reading users from storage");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(users) => users,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Error parsing users from storage");
                Vec::new()
            }
        }
    }

    pub fn save(&self, users: &[UserRecord]) {
        let raw = match serde_json::to_string(users) {
            Ok(raw) => raw,
            Err(e) => {
                error!(key = %self.key, error = %e, "Error serializing users");
                return;
            }
        };
        if let Err(e) = self.storage.set(&self.key, &raw) {
            error!(key = %self.key, error = %e, "Error saving users to storage");
        }
    }
}
