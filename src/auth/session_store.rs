use std::sync::Arc;

use tracing::{error, warn};

use crate::domain::SessionRecord;
use crate::storage::KeyValueStore;

/// The persisted "who is logged in" record, kept under its own key.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    key: String,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Reads the stored session. A record that does not parse is removed and
    /// reads as logged out.
    pub fn load(&self) -> Option<SessionRecord> {
        let raw = match self.storage.get(&self.key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Error reading session from storage");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Discarding corrupt session record");
                self.clear();
                None
            }
        }
    }

    pub fn save(&self, session: &SessionRecord) {
        let raw = match serde_json::to_string(session) {
            Ok(raw) => raw,
            Err(e) => {
                error!(error = %e, "Error serializing session");
                return;
            }
        };
        if let Err(e) = self.storage.set(&self.key, &raw) {
            error!(key = %self.key, error = %e, "Error saving session to storage");
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.storage.remove(&self.key) {
            error!(key = %self.key, error = %e, "Error clearing session from storage");
        }
    }
}
