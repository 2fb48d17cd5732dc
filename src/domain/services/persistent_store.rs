#[cfg(test)]
#[path = "persistent_store_test.rs"]
mod tests;

use anyhow::Result;
use chrono::Duration;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::domain::models::null_as_default;
use crate::domain::models::Conversation;
use crate::domain::models::Settings;
use crate::domain::models::StorageBox;

pub const DATA_KEY: &str = "fhomeai_data";

pub fn data_expiry() -> Duration {
    return Duration::days(365);
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub chats: Vec<Conversation>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub settings: Settings,
}

/// Conversations and settings, kept together as one JSON document in one
/// slot.
pub struct PersistentStore {
    storage: StorageBox,
}

impl PersistentStore {
    pub fn new(storage: StorageBox) -> PersistentStore {
        return PersistentStore { storage };
    }

    /// Never fails: unreadable or malformed documents are logged and read as
    /// absent.
    pub async fn load(&self) -> Option<StoredDocument> {
        let payload = match self.storage.get(DATA_KEY).await {
            Ok(Some(payload)) => payload,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(error = ?err, "Failed to read stored conversations");
                return None;
            }
        };

        match serde_json::from_str::<StoredDocument>(&payload) {
            Ok(document) => {
                tracing::debug!(chats = document.chats.len(), "Loaded stored conversations");
                return Some(document);
            }
            Err(err) => {
                tracing::warn!(error = ?err, "Stored conversations are corrupt, using defaults");
                return None;
            }
        }
    }

    pub async fn save(&self, conversations: &[Conversation], settings: &Settings) -> Result<()> {
        let document = StoredDocument {
            chats: conversations.to_vec(),
            settings: settings.clone(),
        };
        let payload = serde_json::to_string(&document)?;

        self.storage
            .set(DATA_KEY, &payload, Some(data_expiry()))
            .await?;

        return Ok(());
    }

    pub async fn clear(&self) -> Result<()> {
        return self.storage.remove(DATA_KEY).await;
    }
}
