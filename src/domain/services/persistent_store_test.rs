use std::sync::Arc;

use anyhow::Result;
use chrono::TimeZone;
use chrono::Utc;

use super::PersistentStore;
use super::StoredDocument;
use super::DATA_KEY;
use crate::domain::models::Conversation;
use crate::domain::models::KeyValueStore;
use crate::domain::models::Message;
use crate::domain::models::Role;
use crate::domain::models::Settings;
use crate::domain::models::StorageBox;
use crate::infrastructure::storage::MemoryStore;

fn storage() -> StorageBox {
    return Arc::new(MemoryStore::default());
}

#[tokio::test]
async fn it_loads_nothing_from_empty_storage() {
    let store = PersistentStore::new(storage());
    assert_eq!(store.load().await, None);
}

#[tokio::test]
async fn it_round_trips_documents() -> Result<()> {
    let store = PersistentStore::new(storage());
    let created_at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
    let mut conversation = Conversation::new(1_700_000_000_000, created_at);
    conversation.push(Message::new(Role::User, "Hi"));
    conversation.push(Message::new(Role::Assistant, "Hello! **How** can I help?"));
    let settings = Settings {
        display_name: "Ada".to_string(),
        hobby: "chess".to_string(),
        ..Settings::default()
    };

    store.save(&[conversation.clone()], &settings).await?;

    assert_eq!(
        store.load().await,
        Some(StoredDocument {
            chats: vec![conversation],
            settings,
        })
    );
    return Ok(());
}

#[tokio::test]
async fn it_fails_soft_on_malformed_json() -> Result<()> {
    let storage = storage();
    storage.set(DATA_KEY, "{\"chats\": [", None).await?;

    let store = PersistentStore::new(storage);
    assert_eq!(store.load().await, None);
    return Ok(());
}

#[tokio::test]
async fn it_merges_missing_settings_onto_defaults() -> Result<()> {
    let storage = storage();
    let payload = r#"{"chats":[],"settings":{"userName":"Ada","legacyField":true}}"#;
    storage.set(DATA_KEY, payload, None).await?;

    let document = PersistentStore::new(storage).load().await.unwrap();
    assert_eq!(
        document.settings,
        Settings {
            display_name: "Ada".to_string(),
            ..Settings::default()
        }
    );
    return Ok(());
}

#[tokio::test]
async fn it_defaults_missing_sections() -> Result<()> {
    let storage = storage();
    storage.set(DATA_KEY, r#"{"chats":null}"#, None).await?;

    let document = PersistentStore::new(storage).load().await.unwrap();
    assert_eq!(document, StoredDocument::default());
    return Ok(());
}

#[tokio::test]
async fn it_clears_documents() -> Result<()> {
    let store = PersistentStore::new(storage());
    store.save(&[], &Settings::default()).await?;
    store.clear().await?;

    assert_eq!(store.load().await, None);
    return Ok(());
}
