use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Duration;

/// Durable string slots addressed by key. Implementations must treat a slot
/// whose expiry has passed as absent.
#[async_trait]
pub trait KeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a slot. `expires_in` of `None` keeps the value indefinitely.
    async fn set(&self, key: &str, value: &str, expires_in: Option<Duration>) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;
}

pub type StorageBox = Arc<dyn KeyValueStore + Send + Sync>;
