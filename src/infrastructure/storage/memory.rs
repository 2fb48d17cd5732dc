use anyhow::Result;
use async_trait::async_trait;
use chrono::Duration;
use dashmap::DashMap;

use crate::domain::models::KeyValueStore;

/// In-memory slots for tests. Expiry is ignored unless already elapsed.
#[derive(Default)]
pub struct MemoryStore {
    slots: DashMap<String, String>,
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    #[allow(clippy::implicit_return)]
    async fn get(&self, key: &str) -> Result<Option<String>> {
        return Ok(self.slots.get(key).map(|e| return e.value().to_string()));
    }

    #[allow(clippy::implicit_return)]
    async fn set(&self, key: &str, value: &str, expires_in: Option<Duration>) -> Result<()> {
        if let Some(duration) = expires_in {
            if duration <= Duration::zero() {
                self.slots.remove(key);
                return Ok(());
            }
        }

        self.slots.insert(key.to_string(), value.to_string());
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn remove(&self, key: &str) -> Result<()> {
        self.slots.remove(key);
        return Ok(());
    }
}
