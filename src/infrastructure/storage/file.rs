#[cfg(test)]
#[path = "file_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use async_trait::async_trait;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::models::KeyValueStore;

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Slot {
    value: String,
    expires_at: Option<DateTime<Utc>>,
}

/// One JSON file per key inside `data_dir`.
pub struct FileStore {
    pub data_dir: path::PathBuf,
}

impl FileStore {
    pub fn new(data_dir: path::PathBuf) -> FileStore {
        return FileStore { data_dir };
    }

    fn get_file_path(&self, key: &str) -> path::PathBuf {
        return self.data_dir.join(format!("{key}.json"));
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    #[allow(clippy::implicit_return)]
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let file_path = self.get_file_path(key);
        if !file_path.exists() {
            return Ok(None);
        }

        let payload = fs::read_to_string(&file_path).await?;
        let slot: Slot = serde_json::from_str(&payload)?;

        if let Some(expires_at) = slot.expires_at {
            if expires_at <= Utc::now() {
                tracing::debug!(key = key, "Slot expired");
                fs::remove_file(file_path).await?;
                return Ok(None);
            }
        }

        return Ok(Some(slot.value));
    }

    #[allow(clippy::implicit_return)]
    async fn set(&self, key: &str, value: &str, expires_in: Option<Duration>) -> Result<()> {
        let slot = Slot {
            value: value.to_string(),
            expires_at: expires_in.map(|duration| return Utc::now() + duration),
        };
        let payload = serde_json::to_string(&slot)?;

        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir).await?;
        }

        // Atomic replace.
        let file_path = self.get_file_path(key);
        let tmp_path = file_path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp_path).await?;
        file.write_all(payload.as_bytes()).await?;
        file.flush().await?;
        fs::rename(tmp_path, file_path).await?;

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn remove(&self, key: &str) -> Result<()> {
        let file_path = self.get_file_path(key);
        if !file_path.exists() {
            return Ok(());
        }

        fs::remove_file(file_path).await?;
        return Ok(());
    }
}
