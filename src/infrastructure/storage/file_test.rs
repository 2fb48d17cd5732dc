use anyhow::Result;
use chrono::Duration;
use tokio::fs;

use super::FileStore;
use crate::domain::models::KeyValueStore;

#[tokio::test]
async fn it_reads_missing_slots_as_none() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FileStore::new(dir.path().to_path_buf());

    assert_eq!(store.get("missing").await?, None);
    return Ok(());
}

#[tokio::test]
async fn it_round_trips_values() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FileStore::new(dir.path().join("nested"));

    store.set("slot", "{\"a\":1}", Some(Duration::days(365))).await?;
    assert_eq!(store.get("slot").await?, Some("{\"a\":1}".to_string()));
    return Ok(());
}

#[tokio::test]
async fn it_keeps_slots_without_expiry() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FileStore::new(dir.path().to_path_buf());

    store.set("slot", "forever", None).await?;
    assert_eq!(store.get("slot").await?, Some("forever".to_string()));
    return Ok(());
}

#[tokio::test]
async fn it_drops_expired_slots() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FileStore::new(dir.path().to_path_buf());

    store.set("slot", "old", Some(Duration::seconds(-1))).await?;
    assert_eq!(store.get("slot").await?, None);
    assert!(!dir.path().join("slot.json").exists());
    return Ok(());
}

#[tokio::test]
async fn it_removes_slots() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FileStore::new(dir.path().to_path_buf());

    store.set("slot", "value", None).await?;
    store.remove("slot").await?;
    store.remove("slot").await?;
    assert_eq!(store.get("slot").await?, None);
    return Ok(());
}

#[tokio::test]
async fn it_fails_on_corrupt_envelopes() -> Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("slot.json"), "not json").await?;
    let store = FileStore::new(dir.path().to_path_buf());

    assert!(store.get("slot").await.is_err());
    return Ok(());
}
