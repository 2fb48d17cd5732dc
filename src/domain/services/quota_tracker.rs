#[cfg(test)]
#[path = "quota_tracker_test.rs"]
mod tests;

use anyhow::Result;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::models::format_countdown;
use crate::domain::models::QuotaRecord;
use crate::domain::models::StorageBox;
use crate::domain::models::DAILY_LIMIT;

pub const QUOTA_KEY: &str = "fhomeai_rate_limit";

/// Gates sends against the daily limit. The 24 hour reset is applied lazily
/// whenever the record is read.
pub struct QuotaTracker {
    storage: StorageBox,
    record: QuotaRecord,
    limit: u32,
}

impl QuotaTracker {
    pub async fn load(storage: StorageBox) -> QuotaTracker {
        let record = match storage.get(QUOTA_KEY).await {
            Ok(Some(payload)) => match serde_json::from_str(&payload) {
                Ok(record) => record,
                Err(err) => {
                    tracing::warn!(error = ?err, "Quota record is corrupt, starting fresh");
                    QuotaRecord::default()
                }
            },
            Ok(None) => QuotaRecord::default(),
            Err(err) => {
                tracing::warn!(error = ?err, "Failed to read quota record");
                QuotaRecord::default()
            }
        };

        return QuotaTracker {
            storage,
            record,
            limit: DAILY_LIMIT,
        };
    }

    pub fn record(&self) -> &QuotaRecord {
        return &self.record;
    }

    pub fn limit(&self) -> u32 {
        return self.limit;
    }

    async fn persist(&self) -> Result<()> {
        let payload = serde_json::to_string(&self.record)?;
        self.storage.set(QUOTA_KEY, &payload, None).await?;
        return Ok(());
    }

    async fn refresh(&mut self, now: DateTime<Utc>) {
        if self.record.refresh(now) {
            tracing::debug!("Daily quota window reset");
            if let Err(err) = self.persist().await {
                tracing::error!(error = ?err, "Failed to save quota record");
            }
        }
    }

    pub async fn can_send(&mut self, now: DateTime<Utc>) -> bool {
        self.refresh(now).await;
        return self.record.is_open(self.limit);
    }

    pub async fn remaining(&mut self, now: DateTime<Utc>) -> u32 {
        self.refresh(now).await;
        return self.record.remaining(self.limit);
    }

    /// Counts one accepted send. Call only once the send is going ahead.
    pub async fn record_send(&mut self, now: DateTime<Utc>) {
        self.refresh(now).await;
        self.record.record(now);

        if let Err(err) = self.persist().await {
            tracing::error!(error = ?err, "Failed to save quota record");
        }
    }

    /// `HH:MM:SS` left until the window resets, derived from the stored
    /// record each time it is asked for.
    pub fn countdown(&self, now: DateTime<Utc>) -> String {
        return format_countdown(self.record.time_until_reset(now));
    }
}
