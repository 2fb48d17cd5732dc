#[cfg(test)]
#[path = "quota_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde_derive::Deserialize;
use serde_derive::Serialize;

pub const DAILY_LIMIT: u32 = 50;

pub fn reset_window() -> Duration {
    return Duration::hours(24);
}

/// Sends counted in the current 24 hour window.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaRecord {
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_reset: Option<DateTime<Utc>>,
    #[serde(default)]
    pub count: u32,
}

impl QuotaRecord {
    /// Starts a new window once the previous one has fully elapsed. Returns
    /// true when the record changed.
    pub fn refresh(&mut self, now: DateTime<Utc>) -> bool {
        if let Some(last_reset) = self.last_reset {
            if now - last_reset >= reset_window() {
                self.count = 0;
                self.last_reset = Some(now);
                return true;
            }
        }

        return false;
    }

    pub fn is_open(&self, limit: u32) -> bool {
        return self.count < limit;
    }

    pub fn remaining(&self, limit: u32) -> u32 {
        return limit.saturating_sub(self.count);
    }

    pub fn record(&mut self, now: DateTime<Utc>) {
        if self.last_reset.is_none() {
            self.last_reset = Some(now);
        }
        self.count += 1;
    }

    pub fn time_until_reset(&self, now: DateTime<Utc>) -> Duration {
        if let Some(last_reset) = self.last_reset {
            let remaining = last_reset + reset_window() - now;
            if remaining > Duration::zero() {
                return remaining;
            }
        }

        return Duration::zero();
    }
}

/// Formats a duration as `HH:MM:SS`, flooring to whole seconds. Negative
/// durations read as zero.
pub fn format_countdown(duration: Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    return format!("{hours:02}:{minutes:02}:{seconds:02}");
}
