use anyhow::Result;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;

use super::format_countdown;
use super::QuotaRecord;
use super::DAILY_LIMIT;

#[test]
fn it_stays_closed_inside_window() {
    let now = Utc::now();
    let mut record = QuotaRecord {
        last_reset: Some(now - Duration::hours(1)),
        count: 50,
    };

    assert!(!record.refresh(now));
    assert!(!record.is_open(DAILY_LIMIT));
    assert_eq!(record.count, 50);
}

#[test]
fn it_reopens_after_window() {
    let now = Utc::now();
    let mut record = QuotaRecord {
        last_reset: Some(now - Duration::hours(25)),
        count: 50,
    };

    assert!(record.refresh(now));
    assert!(record.is_open(DAILY_LIMIT));
    assert_eq!(record.count, 0);
    assert_eq!(record.last_reset, Some(now));
}

#[test]
fn it_resets_exactly_at_window_boundary() {
    let now = Utc::now();
    let mut record = QuotaRecord {
        last_reset: Some(now - Duration::hours(24)),
        count: 3,
    };

    assert!(record.refresh(now));
    assert_eq!(record.count, 0);
}

#[test]
fn it_never_resets_without_timestamp() {
    let mut record = QuotaRecord::default();
    assert!(!record.refresh(Utc::now()));
}

#[test]
fn it_records_sends() {
    let now = Utc::now();
    let mut record = QuotaRecord::default();
    record.record(now);
    record.record(now + Duration::minutes(5));

    assert_eq!(record.count, 2);
    assert_eq!(record.last_reset, Some(now));
    assert_eq!(record.remaining(DAILY_LIMIT), 48);
}

#[test]
fn it_computes_time_until_reset() {
    let now = Utc::now();
    let record = QuotaRecord {
        last_reset: Some(now - Duration::hours(23)),
        count: 50,
    };

    assert_eq!(record.time_until_reset(now), Duration::hours(1));
}

#[test]
fn it_clamps_elapsed_windows_to_zero() {
    let now = Utc::now();
    let record = QuotaRecord {
        last_reset: Some(now - Duration::hours(30)),
        count: 50,
    };

    assert_eq!(record.time_until_reset(now), Duration::zero());
}

#[test]
fn it_formats_countdown() {
    assert_eq!(
        format_countdown(Duration::milliseconds(3_723_900)),
        "01:02:03"
    );
    assert_eq!(format_countdown(Duration::hours(23)), "23:00:00");
    assert_eq!(format_countdown(Duration::seconds(-5)), "00:00:00");
}

#[test]
fn it_serializes_millisecond_timestamps() -> Result<()> {
    let record = QuotaRecord {
        last_reset: Some(Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()),
        count: 7,
    };

    let payload = serde_json::to_string(&record)?;
    assert_eq!(payload, r#"{"lastReset":1700000000000,"count":7}"#);
    return Ok(());
}

#[test]
fn it_reads_null_timestamps() -> Result<()> {
    let record: QuotaRecord = serde_json::from_str(r#"{"lastReset":null,"count":0}"#)?;
    assert_eq!(record, QuotaRecord::default());
    return Ok(());
}
