//! Test utilities and shared fixtures for the tweetgraph workspace.
//!
//! Enabled for this crate's own tests and for other crates through the
//! `testing` feature.

use crate::{
    error::{Result, TweetGraphError},
    source::TimelineSource,
    types::{Handle, Record},
};
use async_trait::async_trait;
use chrono::{FixedOffset, NaiveDate, TimeZone};
use std::{
    collections::HashMap,
    sync::{Mutex, Once},
};

/// Layout the timeline endpoint uses for `created_at`.
pub const PROVIDER_TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call from every test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));

        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Render a provider timestamp for the given local date and time.
pub fn provider_timestamp(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    offset_hours: i32,
) -> String {
    let offset = FixedOffset::east_opt(offset_hours * 3600).expect("valid offset");
    offset
        .with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("valid local time")
        .format(PROVIDER_TIMESTAMP_FORMAT)
        .to_string()
}

/// A record posted at noon UTC on the given date.
pub fn record_on(id: u64, year: i32, month: u32, day: u32) -> Record {
    Record::new(
        id,
        format!("post {id}"),
        provider_timestamp(year, month, day, 12, 0),
    )
}

/// One record per date, with ids counting up from 1.
pub fn records_on(dates: &[NaiveDate]) -> Vec<Record> {
    use chrono::Datelike;

    dates
        .iter()
        .zip(1u64..)
        .map(|(date, id)| record_on(id, date.year(), date.month(), date.day()))
        .collect()
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Timeline source serving canned records; unknown handles answer 404.
#[derive(Debug, Default)]
pub struct StaticTimelineSource {
    timelines: HashMap<String, Vec<Record>>,
    requested: Mutex<Vec<String>>,
}

impl StaticTimelineSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the timeline served for `handle`.
    #[must_use]
    pub fn with_timeline(mut self, handle: &str, records: Vec<Record>) -> Self {
        self.timelines.insert(handle.to_string(), records);
        self
    }

    /// Handles requested so far, in order.
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl TimelineSource for StaticTimelineSource {
    async fn fetch_timeline(&self, handle: &Handle) -> Result<Vec<Record>> {
        self.requested
            .lock()
            .expect("lock poisoned")
            .push(handle.to_string());

        self.timelines
            .get(handle.as_str())
            .cloned()
            .ok_or_else(|| TweetGraphError::fetch_with_status("got bad response: 404 Not Found", 404))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_timestamp_layout() {
        assert_eq!(
            provider_timestamp(2024, 1, 5, 10, 0),
            "Fri Jan 05 10:00:00 +0000 2024"
        );
        assert_eq!(
            provider_timestamp(2006, 1, 2, 15, -7),
            "Mon Jan 02 15:00:00 -0700 2006"
        );
    }

    #[test]
    fn test_records_on_assigns_ids() {
        let dates = [
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        ];
        let records = records_on(&dates);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[1].id, 2);
        assert!(records[1].created_at.starts_with("Thu Feb 01"));
    }

    #[tokio::test]
    async fn test_static_source_serves_and_records_requests() {
        let source = StaticTimelineSource::new().with_timeline("jack", vec![record_on(1, 2024, 1, 5)]);

        let jack = Handle::parse("jack").unwrap();
        let ghost = Handle::parse("ghost").unwrap();

        assert_eq!(source.fetch_timeline(&jack).await.unwrap().len(), 1);
        let error = source.fetch_timeline(&ghost).await.unwrap_err();
        assert_eq!(error.status_code(), Some(404));
        assert_eq!(source.requested(), vec!["jack", "ghost"]);
    }
}
