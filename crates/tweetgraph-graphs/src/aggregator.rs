//! Bucketing of timestamped records into per-day counts

use crate::{
    day::CalendarDay,
    timestamp::{parse_created_at, Timestamped},
};
use std::collections::{hash_map, HashMap};
use tracing::{debug, instrument};
use tweetgraph_common::Result;

/// Post counts keyed by calendar day. Carries no ordering of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayHistogram {
    counts: HashMap<CalendarDay, u64>,
}

impl DayHistogram {
    /// Create an empty histogram
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more post on `day`
    pub fn record(&mut self, day: CalendarDay) {
        *self.counts.entry(day).or_insert(0) += 1;
    }

    /// Posts counted on `day`, zero if none
    #[must_use]
    pub fn count(&self, day: &CalendarDay) -> u64 {
        self.counts.get(day).copied().unwrap_or(0)
    }

    /// Number of distinct days
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no post was counted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Days and counts in arbitrary order
    pub fn iter(&self) -> hash_map::Iter<'_, CalendarDay, u64> {
        self.counts.iter()
    }
}

impl FromIterator<CalendarDay> for DayHistogram {
    fn from_iter<I: IntoIterator<Item = CalendarDay>>(iter: I) -> Self {
        let mut histogram = Self::new();
        for day in iter {
            histogram.record(day);
        }
        histogram
    }
}

impl<'a> IntoIterator for &'a DayHistogram {
    type Item = (&'a CalendarDay, &'a u64);
    type IntoIter = hash_map::Iter<'a, CalendarDay, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Folds records into a [`DayHistogram`].
///
/// Every record adds exactly one to its day; nothing is deduplicated. The
/// first unparsable timestamp aborts the fold and no histogram is returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct DayAggregator;

impl DayAggregator {
    /// Create a new aggregator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Aggregate records into per-day counts
    #[instrument(skip_all)]
    pub fn aggregate<I>(&self, records: I) -> Result<DayHistogram>
    where
        I: IntoIterator,
        I::Item: Timestamped,
    {
        let mut histogram = DayHistogram::new();
        let mut seen = 0usize;

        for record in records {
            histogram.record(parse_created_at(record.created_at())?);
            seen += 1;
        }

        debug!("Aggregated {} records into {} days", seen, histogram.len());
        Ok(histogram)
    }
}
