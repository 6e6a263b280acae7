//! Chronologically ordered (day, count) series

use crate::{aggregator::DayHistogram, day::CalendarDay};
use tweetgraph_common::{Result, TweetGraphError};

/// Posts counted on one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCount {
    pub day: CalendarDay,
    pub count: u64,
}

impl DayCount {
    /// Create a data point
    #[must_use]
    pub const fn new(day: CalendarDay, count: u64) -> Self {
        Self { day, count }
    }
}

/// Day counts in strictly increasing day order, without duplicates.
///
/// The only input the renderer accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedSeries {
    points: Vec<DayCount>,
}

impl OrderedSeries {
    /// Order every day of the histogram chronologically
    #[must_use]
    pub fn from_histogram(histogram: &DayHistogram) -> Self {
        let mut points: Vec<DayCount> = histogram
            .iter()
            .map(|(day, count)| DayCount::new(*day, *count))
            .collect();

        // Keys are unique, so an unstable sort is deterministic here.
        points.sort_unstable_by(|a, b| a.day.cmp(&b.day));

        Self { points }
    }

    /// Accept already ordered points, rejecting duplicates and regressions
    pub fn try_from_points(points: Vec<DayCount>) -> Result<Self> {
        if let Some(pair) = points.windows(2).find(|pair| pair[0].day >= pair[1].day) {
            return Err(TweetGraphError::validation(format!(
                "series must be strictly increasing, but {} is followed by {}",
                pair[0].day, pair[1].day
            )));
        }
        Ok(Self { points })
    }

    /// Number of days
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no days
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points from earliest to latest
    #[must_use]
    pub fn points(&self) -> &[DayCount] {
        &self.points
    }

    /// Iterate points from earliest to latest
    pub fn iter(&self) -> std::slice::Iter<'_, DayCount> {
        self.points.iter()
    }

    /// Axis labels, `day.month.year`, in series order
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.day.to_string()).collect()
    }

    /// Largest count, zero for an empty series
    #[must_use]
    pub fn max_count(&self) -> u64 {
        self.points.iter().map(|p| p.count).max().unwrap_or(0)
    }

    /// Sum of all counts
    #[must_use]
    pub fn total(&self) -> u64 {
        self.points.iter().map(|p| p.count).sum()
    }
}

impl From<&DayHistogram> for OrderedSeries {
    fn from(histogram: &DayHistogram) -> Self {
        Self::from_histogram(histogram)
    }
}

impl<'a> IntoIterator for &'a OrderedSeries {
    type Item = &'a DayCount;
    type IntoIter = std::slice::Iter<'a, DayCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(year: i32, month: u32, day: u32) -> CalendarDay {
        CalendarDay::from_ymd(year, month, day).unwrap()
    }

    #[test]
    fn test_orders_across_month_and_year_boundaries() {
        let histogram: DayHistogram = [
            day(2024, 2, 1),
            day(2024, 1, 31),
            day(2024, 1, 1),
            day(2023, 12, 31),
            day(2024, 1, 31),
        ]
        .into_iter()
        .collect();

        let series = OrderedSeries::from_histogram(&histogram);

        assert_eq!(
            series.labels(),
            vec!["31.12.2023", "1.1.2024", "31.1.2024", "1.2.2024"]
        );
        assert_eq!(series.points()[2].count, 2);
        assert_eq!(series.total(), 5);
        assert_eq!(series.max_count(), 2);
    }

    #[test]
    fn test_empty_histogram_gives_empty_series() {
        let series = OrderedSeries::from(&DayHistogram::new());
        assert!(series.is_empty());
        assert_eq!(series.len(), 0);
        assert_eq!(series.max_count(), 0);
        assert!(series.labels().is_empty());
    }

    #[test]
    fn test_try_from_points_checks_order() {
        let ok = OrderedSeries::try_from_points(vec![
            DayCount::new(day(2023, 12, 31), 1),
            DayCount::new(day(2024, 1, 1), 4),
        ]);
        assert!(ok.is_ok());

        let duplicate = OrderedSeries::try_from_points(vec![
            DayCount::new(day(2024, 1, 1), 1),
            DayCount::new(day(2024, 1, 1), 2),
        ]);
        assert!(matches!(duplicate, Err(TweetGraphError::Validation { .. })));

        let backwards = OrderedSeries::try_from_points(vec![
            DayCount::new(day(2024, 1, 1), 1),
            DayCount::new(day(2023, 12, 31), 2),
        ]);
        assert!(backwards.is_err());
    }
}
