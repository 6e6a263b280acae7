//! Parsing of provider `created_at` timestamps into calendar days.

use crate::day::CalendarDay;
use chrono::DateTime;
use tweetgraph_common::{Record, Result, TweetGraphError};

/// Layout of a timestamp after its leading weekday token,
/// e.g. `Jan 05 10:00:00 +0000 2024`.
pub const TIMESTAMP_LAYOUT: &str = "%b %d %H:%M:%S %z %Y";

/// Anything carrying a provider-formatted creation timestamp.
pub trait Timestamped {
    /// The raw `created_at` string.
    fn created_at(&self) -> &str;
}

impl Timestamped for Record {
    fn created_at(&self) -> &str {
        &self.created_at
    }
}

impl<T: Timestamped + ?Sized> Timestamped for &T {
    fn created_at(&self) -> &str {
        (**self).created_at()
    }
}

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn is_digits(token: &str, len: usize) -> bool {
    token.len() == len && token.bytes().all(|b| b.is_ascii_digit())
}

/// Fixed-width shape of every field: `Www Mmm DD HH:MM:SS +hhmm YYYY`.
fn has_provider_shape(tokens: &[&str]) -> bool {
    let [weekday, month, day, time, offset, year] = tokens else {
        return false;
    };

    let clock: Vec<&str> = time.split(':').collect();
    let time_ok = clock.len() == 3 && clock.iter().all(|part| is_digits(part, 2));
    let offset_ok = offset.len() == 5
        && (offset.starts_with('+') || offset.starts_with('-'))
        && is_digits(&offset[1..], 4);

    WEEKDAYS.contains(weekday)
        && MONTHS.contains(month)
        && is_digits(day, 2)
        && time_ok
        && offset_ok
        && is_digits(year, 4)
}

/// Parses `Mon Jan 02 15:04:05 -0700 2006` style timestamps.
///
/// Fields are fixed width and names are case-sensitive. The calendar day is
/// the local date in the encoded offset. The weekday is checked for syntax
/// only.
pub fn parse_created_at(raw: &str) -> Result<CalendarDay> {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    if !has_provider_shape(&tokens) {
        return Err(TweetGraphError::parse(
            "timestamp does not match the provider layout",
            raw,
        ));
    }

    let parsed = DateTime::parse_from_str(&tokens[1..].join(" "), TIMESTAMP_LAYOUT).map_err(|e| {
        TweetGraphError::parse_with_source("timestamp does not match the provider layout", raw, e)
    })?;

    Ok(CalendarDay::from(parsed.date_naive()))
}
