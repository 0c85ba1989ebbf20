//! Timestamp parser for Weibo `created_at` values
//!
//! Weibo reports post times as `"Mon Jan 02 15:04:05 +0800 2024"`.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use regex::Regex;

use crate::error::TimestampError;

static CREATED_AT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+) (\w+) (\d{1,2}) (\d{2}):(\d{2}):(\d{2}) ([+-])(\d{2})(\d{2}) (\d{4})$")
        .expect("created_at pattern is valid")
});

/// Map a three-letter month name to 1..=12
fn month_number(name: &str) -> Option<u32> {
    let month = match name {
        "Jan" => 1,
        "Feb" => 2,
        "Mar" => 3,
        "Apr" => 4,
        "May" => 5,
        "Jun" => 6,
        "Jul" => 7,
        "Aug" => 8,
        "Sep" => 9,
        "Oct" => 10,
        "Nov" => 11,
        "Dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Parse a `created_at` string into an absolute UTC instant.
///
/// The calendar fields are read as if they were UTC, then the embedded
/// offset is subtracted. The weekday is ignored.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, TimestampError> {
    let invalid = || TimestampError::InvalidFormat(s.to_string());

    let caps = CREATED_AT.captures(s).ok_or_else(invalid)?;
    let field = |i: usize| caps[i].parse::<u32>().map_err(|_| invalid());

    let month = month_number(&caps[2]).ok_or_else(invalid)?;
    let day = field(3)?;
    let (hour, minute, second) = (field(4)?, field(5)?, field(6)?);
    let year = caps[10].parse::<i32>().map_err(|_| invalid())?;

    let offset_minutes = i64::from(field(8)? * 60 + field(9)?);
    let offset_minutes = if &caps[7] == "-" {
        -offset_minutes
    } else {
        offset_minutes
    };

    let naive = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .ok_or_else(invalid)?;

    Ok(naive.and_utc() - TimeDelta::minutes(offset_minutes))
}
