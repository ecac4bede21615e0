//! Lenient date/time parsing for post-processing schedules.
//!
//! Operators type timestamps by hand, so several layouts are accepted:
//! `2020-12-26 18:13:00`, `2020-12-26T18:13`, `2020/12/26`, `12/26/2020`,
//! `Dec 26 2020`, `20201226181300`, `2020-12-26 18` (hour only), `2020-12`
//! (first of the month) and RFC 3339 with an offset. A date without a time
//! is midnight.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateTimeError {
    #[error("string does not contain a date: '{0}'")]
    Empty(String),
    #[error("unknown string format: '{0}'")]
    UnknownFormat(String),
    #[error("date out of range: '{0}'")]
    OutOfRange(String),
}

/// Month-first when the year comes last.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%d %b %Y",
];

/// `%.f` also matches a missing fraction.
const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// Parse a timestamp, returning midnight for date-only values.
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, DateTimeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DateTimeError::Empty(value.to_string()));
    }

    if trimmed.chars().all(|ch| ch.is_ascii_digit()) {
        return parse_compact(trimmed);
    }

    parse_date_time(trimmed)
        .or_else(|| parse_date(trimmed).map(|date| date.and_time(NaiveTime::MIN)))
        .or_else(|| parse_date_hour(trimmed))
        .or_else(|| parse_year_month(trimmed))
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|parsed| parsed.naive_local())
        })
        .ok_or_else(|| DateTimeError::UnknownFormat(value.to_string()))
}

fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    DATE_FORMATS.iter().find_map(|date| {
        [" ", "T"].iter().find_map(|separator| {
            TIME_FORMATS.iter().find_map(|time| {
                NaiveDateTime::parse_from_str(value, &format!("{date}{separator}{time}")).ok()
            })
        })
    })
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// `2020-12-26 18`: a date followed by a bare hour.
fn parse_date_hour(value: &str) -> Option<NaiveDateTime> {
    let (date, hour) = value.rsplit_once([' ', 'T'])?;
    if hour.is_empty() || hour.len() > 2 || !hour.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    parse_date(date.trim_end())?.and_hms_opt(hour.parse().ok()?, 0, 0)
}

/// `2020-12`: year and month, pinned to the first day.
fn parse_year_month(value: &str) -> Option<NaiveDateTime> {
    let (year, month) = value.split_once(['-', '/', '.'])?;
    let is_digits = |text: &str| !text.is_empty() && text.chars().all(|ch| ch.is_ascii_digit());
    if year.len() != 4 || !is_digits(year) || month.len() > 2 || !is_digits(month) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
        .map(|date| date.and_time(NaiveTime::MIN))
}

/// `YYYYMMDD` or `YYYYMMDDHHMMSS` without separators.
fn parse_compact(value: &str) -> Result<NaiveDateTime, DateTimeError> {
    if value.len() != 8 && value.len() != 14 {
        return Err(DateTimeError::UnknownFormat(value.to_string()));
    }
    let field = |range: std::ops::Range<usize>| value[range].parse::<u32>().unwrap_or_default();
    let year = field(0..4) as i32;
    let date = NaiveDate::from_ymd_opt(year, field(4..6), field(6..8))
        .ok_or_else(|| DateTimeError::OutOfRange(value.to_string()))?;
    if value.len() == 8 {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    date.and_hms_opt(field(8..10), field(10..12), field(12..14))
        .ok_or_else(|| DateTimeError::OutOfRange(value.to_string()))
}
