//! Calendar arithmetic over the loosely-typed date strings a trip carries.
//!
//! Nothing here returns an error: absent or malformed input falls back to
//! the one-day default so a half-filled trip can always be previewed.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

pub const NOT_SET_LABEL: &str = "Not set";
pub const INVALID_DATE_LABEL: &str = "Invalid date";

const MS_PER_DAY: i64 = 86_400_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedDate {
    Missing,
    Invalid,
    Valid(DateTime<Utc>),
}

/// Accepts `YYYY-MM-DD` (midnight UTC), RFC 3339 timestamps and naive
/// `YYYY-MM-DDTHH:MM:SS` timestamps read as UTC. Blank input is missing.
pub fn parse_date(input: Option<&str>) -> ParsedDate {
    let Some(raw) = input.map(str::trim).filter(|s| !s.is_empty()) else {
        return ParsedDate::Missing;
    };

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return ParsedDate::Valid(date.and_time(NaiveTime::MIN).and_utc());
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return ParsedDate::Valid(stamp.with_timezone(&Utc));
    }
    if let Ok(stamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return ParsedDate::Valid(stamp.and_utc());
    }

    ParsedDate::Invalid
}

pub fn parse_calendar_date(input: Option<&str>) -> Option<NaiveDate> {
    match parse_date(input) {
        ParsedDate::Valid(stamp) => Some(stamp.date_naive()),
        _ => None,
    }
}

/// Inclusive day count between two dates, never less than 1.
pub fn duration_in_days(start: Option<&str>, end: Option<&str>) -> u32 {
    let (ParsedDate::Valid(start), ParsedDate::Valid(end)) = (parse_date(start), parse_date(end))
    else {
        return 1;
    };

    let span_ms = (end - start).num_milliseconds();
    let days = ceil_div(span_ms, MS_PER_DAY).saturating_add(1);
    if days < 1 {
        1
    } else {
        u32::try_from(days).unwrap_or(u32::MAX)
    }
}

fn ceil_div(value: i64, divisor: i64) -> i64 {
    let quotient = value.div_euclid(divisor);
    if value.rem_euclid(divisor) == 0 {
        quotient
    } else {
        quotient + 1
    }
}

/// Short `Sat, Jun 1` label for a date.
pub fn format_for_display(input: Option<&str>) -> String {
    match parse_date(input) {
        ParsedDate::Missing => NOT_SET_LABEL.to_string(),
        ParsedDate::Invalid => INVALID_DATE_LABEL.to_string(),
        ParsedDate::Valid(stamp) => stamp.date_naive().format("%a, %b %-d").to_string(),
    }
}

/// Calendar day after `date`. Saturates at the last representable date.
pub fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}
