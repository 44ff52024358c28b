//! Datetime classifier and the date, timestamp and duration parsers shared with conversion.
//!
//! Strategies are tried in a fixed order and the first one that interprets at least one
//! value in the column wins:
//!
//! 1. timestamps with a time component ([`parse_generic_datetime`])
//! 2. explicit date formats in [`DateFormat::PRIORITY`] order
//! 3. elapsed time ([`parse_duration`])
//!
//! The order of the explicit formats is a tie-break for ambiguous text: `03/04/2024` is read
//! day-first as 3 April 2024 because [`DateFormat::DayFirst`] is tried before
//! [`DateFormat::MonthFirst`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::types::{Column, DataType, Value};

use super::boolean::is_boolean_token;
use super::verdict::ParseRule;
use super::Inconclusive;

/// Explicit calendar date formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateFormat {
    /// `YYYY-MM-DD`
    Iso,
    /// `DD/MM/YYYY`
    DayFirst,
    /// `MM/DD/YYYY`
    MonthFirst,
}

impl DateFormat {
    /// Order in which formats are tried.
    pub const PRIORITY: [DateFormat; 3] = [Self::Iso, Self::DayFirst, Self::MonthFirst];

    /// `chrono` format string.
    pub fn pattern(self) -> &'static str {
        match self {
            Self::Iso => "%Y-%m-%d",
            Self::DayFirst => "%d/%m/%Y",
            Self::MonthFirst => "%m/%d/%Y",
        }
    }

    /// Human-readable layout, e.g. `DD/MM/YYYY`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Iso => "YYYY-MM-DD",
            Self::DayFirst => "DD/MM/YYYY",
            Self::MonthFirst => "MM/DD/YYYY",
        }
    }

    /// Parse `s` in this format.
    pub fn parse(self, s: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(s.trim(), self.pattern()).ok()
    }
}

const GENERIC_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
];

/// Parse a timestamp that carries a time component.
///
/// Accepts RFC 3339 and RFC 2822 (offsets are normalized to UTC) and offset-less
/// `YYYY-MM-DD HH:MM[:SS[.fff]]` with `T` or a space as separator. Date-only text is left to
/// the explicit [`DateFormat`]s.
pub fn parse_generic_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.naive_utc());
    }
    GENERIC_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Parse a date, trying `preferred` first and then the remaining [`DateFormat::PRIORITY`]
/// formats in order. Timestamps are accepted last and keep only their date.
///
/// ```
/// use chrono::NaiveDate;
/// use rust_type_inference::inference::datetime::{parse_date_lenient, DateFormat};
///
/// // Ambiguous text keeps the preferred reading.
/// assert_eq!(parse_date_lenient(DateFormat::DayFirst, "03/04/2024"), NaiveDate::from_ymd_opt(2024, 4, 3));
/// // Text the preferred format rejects falls through to the next one that fits.
/// assert_eq!(parse_date_lenient(DateFormat::DayFirst, "12/25/2024"), NaiveDate::from_ymd_opt(2024, 12, 25));
/// ```
pub fn parse_date_lenient(preferred: DateFormat, s: &str) -> Option<NaiveDate> {
    preferred
        .parse(s)
        .or_else(|| {
            DateFormat::PRIORITY
                .into_iter()
                .filter(|f| *f != preferred)
                .find_map(|f| f.parse(s))
        })
        .or_else(|| parse_generic_datetime(s).map(|dt| dt.date()))
}

/// Parse a timestamp, falling back to date-only text (in [`DateFormat::PRIORITY`] order)
/// taken as midnight.
pub fn parse_datetime_lenient(s: &str) -> Option<NaiveDateTime> {
    parse_generic_datetime(s).or_else(|| {
        DateFormat::PRIORITY
            .into_iter()
            .find_map(|f| f.parse(s))
            .map(|d| d.and_time(NaiveTime::MIN))
    })
}

const NANOS_PER_SECOND: f64 = 1e9;

fn unit_nanos(unit: &str) -> Option<f64> {
    let seconds = match unit {
        "w" | "wk" | "wks" | "week" | "weeks" => 7.0 * 86_400.0,
        "d" | "day" | "days" => 86_400.0,
        "h" | "hr" | "hrs" | "hour" | "hours" => 3_600.0,
        "m" | "min" | "mins" | "minute" | "minutes" => 60.0,
        "s" | "sec" | "secs" | "second" | "seconds" => 1.0,
        "ms" | "milli" | "millis" | "millisecond" | "milliseconds" => 1e-3,
        "us" | "µs" | "micro" | "micros" | "microsecond" | "microseconds" => 1e-6,
        "ns" | "nano" | "nanos" | "nanosecond" | "nanoseconds" => 1e-9,
        _ => return None,
    };
    Some(seconds * NANOS_PER_SECOND)
}

/// Parse an elapsed time quantity.
///
/// Accepted shapes, each with an optional leading sign:
///
/// - unit-suffixed amounts, optionally compound: `10s`, `1.5 hours`, `1h30m`, `2 days 4h`
/// - clock time with optional days: `02:03:04`, `00:00:01.250`, `1 days 02:03:04`
///
/// A bare number has no unit and is not a duration.
///
/// ```
/// use chrono::TimeDelta;
/// use rust_type_inference::inference::datetime::parse_duration;
///
/// assert_eq!(parse_duration("1h30m"), Some(TimeDelta::minutes(90)));
/// assert_eq!(parse_duration("1 days 00:00:05"), Some(TimeDelta::seconds(86_405)));
/// assert_eq!(parse_duration("42"), None);
/// ```
pub fn parse_duration(s: &str) -> Option<TimeDelta> {
    let s = s.trim();
    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, s.strip_prefix('+').unwrap_or(s).trim_start()),
    };
    if body.is_empty() {
        return None;
    }

    let nanos = if body.contains(':') {
        parse_clock(body)?
    } else {
        parse_units(body)?
    };
    let nanos = nanos.round();
    if !nanos.is_finite() || nanos.abs() >= i64::MAX as f64 {
        return None;
    }
    let nanos = nanos as i64;
    Some(TimeDelta::nanoseconds(if negative { -nanos } else { nanos }))
}

fn parse_units(body: &str) -> Option<f64> {
    let mut rest = body;
    let mut total = 0.0;
    let mut terms = 0;
    while !rest.is_empty() {
        let amount_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if amount_len == 0 {
            return None;
        }
        let amount: f64 = rest[..amount_len].parse().ok()?;
        rest = rest[amount_len..].trim_start();

        let unit_len = rest
            .find(|c: char| !c.is_alphabetic())
            .unwrap_or(rest.len());
        if unit_len == 0 {
            return None;
        }
        total += amount * unit_nanos(&rest[..unit_len].to_lowercase())?;
        terms += 1;
        rest = rest[unit_len..].trim_start();
        rest = rest.strip_prefix(',').unwrap_or(rest).trim_start();
    }
    (terms > 0).then_some(total)
}

fn parse_clock(body: &str) -> Option<f64> {
    let (days, clock) = match body.find("day") {
        Some(idx) => {
            let days: f64 = body[..idx].trim().parse().ok()?;
            let after = body[idx..]
                .trim_start_matches("days")
                .trim_start_matches("day")
                .trim_start();
            (days, after.strip_prefix(',').unwrap_or(after).trim_start())
        }
        None => (0.0, body),
    };

    let mut parts = clock.split(':');
    let (Some(h), Some(m), Some(sec), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    let all_digits = |p: &str| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit());
    if !all_digits(h) || !all_digits(m) || m.len() != 2 {
        return None;
    }
    let hours: f64 = h.parse().ok()?;
    let minutes: f64 = m.parse().ok()?;
    let (whole, _) = sec.split_once('.').unwrap_or((sec, ""));
    if whole.len() != 2 || !all_digits(whole) {
        return None;
    }
    let seconds: f64 = sec.parse().ok()?;
    if minutes >= 60.0 || seconds >= 60.0 {
        return None;
    }

    let total_seconds = days * 86_400.0 + hours * 3_600.0 + minutes * 60.0 + seconds;
    Some(total_seconds * NANOS_PER_SECOND)
}

/// Classify a column as datetime, date or duration.
///
/// Columns already tagged temporal return their tag as [`ParseRule::Native`]. Boolean columns,
/// and text columns whose values are all true/false/yes/no tokens, are rejected before any
/// parsing.
pub(crate) fn classify(column: &Column) -> Result<Option<ParseRule>, Inconclusive> {
    match column.data_type {
        t if t.is_temporal() => return Ok(Some(ParseRule::Native(t))),
        DataType::Bool => return Ok(None),
        DataType::Utf8 | DataType::Categorical => {}
        found => {
            return Err(Inconclusive::TypeMismatch {
                classifier: "datetime",
                found,
            });
        }
    }

    let texts: Vec<&str> = column.non_null().filter_map(Value::as_str).collect();
    if texts.is_empty() || texts.iter().all(|s| is_boolean_token(s)) {
        return Ok(None);
    }

    if texts.iter().any(|s| parse_generic_datetime(s).is_some()) {
        return Ok(Some(ParseRule::GenericDatetime));
    }
    if let Some(format) = DateFormat::PRIORITY
        .into_iter()
        .find(|f| texts.iter().any(|s| f.parse(s).is_some()))
    {
        return Ok(Some(ParseRule::Date(format)));
    }
    if texts.iter().any(|s| parse_duration(s).is_some()) {
        return Ok(Some(ParseRule::Duration));
    }
    Ok(None)
}
