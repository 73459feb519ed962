use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::domain::errors::ScoringError;

/// Convert a free-text date/time string into epoch seconds.
///
/// Recognized patterns, first match wins:
/// 1. Relative offset: digits + `m`/`h`/`d` ("45m", "3h", "2d" ago from `now`)
/// 2. Month name + day + comma + year ("Jun 18, 2024", "June 18, 2024")
/// 3. Full month name + day + "at" + 12-hour time ("July 9 at 3:10 am"),
///    year assumed current
/// 4. Day + full month name + "at" + 24-hour or 12-hour time
///    ("9 July at 15:10"), year assumed current
/// 5. Full date-time ("2025-07-06 12:47:20")
/// 6. ISO-8601 with fractional seconds and trailing Z
/// 7. Full month name + day only ("May 23"), year assumed current
/// 8. Day + full month name only ("23 May"), year assumed current
///
/// Naive date/times are interpreted as UTC. `now` is an explicit parameter so
/// the function stays deterministic under test; it is never read from a
/// global clock.
pub fn resolve_timestamp(text: &str, now: DateTime<Utc>) -> Result<i64, ScoringError> {
    let text = text.trim();

    if let Some((value, unit)) = parse_relative(text) {
        let offset = relative_offset(value, unit)?;
        return Ok((now - offset).timestamp());
    }

    for fmt in ["%b %d, %Y", "%B %d, %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return Ok(at_midnight(date));
        }
    }

    let year = now.year();

    let with_year = format!("{}, {}", text, year);
    if let Ok(dt) = NaiveDateTime::parse_from_str(&with_year, "%B %d at %I:%M %p, %Y") {
        return Ok(epoch(dt));
    }

    for fmt in ["%d %B at %H:%M, %Y", "%d %B at %I:%M %p, %Y"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&with_year, fmt) {
            return Ok(epoch(dt));
        }
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Ok(epoch(dt));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.fZ") {
        return Ok(epoch(dt));
    }

    let with_year = format!("{} {}", text, year);
    if let Ok(date) = NaiveDate::parse_from_str(&with_year, "%B %d %Y") {
        return Ok(at_midnight(date));
    }
    if let Ok(date) = NaiveDate::parse_from_str(&with_year, "%d %B %Y") {
        return Ok(at_midnight(date));
    }

    Err(ScoringError::UnrecognizedTimestamp {
        input: text.to_string(),
    })
}

/// Match `<digits><unit>` where unit is a single ascii letter.
fn parse_relative(text: &str) -> Option<(i64, char)> {
    let unit = text.chars().last()?;
    if !matches!(unit, 'm' | 'h' | 'd') {
        return None;
    }
    let digits = &text[..text.len() - 1];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<i64>().ok().map(|value| (value, unit))
}

fn relative_offset(value: i64, unit: char) -> Result<Duration, ScoringError> {
    match unit {
        'm' => Ok(Duration::minutes(value)),
        'h' => Ok(Duration::hours(value)),
        'd' => Ok(Duration::days(value)),
        // Unreachable through parse_relative, which gates on {m,h,d}.
        other => Err(ScoringError::UnknownTimeUnit { unit: other }),
    }
}

fn at_midnight(date: NaiveDate) -> i64 {
    epoch(date.and_hms_opt(0, 0, 0).unwrap_or_default())
}

fn epoch(dt: NaiveDateTime) -> i64 {
    dt.and_utc().timestamp()
}
