//! Front-matter date values.
//!
//! Follows the YAML 1.1 timestamp grammar: either a bare `YYYY-MM-DD` date, or
//! a date and time with an optional fraction and zone. Anything else is not a
//! date, which makes the post unpublished rather than invalid.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use regex::Regex;
use serde_yaml::Value;

static DATE_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").unwrap());

static DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})",
        r"(?:[Tt]|[ \t]+)([0-9]{1,2}):([0-9]{2}):([0-9]{2})",
        r"(?:\.([0-9]*))?",
        r"(?:[ \t]*(Z|([-+])([0-9]{1,2})(?::?([0-9]{2}))?))?$",
    ))
    .unwrap()
});

/// Interprets a front-matter value as a timestamp.
pub fn parse_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_str(s),
        Value::Tagged(tagged) => parse_value(&tagged.value),
        _ => None,
    }
}

pub fn parse_str(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Some(caps) = DATE_ONLY.captures(s) {
        let date = ymd(&caps[1], &caps[2], &caps[3])?;
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }

    let caps = DATE_TIME.captures(s)?;
    let date = ymd(&caps[1], &caps[2], &caps[3])?;

    // fraction is truncated to nanoseconds
    let nanos = match caps.get(7) {
        Some(frac) if !frac.as_str().is_empty() => {
            let digits: String = frac.as_str().chars().chain("000000000".chars()).take(9).collect();
            digits.parse().ok()?
        }
        _ => 0,
    };
    let time = NaiveTime::from_hms_nano_opt(
        caps[4].parse().ok()?,
        caps[5].parse().ok()?,
        caps[6].parse().ok()?,
        nanos,
    )?;
    let naive = date.and_time(time);

    let offset_secs = match (caps.get(8), caps.get(9)) {
        (Some(zone), _) if zone.as_str() == "Z" => 0,
        (Some(_), Some(sign)) => {
            let hours: i32 = caps[10].parse().ok()?;
            let minutes: i32 = caps.get(11).map_or(Ok(0), |m| m.as_str().parse()).ok()?;
            let secs = hours * 3600 + minutes * 60;
            if sign.as_str() == "-" {
                -secs
            } else {
                secs
            }
        }
        _ => 0,
    };
    let offset = FixedOffset::east_opt(offset_secs)?;

    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}
