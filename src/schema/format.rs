//! ISO-8601 date/time detection for text values

use chrono::{FixedOffset, NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

// Date, then an optional time (T or space separated) of hour, minute, second
// and fraction, each part optional after the hour, then an optional offset of
// hours with optional minutes and seconds, colons optional.
static ISO_TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(\d{4})-(\d{2})-(\d{2})",
        r"(?:[T ](\d{2})(?::(\d{2})(?::(\d{2})(?:[.,](\d+))?)?)?",
        r"(?:([+-])(\d{2})(?::?(\d{2})(?::?(\d{2})(?:[.,]\d+)?)?)?)?)?$",
    ))
    .unwrap()
});

/// Replace a trailing `Z` zone marker with the explicit `+00:00` offset
pub fn normalize_zone(value: &str) -> Cow<'_, str> {
    match value.strip_suffix('Z') {
        Some(rest) => Cow::Owned(format!("{}+00:00", rest)),
        None => Cow::Borrowed(value),
    }
}

/// Check whether a text value is an ISO-8601 date or date-time
///
/// Accepts `YYYY-MM-DD`, optionally followed by `T` or a space and
/// `HH[:MM[:SS[.fraction]]]` (`,` also marks the fraction). The time may
/// carry `Z` or a `±HH[[:]MM[[:]SS]]` offset. Field ranges are checked
/// against the calendar, so `2024-02-30` is not a timestamp.
pub fn is_iso_timestamp(value: &str) -> bool {
    // Shortest accepted form is a bare date
    if value.len() < 10 || value.as_bytes()[4] != b'-' {
        return false;
    }

    let normalized = normalize_zone(value);
    let Some(caps) = ISO_TIMESTAMP_REGEX.captures(&normalized) else {
        return false;
    };

    let year = number(&caps, 1) as i32;
    if NaiveDate::from_ymd_opt(year, number(&caps, 2), number(&caps, 3)).is_none() {
        return false;
    }

    // Date only
    if caps.get(4).is_none() {
        return true;
    }

    // Digits past nanosecond precision are dropped
    let nanos = caps.get(7).map_or(0, |frac| {
        let digits = &frac.as_str()[..frac.len().min(9)];
        digits.parse::<u32>().unwrap_or(0) * 10u32.pow(9 - digits.len() as u32)
    });
    if NaiveTime::from_hms_nano_opt(number(&caps, 4), number(&caps, 5), number(&caps, 6), nanos)
        .is_none()
    {
        return false;
    }

    let Some(sign) = caps.get(8) else {
        return true;
    };
    let (hours, minutes, seconds) = (number(&caps, 9), number(&caps, 10), number(&caps, 11));
    if minutes >= 60 || seconds >= 60 {
        return false;
    }
    let offset = (hours * 3600 + minutes * 60 + seconds) as i32;
    let offset = if sign.as_str() == "-" { -offset } else { offset };
    FixedOffset::east_opt(offset).is_some()
}

fn number(caps: &Captures<'_>, group: usize) -> u32 {
    caps.get(group)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zulu_datetime() {
        assert!(is_iso_timestamp("2024-01-15T10:30:00Z"));
        assert_eq!(normalize_zone("2024-01-15T10:30:00Z"), "2024-01-15T10:30:00+00:00");
    }

    #[test]
    fn test_accepted_forms() {
        assert!(is_iso_timestamp("2024-01-15"));
        assert!(is_iso_timestamp("2024-01-15T10:30"));
        assert!(is_iso_timestamp("2024-01-15 10:30:00"));
        assert!(is_iso_timestamp("2024-01-15T10:30:00.123456"));
        assert!(is_iso_timestamp("2024-01-15T10:30:00-05:00"));
        assert!(is_iso_timestamp("2024-02-29T23:59:59+14:00"));
    }

    #[test]
    fn test_hour_only_times() {
        assert!(is_iso_timestamp("2024-01-15T10"));
        assert!(is_iso_timestamp("2024-01-15T10Z"));
        assert!(is_iso_timestamp("2024-01-15 23+01:00"));
        assert!(!is_iso_timestamp("2024-01-15T24"));
        assert!(!is_iso_timestamp("2024-01-15T1"));
    }

    #[test]
    fn test_offset_spellings() {
        assert!(is_iso_timestamp("2024-01-15T10:30:00+0500"));
        assert!(is_iso_timestamp("2024-01-15T10:30:00+05:00:30"));
        assert!(is_iso_timestamp("2024-01-15T10:30:00+05"));
        assert!(is_iso_timestamp("2024-01-15T10:30:00-053000"));
        assert!(!is_iso_timestamp("2024-01-15T10:30:00+05:60"));
        assert!(!is_iso_timestamp("2024-01-15T10:30:00+05:00:60"));
        assert!(!is_iso_timestamp("2024-01-15T10:30:00+5"));
        assert!(!is_iso_timestamp("2024-01-15T10:30:00+"));
    }

    #[test]
    fn test_fraction_marks() {
        assert!(is_iso_timestamp("2024-01-15T10:30:00,5"));
        assert!(is_iso_timestamp("2024-01-15T10:30:00.5"));
        assert!(is_iso_timestamp("2024-01-15T10:30:00.1234567891"));
        assert!(!is_iso_timestamp("2024-01-15T10:30:00."));
        // A fraction needs seconds to hang off
        assert!(!is_iso_timestamp("2024-01-15T10:30.5"));
    }

    #[test]
    fn test_rejected_forms() {
        assert!(!is_iso_timestamp("hello"));
        assert!(!is_iso_timestamp(""));
        assert!(!is_iso_timestamp("2024-13-45"));
        assert!(!is_iso_timestamp("2023-02-29"));
        assert!(!is_iso_timestamp("2024-01-15T25:00:00"));
        assert!(!is_iso_timestamp("2024-01-15T10:30:00+24:00"));
        assert!(!is_iso_timestamp("2024-01-15+05:00"));
        assert!(!is_iso_timestamp("15.01.2024"));
        // OData wire dates stay text
        assert!(!is_iso_timestamp("/Date(1705314600000)/"));
    }

    #[test]
    fn test_non_ascii_text_is_not_a_timestamp() {
        assert!(!is_iso_timestamp("Zürich-Nord"));
        assert!(!is_iso_timestamp("Straße 12, 8000 Zürich"));
    }
}
