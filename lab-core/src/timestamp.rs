use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Formats accepted for naive sampling timestamps, most specific first.
/// `%Y-%m-%dT%H:%M` is what a `datetime-local` form input produces.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a timestamp as stored by the backend.
///
/// RFC 3339 is tried first; naive forms are taken as UTC; a bare date maps
/// to midnight. Anything else is `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse_timestamp("2024-03-05T10:30:00-05:00").unwrap();
        assert_eq!(dt.hour(), 15);
    }

    #[test]
    fn parses_form_input_and_bare_date() {
        let dt = parse_timestamp("2024-03-05T10:30").unwrap();
        assert_eq!((dt.hour(), dt.minute()), (10, 30));
        let dt = parse_timestamp("2024-03-05").unwrap();
        assert_eq!((dt.month(), dt.day(), dt.hour()), (3, 5, 0));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("05/03/2024").is_none());
    }
}
