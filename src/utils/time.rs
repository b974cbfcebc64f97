use crate::components::extractor::models::ParsedEventDescription;
use crate::error::{extraction_error, AppResult};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Resolved event window in UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl EventWindow {
    /// Start as a Unix timestamp
    pub fn start_timestamp(&self) -> i64 {
        self.start.timestamp()
    }

    /// End as a Unix timestamp
    pub fn end_timestamp(&self) -> i64 {
        self.end.timestamp()
    }
}

/// Naive datetime formats accepted from the model
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a model-supplied timestamp into UTC
pub fn resolve_timestamp(value: &str, timezone: Tz) -> AppResult<DateTime<Utc>> {
    let trimmed = value.trim();

    // RFC 3339 with an explicit offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    // Naive datetime, localized to the configured timezone
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return localize(naive, timezone);
        }
    }

    // Bare date resolves to local midnight
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        let naive = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| extraction_error("Failed to create datetime"))?;
        return localize(naive, timezone);
    }

    Err(extraction_error(&format!("Unparsable date: {}", value)))
}

/// Localize a naive datetime, rejecting DST gaps and ambiguities
fn localize(naive: NaiveDateTime, timezone: Tz) -> AppResult<DateTime<Utc>> {
    match timezone.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        chrono::LocalResult::Ambiguous(_, _) => Err(extraction_error("Ambiguous local time")),
        chrono::LocalResult::None => Err(extraction_error("Invalid local time")),
    }
}

/// Resolve the event window, applying the default duration when no end is given.
///
/// The start must strictly precede the end before any submission; an explicit
/// end at or before the start is an extraction failure, not something to fix up.
pub fn resolve_event_window(
    parsed: &ParsedEventDescription,
    timezone: Tz,
    default_duration: Duration,
) -> AppResult<EventWindow> {
    let start = resolve_timestamp(&parsed.start, timezone)?;

    let end = match &parsed.end {
        Some(end) => resolve_timestamp(end, timezone)?,
        None => start + default_duration,
    };

    if end <= start {
        return Err(extraction_error(&format!(
            "Event end {} is not after start {}",
            end, start
        )));
    }

    Ok(EventWindow { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono_tz::America::Los_Angeles;
    use chrono_tz::Tz::UTC;

    fn parsed(start: &str, end: Option<&str>) -> ParsedEventDescription {
        ParsedEventDescription {
            title: "Test event".to_string(),
            description: None,
            start: start.to_string(),
            end: end.map(|e| e.to_string()),
            location: None,
            participants: Vec::new(),
        }
    }

    #[test]
    fn test_resolve_rfc3339_with_offset() {
        let dt = resolve_timestamp("2024-08-16T17:00:00-07:00", Los_Angeles).unwrap();
        assert_eq!(dt.timestamp(), 1723852800);
    }

    #[test]
    fn test_resolve_naive_localizes_to_timezone() {
        // 17:00 Pacific in August is 00:00 UTC the next day
        let dt = resolve_timestamp("2024-08-16T17:00:00", Los_Angeles).unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-08-17T00:00:00+00:00");
    }

    #[test]
    fn test_resolve_naive_without_seconds() {
        let dt = resolve_timestamp("2024-08-16 17:00", UTC).unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-08-16T17:00:00+00:00");
    }

    #[test]
    fn test_resolve_bare_date_is_local_midnight() {
        let dt = resolve_timestamp("2024-08-16", UTC).unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-08-16T00:00:00+00:00");
    }

    #[test]
    fn test_resolve_garbage_is_extraction_error() {
        let err = resolve_timestamp("sometime soon", UTC).unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }

    #[test]
    fn test_explicit_end_kept() {
        let window = resolve_event_window(
            &parsed("2024-08-16T17:00:00", Some("2024-08-16T19:30:00")),
            UTC,
            Duration::minutes(60),
        )
        .unwrap();
        assert_eq!(window.end_timestamp() - window.start_timestamp(), 9000);
    }

    #[test]
    fn test_missing_end_gets_default_duration() {
        let window = resolve_event_window(
            &parsed("2024-08-16T17:00:00", None),
            UTC,
            Duration::minutes(60),
        )
        .unwrap();
        assert_eq!(window.end_timestamp() - window.start_timestamp(), 3600);
    }

    #[test]
    fn test_default_duration_is_idempotent() {
        // Re-resolving the same parsed description yields the same window
        let description = parsed("2024-08-16T17:00:00", None);
        let first = resolve_event_window(&description, UTC, Duration::minutes(60)).unwrap();
        let second = resolve_event_window(&description, UTC, Duration::minutes(60)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_end_before_start_is_extraction_error() {
        let err = resolve_event_window(
            &parsed("2024-08-16T17:00:00", Some("2024-08-16T09:00:00")),
            UTC,
            Duration::minutes(60),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }

    #[test]
    fn test_end_equal_to_start_is_extraction_error() {
        let err = resolve_event_window(
            &parsed("2024-08-16T17:00:00", Some("2024-08-16T17:00:00")),
            UTC,
            Duration::minutes(60),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }
}
