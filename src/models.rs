use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Stands in for a DTSTART/DTEND that was missing or could not be decoded.
///
/// This is also a real instant, so an event carrying it is indistinguishable
/// from one that genuinely starts at the dawn of time. Compare against this
/// constant rather than guessing from the year.
pub const MIN_TIMESTAMP: DateTime<Utc> = DateTime::<Utc>::MIN_UTC;

/// One `BEGIN:VEVENT` ... `END:VEVENT` block from the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub summary: String,
    pub description: String,
    pub uid: String,
}

impl Default for CalendarEvent {
    fn default() -> Self {
        Self {
            start: MIN_TIMESTAMP,
            end: MIN_TIMESTAMP,
            summary: String::new(),
            description: String::new(),
            uid: String::new(),
        }
    }
}

impl CalendarEvent {
    /// True when both ends carry a decoded timestamp.
    pub fn has_dates(&self) -> bool {
        self.start != MIN_TIMESTAMP && self.end != MIN_TIMESTAMP
    }
}

/// Raw feed as downloaded from the booking platform.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ICalData {
    pub data: String,
    pub content_type: String,
    pub last_modified: DateTime<Utc>,
}

/// Something the parser skipped or defaulted instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeWarning {
    InvalidTimestamp { property: String, value: String },
    MalformedProperty { line: String },
    UnterminatedEvent { uid: String },
    RestartedEvent { uid: String },
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTimestamp { property, value } => {
                write!(f, "Could not parse iCal datetime in {property}: {value}")
            }
            Self::MalformedProperty { line } => write!(f, "Ignoring malformed property: {line}"),
            Self::UnterminatedEvent { uid } => {
                write!(f, "Discarding event without END:VEVENT (UID: {uid})")
            }
            Self::RestartedEvent { uid } => {
                write!(f, "Discarding event interrupted by BEGIN:VEVENT (UID: {uid})")
            }
        }
    }
}

/// Events in feed order, plus everything that was swallowed on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCalendar {
    pub events: Vec<CalendarEvent>,
    pub warnings: Vec<DecodeWarning>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn default_event_uses_sentinel_and_empty_strings() {
        let event = CalendarEvent::default();

        assert_eq!(event.start, MIN_TIMESTAMP);
        assert_eq!(event.end, MIN_TIMESTAMP);
        assert!(event.uid.is_empty());
        assert!(event.summary.is_empty());
        assert!(event.description.is_empty());
        assert!(!event.has_dates());
    }

    #[test]
    fn event_serializes_with_camel_case_fields() {
        let event = CalendarEvent {
            start: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 1, 1, 13, 0, 0).unwrap(),
            summary: "Test Event 1".to_string(),
            description: "This is a test event".to_string(),
            uid: "test-event-1".to_string(),
        };

        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(
            value,
            json!({
                "start": "2024-01-01T12:00:00Z",
                "end": "2024-01-01T13:00:00Z",
                "summary": "Test Event 1",
                "description": "This is a test event",
                "uid": "test-event-1",
            })
        );
    }

    #[test]
    fn ical_data_serializes_content_type_in_camel_case() {
        let data = ICalData {
            data: "BEGIN:VCALENDAR".to_string(),
            content_type: "text/calendar".to_string(),
            last_modified: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };

        let value = serde_json::to_value(&data).unwrap();

        assert_eq!(value["contentType"], "text/calendar");
        assert_eq!(value["lastModified"], "2024-01-01T00:00:00Z");
    }
}
