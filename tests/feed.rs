use chrono::{NaiveDate, TimeZone, Utc};
use ical_availability::{
    availability::{self, DateRange},
    ics_parser,
};
use icalendar::{Calendar, Component, Event, EventLike};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn parses_feed_written_by_icalendar() {
    let description = "Guest arriving late in the evening and asking for a travel cot plus \
        extra towels for the whole week at the seaside"
        .to_string();
    let calendar = Calendar::new()
        .push(
            Event::new()
                .uid("booking-1")
                .summary("CLOSED - Not available")
                .description(&description)
                .starts(date(2024, 8, 1))
                .ends(date(2024, 8, 5))
                .done(),
        )
        .push(
            Event::new()
                .uid("booking-2")
                .summary("Owner stay")
                .starts(Utc.with_ymd_and_hms(2024, 8, 10, 15, 0, 0).unwrap())
                .ends(Utc.with_ymd_and_hms(2024, 8, 12, 10, 0, 0).unwrap())
                .done(),
        )
        .done();
    let text = calendar.to_string();
    // Long lines come back folded, so this exercises the unfolder too.
    assert!(text.contains("\r\n "));

    let events = ics_parser::parse_events(Some(&text)).unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].uid, "booking-1");
    assert_eq!(events[0].summary, "CLOSED - Not available");
    assert_eq!(events[0].description, description);
    assert_eq!(
        events[0].start,
        Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap()
    );
    assert_eq!(
        events[0].end,
        Utc.with_ymd_and_hms(2024, 8, 5, 0, 0, 0).unwrap()
    );
    assert_eq!(events[1].uid, "booking-2");
    assert_eq!(
        events[1].start,
        Utc.with_ymd_and_hms(2024, 8, 10, 15, 0, 0).unwrap()
    );

    assert_eq!(
        availability::unavailable_ranges(&events),
        vec![
            DateRange {
                start: date(2024, 8, 1),
                end: date(2024, 8, 5),
            },
            DateRange {
                start: date(2024, 8, 10),
                end: date(2024, 8, 12),
            },
        ]
    );
}

#[test]
fn booking_platform_export_shape() {
    let text = "BEGIN:VCALENDAR\r
PRODID:-//Booking.com//Booking.com Calendar//EN\r
VERSION:2.0\r
CALSCALE:GREGORIAN\r
METHOD:PUBLISH\r
BEGIN:VEVENT\r
DTSTAMP:20240601T101500Z\r
DTSTART;VALUE=DATE:20240614\r
DTEND;VALUE=DATE:20240617\r
UID:78f3c1a2e4b5@booking.com\r
SUMMARY:CLOSED - Not available\r
END:VEVENT\r
BEGIN:VEVENT\r
DTSTAMP:20240601T101500Z\r
DTSTART;VALUE=DATE:20240617\r
DTEND;VALUE=DATE:20240620\r
UID:9a0b1c2d3e4f@booking.com\r
SUMMARY:CLOSED - Not available\r
END:VEVENT\r
BEGIN:VEVENT\r
DTSTART;VALUE=DATE:20240701\r
UID:cut-off@booking.com\r
";

    let parsed = ics_parser::parse_calendar(Some(text)).unwrap();

    assert_eq!(parsed.events.len(), 2);
    assert_eq!(parsed.events[0].uid, "78f3c1a2e4b5@booking.com");
    assert_eq!(parsed.events[1].uid, "9a0b1c2d3e4f@booking.com");
    assert_eq!(parsed.warnings.len(), 1);

    let unavailable = availability::unavailable_dates(&parsed.events);
    assert_eq!(
        availability::unavailable_ranges(&parsed.events),
        vec![DateRange {
            start: date(2024, 6, 14),
            end: date(2024, 6, 20),
        }]
    );
    assert_eq!(
        availability::check_stay(date(2024, 6, 20), date(2024, 6, 23), &unavailable, 2),
        availability::StayStatus::Available
    );
    assert_eq!(
        availability::check_stay(date(2024, 6, 12), date(2024, 6, 15), &unavailable, 2),
        availability::StayStatus::Unavailable
    );
}
