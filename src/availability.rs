use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use log::debug;
use serde::Serialize;

use crate::models::CalendarEvent;

/// Half-open run of dates: `start` is blocked, `end` is the first free day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum StayStatus {
    Available,
    Unavailable,
    MinimumStay { nights: i64, minimum: u32 },
    InvalidRange,
}

/// Nights blocked by one event, or `None` when it has no usable dates.
fn booked_range(event: &CalendarEvent) -> Option<DateRange> {
    if !event.has_dates() {
        debug!("Skipping event without dates (UID: {})", event.uid);
        return None;
    }

    let range = DateRange {
        start: event.start.date_naive(),
        end: event.end.date_naive(),
    };
    (range.start < range.end).then_some(range)
}

/// Every night covered by a booking: start date inclusive, end date exclusive.
///
/// Events without both timestamps are skipped. One set entry is created per
/// night, so a feed with absurdly long events gets expensive here; prefer
/// [`unavailable_dates_within`] or [`unavailable_ranges`] for such input.
pub fn unavailable_dates(events: &[CalendarEvent]) -> BTreeSet<NaiveDate> {
    let everything = DateRange {
        start: NaiveDate::MIN,
        end: NaiveDate::MAX,
    };
    unavailable_dates_within(events, everything)
}

/// Like [`unavailable_dates`], limited to nights inside `window`.
pub fn unavailable_dates_within(events: &[CalendarEvent], window: DateRange) -> BTreeSet<NaiveDate> {
    let mut dates = BTreeSet::new();

    for range in events.iter().filter_map(booked_range) {
        let end = range.end.min(window.end);
        let mut day = range.start.max(window.start);
        while day < end {
            dates.insert(day);
            match day.checked_add_days(Days::new(1)) {
                Some(next) => day = next,
                None => break,
            }
        }
    }

    dates
}

/// Booked nights as sorted ranges, overlapping or touching bookings merged.
pub fn unavailable_ranges(events: &[CalendarEvent]) -> Vec<DateRange> {
    let mut booked: Vec<DateRange> = events.iter().filter_map(booked_range).collect();
    booked.sort_by_key(|range| range.start);

    let mut ranges: Vec<DateRange> = Vec::with_capacity(booked.len());
    for range in booked {
        match ranges.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => ranges.push(range),
        }
    }

    ranges
}

/// Whether a guest can stay from `check_in` until the morning of `check_out`.
pub fn check_stay(
    check_in: NaiveDate,
    check_out: NaiveDate,
    unavailable: &BTreeSet<NaiveDate>,
    minimum_nights: u32,
) -> StayStatus {
    if check_out <= check_in {
        return StayStatus::InvalidRange;
    }

    let nights = (check_out - check_in).num_days();
    if nights < i64::from(minimum_nights) {
        return StayStatus::MinimumStay {
            nights,
            minimum: minimum_nights,
        };
    }

    if unavailable.range(check_in..check_out).next().is_some() {
        StayStatus::Unavailable
    } else {
        StayStatus::Available
    }
}
