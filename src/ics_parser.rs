use log::{debug, info, warn};

use crate::error::{ParseFailure, Result};
use crate::models::{CalendarEvent, DecodeWarning, MIN_TIMESTAMP, ParsedCalendar};

pub mod decode;
pub mod unfold;

use decode::{ContentLine, decode_timestamp, unescape_text};
use unfold::unfold;

/// Parses a feed into its events, in the order they appear.
pub fn parse_events(ics_text: Option<&str>) -> Result<Vec<CalendarEvent>> {
    parse_calendar(ics_text).map(|parsed| parsed.events)
}

/// Parses a feed, also returning every problem that was skipped over.
///
/// Only a missing input fails the whole parse. Bad dates, malformed lines
/// and unterminated events are logged, recorded in
/// [`ParsedCalendar::warnings`] and otherwise ignored.
pub fn parse_calendar(ics_text: Option<&str>) -> Result<ParsedCalendar> {
    info!("Parsing iCal events");

    let Some(text) = ics_text else {
        warn!("Error parsing iCal data: {}", ParseFailure::MissingInput);
        return Err(ParseFailure::MissingInput.into());
    };

    let mut parsed = ParsedCalendar::default();
    let mut state = State::Outside;

    for line in unfold(text) {
        let step = state.advance(&line);
        state = step.state;

        if let Some(event) = step.finished {
            parsed.events.push(event);
        }
        if let Some(warning) = step.warning {
            parsed.warnings.push(warning);
        }
    }

    if let State::InEvent(event) = state {
        let warning = DecodeWarning::UnterminatedEvent { uid: event.uid };
        warn!("{}", warning);
        parsed.warnings.push(warning);
    }

    info!("Successfully parsed {} iCal events", parsed.events.len());
    Ok(parsed)
}

/// Where the extractor is relative to VEVENT blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    Outside,
    InEvent(CalendarEvent),
}

/// Result of feeding one logical line to a [`State`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub state: State,
    pub finished: Option<CalendarEvent>,
    pub warning: Option<DecodeWarning>,
}

impl Step {
    fn to(state: State) -> Self {
        Self {
            state,
            finished: None,
            warning: None,
        }
    }

    fn warn(mut self, warning: DecodeWarning) -> Self {
        warn!("{}", warning);
        self.warning = Some(warning);
        self
    }
}

impl State {
    pub fn advance(self, line: &str) -> Step {
        let content = ContentLine::parse(line);
        let is_vevent_marker = |marker: &str| {
            content.is_some_and(|c| c.is(marker) && c.value.trim().eq_ignore_ascii_case("VEVENT"))
        };

        match self {
            State::Outside if is_vevent_marker("BEGIN") => {
                Step::to(State::InEvent(CalendarEvent::default()))
            }
            State::Outside => Step::to(State::Outside),
            State::InEvent(event) if is_vevent_marker("END") => Step {
                state: State::Outside,
                finished: Some(event),
                warning: None,
            },
            State::InEvent(event) if is_vevent_marker("BEGIN") => {
                Step::to(State::InEvent(CalendarEvent::default()))
                    .warn(DecodeWarning::RestartedEvent { uid: event.uid })
            }
            State::InEvent(event) => match content {
                Some(property) => {
                    let (event, warning) = apply_property(event, &property);
                    let step = Step::to(State::InEvent(event));
                    match warning {
                        Some(warning) => step.warn(warning),
                        None => step,
                    }
                }
                None => Step::to(State::InEvent(event)).warn(DecodeWarning::MalformedProperty {
                    line: line.to_string(),
                }),
            },
        }
    }
}

/// Folds one property into the event under construction.
fn apply_property(
    mut event: CalendarEvent,
    property: &ContentLine<'_>,
) -> (CalendarEvent, Option<DecodeWarning>) {
    let mut warning = None;
    let mut timestamp = || {
        let value = decode_timestamp(property.value);
        if value == MIN_TIMESTAMP {
            warning = Some(DecodeWarning::InvalidTimestamp {
                property: property.name.to_string(),
                value: property.value.to_string(),
            });
        }
        value
    };

    match property.name.to_ascii_uppercase().as_str() {
        "DTSTART" => event.start = timestamp(),
        "DTEND" => event.end = timestamp(),
        "SUMMARY" => event.summary = unescape_text(property.value),
        "DESCRIPTION" => event.description = unescape_text(property.value),
        "UID" => event.uid = property.value.to_string(),
        other => debug!("Ignoring iCal property {}", other),
    }

    (event, warning)
}
