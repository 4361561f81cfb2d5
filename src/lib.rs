use log::debug;
use reqwest::Client;

pub mod availability;
pub mod calendar;
pub mod config;
pub mod error;
pub mod ics_parser;
pub mod models;

pub use error::{Error, ParseFailure, Result};
pub use models::{CalendarEvent, ICalData, MIN_TIMESTAMP};

/// Downloads the booking feed at `url` and parses its events.
pub async fn load_events(
    client: &Client,
    url: &str,
    username: Option<String>,
    password: Option<String>,
) -> Result<Vec<CalendarEvent>> {
    let ical = calendar::fetch_ical_data(client, url, username, password).await?;
    debug!(
        "Received {} ({} bytes) at {}",
        ical.content_type,
        ical.data.len(),
        ical.last_modified
    );

    ics_parser::parse_events(Some(&ical.data))
}
