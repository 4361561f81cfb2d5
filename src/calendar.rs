use std::time::Duration;

use chrono::Utc;
use log::{error, info};
use reqwest::{Client, header::CONTENT_TYPE};

use crate::error::{Error, Result};
use crate::models::ICalData;

pub const DEFAULT_CONTENT_TYPE: &str = "text/calendar";

/// HTTP client whose requests give up after `timeout`.
pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder().timeout(timeout).build()
}

fn classify(url: &str, source: reqwest::Error) -> Error {
    let url = url.to_string();
    if source.is_timeout() {
        error!("Timeout while fetching iCal data from {}: {}", url, source);
        Error::Timeout { url, source }
    } else {
        error!("HTTP error while fetching iCal data from {}: {}", url, source);
        Error::ExternalService { url, source }
    }
}

/// Downloads the raw feed from the booking platform.
pub async fn fetch_ical_data(
    client: &Client,
    url: &str,
    username: Option<String>,
    password: Option<String>,
) -> Result<ICalData> {
    info!("Fetching iCal data from {}", url);

    let mut request_builder = client.get(url);

    if let Some(ical_username) = username {
        request_builder = request_builder.basic_auth(ical_username, password);
    }

    let response = request_builder
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|e| classify(url, e))?;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::trim)
        .filter(|media_type| !media_type.is_empty())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();

    let data = response.text().await.map_err(|e| classify(url, e))?;

    info!("Successfully retrieved iCal data ({} bytes)", data.len());

    Ok(ICalData {
        data,
        content_type,
        last_modified: Utc::now(),
    })
}
