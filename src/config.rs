use std::{env, str::FromStr, time::Duration};

use anyhow::{Context, Result};
use dotenv::dotenv;

pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MINIMUM_STAY_NIGHTS: u32 = 2;

#[derive(Debug, Clone)]
pub struct Config {
    pub ical_url: Option<String>,
    pub ical_username: Option<String>,
    pub ical_password: Option<String>,
    pub fetch_timeout: Duration,
    pub minimum_stay_nights: u32,
}

fn get_optional_parsed<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(val_str) => {
            let value = val_str.trim().parse::<T>().with_context(|| {
                format!("'{}' is invalid: could not parse '{}'", name, val_str)
            })?;
            Ok(Some(value))
        }
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("'{}' contained invalid unicode", name)),
    }
}

impl Config {
    // Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let fetch_timeout_secs =
            get_optional_parsed::<u64>("FETCH_TIMEOUT_SECS")?.unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS);

        Ok(Self {
            ical_url: env::var("ICAL_URL").ok().filter(|url| !url.is_empty()),
            ical_username: env::var("ICAL_USERNAME").ok(),
            ical_password: env::var("ICAL_PASSWORD").ok(),
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            minimum_stay_nights: get_optional_parsed::<u32>("MINIMUM_STAY_NIGHTS")?
                .unwrap_or(DEFAULT_MINIMUM_STAY_NIGHTS),
        })
    }

    pub fn ical_url(&self) -> Result<&str> {
        self.ical_url
            .as_deref()
            .context("ICAL_URL environment variable not set")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ical_url: None,
            ical_username: None,
            ical_password: None,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            minimum_stay_nights: DEFAULT_MINIMUM_STAY_NIGHTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_url_is_reported() {
        let err = Config::default().ical_url().unwrap_err();

        assert_eq!(err.to_string(), "ICAL_URL environment variable not set");
    }

    #[test]
    fn defaults_to_thirty_second_timeout_and_two_night_stay() {
        let config = Config::default();

        assert_eq!(config.fetch_timeout, Duration::from_secs(30));
        assert_eq!(config.minimum_stay_nights, 2);
    }

    #[test]
    fn unset_optional_value_is_none() {
        let value = get_optional_parsed::<u64>("ICAL_AVAILABILITY_TEST_UNSET_VARIABLE").unwrap();

        assert_eq!(value, None);
    }
}
