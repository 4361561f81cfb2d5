use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use log::{debug, info};

use ical_availability::{
    CalendarEvent,
    availability::{self, DateRange, StayStatus},
    calendar,
    config::Config,
    ics_parser, load_events,
};

#[derive(Debug, Parser)]
#[command(version, about = "Booked dates from a holiday-rental iCal feed")]
struct Cli {
    /// Feed URL, overrides ICAL_URL.
    #[arg(long, global = true)]
    url: Option<String>,

    /// Read the feed from a local .ics file instead of fetching it.
    #[arg(long, global = true, conflicts_with = "url")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print parsed events as JSON.
    Events {
        #[arg(long)]
        pretty: bool,
    },
    /// Print booked date ranges (end date is the first free day).
    Unavailable {
        #[arg(long)]
        json: bool,
    },
    /// Check whether a stay can be booked.
    Check {
        #[arg(long)]
        check_in: NaiveDate,
        #[arg(long)]
        check_out: NaiveDate,
        /// Overrides MINIMUM_STAY_NIGHTS.
        #[arg(long)]
        minimum_nights: Option<u32>,
    },
}

async fn read_events(cli: &Cli, config: &Config) -> Result<Vec<CalendarEvent>> {
    if let Some(path) = &cli.file {
        debug!("Reading calendar from {}...", path.display());
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read ICS file: {}", path.display()))?;
        return ics_parser::parse_events(Some(&text))
            .with_context(|| format!("Failed to parse ICS file: {}", path.display()));
    }

    let url = match &cli.url {
        Some(url) => url.as_str(),
        None => config.ical_url()?,
    };

    let client = calendar::build_client(config.fetch_timeout)
        .context("Failed to build HTTP client")?;

    load_events(
        &client,
        url,
        config.ical_username.clone(),
        config.ical_password.clone(),
    )
    .await
    .with_context(|| format!("Failed to load calendar. URL: {}", url))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let config = Config::from_env()?;
    env_logger::init();

    let cli = Cli::parse();
    let events = read_events(&cli, &config).await?;

    match cli.command {
        Command::Events { pretty } => {
            let json = if pretty {
                serde_json::to_string_pretty(&events)?
            } else {
                serde_json::to_string(&events)?
            };
            println!("{}", json);
        }
        Command::Unavailable { json } => {
            let ranges = availability::unavailable_ranges(&events);
            if json {
                println!("{}", serde_json::to_string(&ranges)?);
            } else {
                for range in &ranges {
                    println!("{} -> {}", range.start, range.end);
                }
            }
            info!("{} booked ranges", ranges.len());
        }
        Command::Check {
            check_in,
            check_out,
            minimum_nights,
        } => {
            let stay = DateRange {
                start: check_in,
                end: check_out,
            };
            let unavailable = availability::unavailable_dates_within(&events, stay);
            let minimum = minimum_nights.unwrap_or(config.minimum_stay_nights);
            let message = match availability::check_stay(check_in, check_out, &unavailable, minimum)
            {
                StayStatus::Available => "Available for your dates".to_string(),
                StayStatus::Unavailable => "Not available for selected dates".to_string(),
                StayStatus::MinimumStay { minimum, .. } => {
                    format!("Minimum stay is {} nights", minimum)
                }
                StayStatus::InvalidRange => "Check-out must be after check-in".to_string(),
            };
            println!("{}", message);
        }
    }

    Ok(())
}
