use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::components::extractor::{ExtractionEngine, OpenAiBackend};
use crate::components::nylas::models::EventDraft;
use crate::components::nylas::{CalendarEvent, NylasClient};
use crate::config::Config;
use crate::error::AppResult;
use crate::utils::time::resolve_event_window;

/// Command-line interface for the calendar tool
#[derive(Parser)]
#[command(
    name = "calscribe",
    version,
    about = "Create Nylas calendar events from natural language"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the calendars available to the configured grant
    Calendars,
    /// List upcoming events on a calendar
    Events {
        /// Maximum number of events to fetch
        #[arg(short, long, default_value_t = 5)]
        limit: u32,
        /// Calendar to read from, defaulting to the configured one
        #[arg(long)]
        calendar: Option<String>,
    },
    /// Create an event from a natural-language description
    Add {
        /// Free-text description of the event
        text: String,
        /// Calendar to create into, defaulting to the configured one
        #[arg(long)]
        calendar: Option<String>,
    },
}

/// Parse arguments and run the selected command
pub async fn run(config: Config) -> AppResult<()> {
    let cli = Cli::parse();
    let nylas = NylasClient::new(&config);

    match cli.command {
        Commands::Calendars => list_calendars(&nylas).await,
        Commands::Events { limit, calendar } => {
            let calendar_id = calendar.unwrap_or_else(|| config.nylas_calendar_id.clone());
            list_events(&nylas, &calendar_id, limit).await
        }
        Commands::Add { text, calendar } => {
            let calendar_id = calendar.unwrap_or_else(|| config.nylas_calendar_id.clone());
            add_event(&nylas, &config, &calendar_id, &text).await
        }
    }
}

/// Print the calendars available to the configured grant
async fn list_calendars(nylas: &NylasClient) -> AppResult<()> {
    let calendars = nylas.list_calendars().await?;

    if calendars.is_empty() {
        println!("No calendars found for this account");
        return Ok(());
    }

    for calendar in calendars {
        match calendar.description {
            Some(description) => println!("{}  {} - {}", calendar.id, calendar.name, description),
            None => println!("{}  {}", calendar.id, calendar.name),
        }
    }

    Ok(())
}

/// Print up to `limit` events for one calendar
async fn list_events(nylas: &NylasClient, calendar_id: &str, limit: u32) -> AppResult<()> {
    let events = nylas.list_events(calendar_id, limit).await?;

    if events.is_empty() {
        println!("No events found on calendar {}", calendar_id);
        return Ok(());
    }

    for event in events {
        println!("{}  {}", event.id, describe_event(&event));
    }

    Ok(())
}

/// One-line human-readable rendering of an event
fn describe_event(event: &CalendarEvent) -> String {
    let title = event.title.as_deref().unwrap_or("(untitled)");

    let when = event.when.as_ref().and_then(|when| {
        if let Some(start_time) = when.start_time {
            chrono::DateTime::from_timestamp(start_time, 0).map(|dt| dt.to_rfc3339())
        } else {
            when.date.clone().or_else(|| when.start_date.clone())
        }
    });

    match when {
        Some(when) => format!("{} @ {}", title, when),
        None => title.to_string(),
    }
}

/// Synthesize an event from free text and create it on the calendar
async fn add_event(
    nylas: &NylasClient,
    config: &Config,
    calendar_id: &str,
    text: &str,
) -> AppResult<()> {
    let timezone = config.tz()?;
    let backend = Box::new(OpenAiBackend::new(config));
    let engine = ExtractionEngine::new(backend, timezone);

    // The wall clock is read once here; every relative date in the text
    // resolves against this instant
    let now = Utc::now();

    let parsed = engine.extract(text, now).await?;
    info!("Extracted event: {}", parsed.title);

    let window = resolve_event_window(&parsed, timezone, config.default_duration())?;
    let draft = EventDraft::from_extraction(&parsed, &window);
    let event = nylas.create_event(calendar_id, &draft).await?;

    println!("Created event {} ({})", draft.title, event.id);
    println!(
        "  starts: {}",
        window.start.with_timezone(&timezone).to_rfc3339()
    );
    println!(
        "  ends:   {}",
        window.end.with_timezone(&timezone).to_rfc3339()
    );
    if !parsed.participants.is_empty() {
        println!("  participants: {}", parsed.participants.join(", "));
    }

    Ok(())
}
