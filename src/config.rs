use crate::error::{config_error, env_error, AppResult};
use chrono::Duration;
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use std::fs;

/// Default Nylas API base URL (US region)
pub const DEFAULT_API_BASE: &str = "https://api.us.nylas.com";

/// Default model used for event extraction
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default timezone for resolving naive datetimes from the model
pub const DEFAULT_TIMEZONE: &str = "America/Los_Angeles";

/// Default duration in minutes when the extracted event has no end time
pub const DEFAULT_DURATION_MINUTES: i64 = 60;

/// Path of the optional settings file with tunable defaults
const SETTINGS_PATH: &str = "config/calscribe.toml";

/// Optional tunables loaded from the settings file
#[derive(Debug, Clone, Default, Deserialize)]
struct Settings {
    api_base: Option<String>,
    model: Option<String>,
    timezone: Option<String>,
    default_duration_minutes: Option<i64>,
}

/// Main configuration structure for the tool
#[derive(Debug, Clone)]
pub struct Config {
    /// Nylas API key
    pub nylas_api_key: String,
    /// Nylas grant identifier scoping access to one account
    pub nylas_grant_id: String,
    /// Calendar the tool lists events from and creates events in
    pub nylas_calendar_id: String,
    /// OpenAI API key used for event extraction
    pub openai_api_key: String,
    /// Nylas API base URL
    pub api_base: String,
    /// Model used for event extraction
    pub model: String,
    /// Timezone used to resolve naive datetimes
    pub timezone: String,
    /// Duration in minutes applied when no end time is extracted
    pub default_duration_minutes: i64,
}

impl Config {
    /// Load configuration from environment and the optional settings file
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // Required environment variables
        let nylas_api_key = env::var("NYLAS_API_KEY").map_err(|_| env_error("NYLAS_API_KEY"))?;
        let nylas_grant_id = env::var("NYLAS_GRANT_ID").map_err(|_| env_error("NYLAS_GRANT_ID"))?;
        let nylas_calendar_id =
            env::var("NYLAS_CALENDAR_ID").map_err(|_| env_error("NYLAS_CALENDAR_ID"))?;
        let openai_api_key = env::var("OPENAI_API_KEY").map_err(|_| env_error("OPENAI_API_KEY"))?;

        // Tunables fall back to the settings file, then to built-in defaults
        let settings = Self::load_settings();

        let api_base = env::var("NYLAS_API_URI")
            .ok()
            .or(settings.api_base)
            .unwrap_or_else(|| String::from(DEFAULT_API_BASE));

        let model = env::var("OPENAI_MODEL")
            .ok()
            .or(settings.model)
            .unwrap_or_else(|| String::from(DEFAULT_MODEL));

        let timezone = env::var("TIMEZONE")
            .ok()
            .or(settings.timezone)
            .unwrap_or_else(|| String::from(DEFAULT_TIMEZONE));

        let default_duration_minutes = match env::var("DEFAULT_EVENT_DURATION_MINUTES") {
            Ok(raw) => raw
                .parse::<i64>()
                .map_err(|_| config_error("Invalid DEFAULT_EVENT_DURATION_MINUTES format"))?,
            Err(_) => settings
                .default_duration_minutes
                .unwrap_or(DEFAULT_DURATION_MINUTES),
        };

        if default_duration_minutes <= 0 {
            return Err(config_error("Default event duration must be positive"));
        }

        Ok(Config {
            nylas_api_key,
            nylas_grant_id,
            nylas_calendar_id,
            openai_api_key,
            api_base,
            model,
            timezone,
            default_duration_minutes,
        })
    }

    /// Read the optional settings file, falling back to empty settings
    fn load_settings() -> Settings {
        match fs::read_to_string(SETTINGS_PATH) {
            Ok(content) => toml::from_str::<Settings>(&content).unwrap_or_default(),
            Err(_) => Settings::default(),
        }
    }

    /// Parse the configured timezone
    pub fn tz(&self) -> AppResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| config_error(&format!("Invalid timezone: {}", self.timezone)))
    }

    /// Duration applied when the extracted event has no end time
    pub fn default_duration(&self) -> Duration {
        Duration::minutes(self.default_duration_minutes)
    }
}
