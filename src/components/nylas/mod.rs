pub mod models;

pub use models::{Calendar, CalendarEvent, EventDraft};

use crate::config::Config;
use crate::error::{api_error, auth_error, not_found_error, transient_error, AppResult, Error};
use models::{ListEnvelope, ObjectEnvelope};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

/// Client for the Nylas v3 calendar API
#[derive(Clone)]
pub struct NylasClient {
    client: Client,
    api_base: String,
    grant_id: String,
    api_key: String,
}

impl NylasClient {
    /// Create a new client from the loaded configuration
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            grant_id: config.nylas_grant_id.clone(),
            api_key: config.nylas_api_key.clone(),
        }
    }

    /// Build a grant-scoped endpoint URL
    fn endpoint(&self, resource: &str) -> AppResult<Url> {
        let url_str = format!("{}/v3/grants/{}/{}", self.api_base, self.grant_id, resource);
        Url::parse(&url_str).map_err(|e| api_error(&format!("Failed to parse URL: {}", e)))
    }

    /// List the calendars available to the configured grant
    pub async fn list_calendars(&self) -> AppResult<Vec<Calendar>> {
        let url = self.endpoint("calendars")?;
        debug!("Fetching calendars from {}", url);

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| transient_error(&format!("Failed to fetch calendars: {}", e)))?;

        let envelope: ListEnvelope<Calendar> = decode_response(response).await?;
        info!("Fetched {} calendars", envelope.data.len());
        Ok(envelope.data)
    }

    /// List up to `limit` events for one calendar
    pub async fn list_events(&self, calendar_id: &str, limit: u32) -> AppResult<Vec<CalendarEvent>> {
        let mut url = self.endpoint("events")?;
        url.query_pairs_mut()
            .append_pair("calendar_id", calendar_id)
            .append_pair("limit", &limit.to_string());
        debug!("Fetching events from {}", url);

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| transient_error(&format!("Failed to fetch events: {}", e)))?;

        let envelope: ListEnvelope<CalendarEvent> = decode_response(response).await?;
        info!("Fetched {} events", envelope.data.len());
        Ok(envelope.data)
    }

    /// Create a new event on one calendar
    pub async fn create_event(
        &self,
        calendar_id: &str,
        draft: &EventDraft,
    ) -> AppResult<CalendarEvent> {
        let mut url = self.endpoint("events")?;
        url.query_pairs_mut().append_pair("calendar_id", calendar_id);
        debug!("Creating event at {}", url);

        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
            .json(draft)
            .send()
            .await
            .map_err(|e| transient_error(&format!("Failed to create event: {}", e)))?;

        let envelope: ObjectEnvelope<CalendarEvent> = decode_response(response).await?;
        info!("Created event {}", envelope.data.id);
        Ok(envelope.data)
    }
}

/// Decode a response body, mapping failure statuses onto the error taxonomy
async fn decode_response<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| transient_error(&format!("Failed to read response body: {}", e)))?;

    if !status.is_success() {
        return Err(classify_status(status, &body));
    }

    serde_json::from_str(&body).map_err(|e| {
        Error::Serialization(format!("Failed to parse response: {}\nRaw body: {}", e, body))
    })
}

/// Map an HTTP failure status onto the error taxonomy
fn classify_status(status: StatusCode, body: &str) -> Error {
    let detail = format!("HTTP {} - {}", status, body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => auth_error(&detail),
        StatusCode::NOT_FOUND => not_found_error(&detail),
        StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS => transient_error(&detail),
        s if s.is_server_error() => transient_error(&detail),
        _ => api_error(&detail),
    }
}
