use serde::{Deserialize, Serialize};

use crate::components::extractor::models::ParsedEventDescription;
use crate::utils::time::EventWindow;

/// Envelope wrapping Nylas list responses
#[derive(Debug, Clone, Deserialize)]
pub struct ListEnvelope<T> {
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub data: Vec<T>,
}

/// Envelope wrapping single-object Nylas responses
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectEnvelope<T> {
    #[serde(default)]
    pub request_id: Option<String>,
    pub data: T,
}

/// A calendar owned by the connected account
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Calendar {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub is_primary: Option<bool>,
}

/// Event participant as carried on the wire
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Participant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Time window of an event; only the fields present on the wire are set
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EventWhen {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Simplified calendar event representation
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CalendarEvent {
    pub id: String,
    #[serde(default)]
    pub calendar_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub busy: Option<bool>,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub when: Option<EventWhen>,
}

/// Timespan payload carried in event creation requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timespan {
    pub object: String,
    pub start_time: i64,
    pub end_time: i64,
}

impl Timespan {
    /// Build the wire timespan from a resolved event window
    pub fn from_window(window: &EventWindow) -> Self {
        Self {
            object: "timespan".to_string(),
            start_time: window.start_timestamp(),
            end_time: window.end_timestamp(),
        }
    }
}

/// Payload for creating a new event
#[derive(Debug, Clone, Serialize)]
pub struct EventDraft {
    pub title: String,
    pub status: String,
    pub busy: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub participants: Vec<Participant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub when: Timespan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl EventDraft {
    /// Build the creation payload from extracted fields and a resolved window
    pub fn from_extraction(parsed: &ParsedEventDescription, window: &EventWindow) -> Self {
        let participants = parsed
            .participants
            .iter()
            .map(|name| Participant {
                name: Some(name.clone()),
                email: None,
                status: None,
            })
            .collect();

        Self {
            title: parsed.title.clone(),
            status: "confirmed".to_string(),
            busy: true,
            participants,
            description: parsed.description.clone(),
            when: Timespan::from_window(window),
            location: parsed.location.clone(),
        }
    }
}
