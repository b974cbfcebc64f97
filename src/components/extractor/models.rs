use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Structured event fields extracted from a free-text description
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ParsedEventDescription {
    /// Short title naming the occasion
    pub title: String,
    /// Longer description of the event, when one can be inferred
    #[serde(default)]
    pub description: Option<String>,
    /// Event start as an RFC 3339 datetime in the user's timezone
    pub start: String,
    /// Event end; absent when the text states no end time or duration
    #[serde(default)]
    pub end: Option<String>,
    /// Where the event takes place, when stated
    #[serde(default)]
    pub location: Option<String>,
    /// Names of the people attending
    #[serde(default)]
    pub participants: Vec<String>,
}
