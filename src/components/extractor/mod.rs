pub mod models;
mod prompt;

pub use models::ParsedEventDescription;

use crate::config::Config;
use crate::error::{extraction_error, transient_error, AppResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rig::completion::{Chat, Message};
use rig::providers::openai::Client as OpenAiClient;
use serde_json::from_str;
use tracing::{debug, error, info};

/// Chat-completion backend behind the extraction engine
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send one prompt and return the raw model reply
    async fn complete(&self, preamble: &str, prompt: String) -> AppResult<String>;
}

/// Live OpenAI backend
pub struct OpenAiBackend {
    client: OpenAiClient,
    model: String,
}

impl OpenAiBackend {
    /// Create a backend from the loaded configuration
    pub fn new(config: &Config) -> Self {
        Self {
            client: OpenAiClient::new(&config.openai_api_key),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(&self, preamble: &str, prompt: String) -> AppResult<String> {
        let agent = self
            .client
            .agent(&self.model)
            .preamble(preamble)
            .temperature(0.2)
            .build();

        agent
            .chat(prompt, Vec::<Message>::new())
            .await
            .map_err(|e| transient_error(&format!("Model request failed: {}", e)))
    }
}

/// Engine turning free-text descriptions into structured event fields
pub struct ExtractionEngine {
    backend: Box<dyn CompletionBackend>,
    timezone: Tz,
}

impl ExtractionEngine {
    /// Create an engine over the given backend
    pub fn new(backend: Box<dyn CompletionBackend>, timezone: Tz) -> Self {
        Self { backend, timezone }
    }

    /// Extract structured event fields from one description.
    ///
    /// `now` is the invocation's wall-clock time; relative dates in the text
    /// are resolved against it, not against the model's own notion of today.
    pub async fn extract(
        &self,
        text: &str,
        now: DateTime<Utc>,
    ) -> AppResult<ParsedEventDescription> {
        let user_prompt = prompt::build_extraction_prompt(text, now, self.timezone)?;
        debug!("Requesting extraction for: {}", text);

        let response = self
            .backend
            .complete(prompt::SYSTEM_PREAMBLE, user_prompt)
            .await?;
        info!("Received extraction response");

        parse_extraction(&response)
    }
}

/// Parse and validate a model reply into structured event fields
pub fn parse_extraction(response: &str) -> AppResult<ParsedEventDescription> {
    let parsed = parse_json_from_response(response)?;
    validate(parsed)
}

/// Attempt to parse a JSON object from the model response
fn parse_json_from_response(response: &str) -> AppResult<ParsedEventDescription> {
    // The usual case: the reply is clean JSON
    if let Ok(parsed) = from_str::<ParsedEventDescription>(response.trim()) {
        return Ok(parsed);
    }

    // Fall back to a JSON object embedded in prose or code fences
    if let Some(json_start) = response.find('{') {
        if let Some(json_end) = response.rfind('}') {
            if json_start < json_end {
                let json_str = &response[json_start..=json_end];
                match from_str::<ParsedEventDescription>(json_str) {
                    Ok(parsed) => return Ok(parsed),
                    Err(e) => {
                        error!("Failed to parse JSON from response: {}", e);
                        error!("JSON string: {}", json_str);
                    }
                }
            }
        }
    }

    Err(extraction_error(&format!(
        "Model reply is not a usable JSON object: {}",
        response
    )))
}

/// Reject replies missing the fields an event cannot exist without
fn validate(parsed: ParsedEventDescription) -> AppResult<ParsedEventDescription> {
    let title = parsed.title.trim();
    if title.is_empty() || title.eq_ignore_ascii_case("unknown") {
        return Err(extraction_error("Model reply has no usable title"));
    }
    if parsed.start.trim().is_empty() {
        return Err(extraction_error("Model reply has no start time"));
    }
    Ok(parsed)
}
