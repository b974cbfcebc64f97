use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Authentication rejected: {0}")]
    #[diagnostic(code(calscribe::auth))]
    Auth(String),

    #[error("Not found: {0}")]
    #[diagnostic(code(calscribe::not_found))]
    NotFound(String),

    #[error("Transient service failure: {0}")]
    #[diagnostic(code(calscribe::transient))]
    Transient(String),

    #[error("Event extraction failed: {0}")]
    #[diagnostic(code(calscribe::extraction))]
    Extraction(String),

    #[error("Calendar API error: {0}")]
    #[diagnostic(code(calscribe::api))]
    Api(String),

    #[error("Environment error: {0}")]
    #[diagnostic(code(calscribe::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(calscribe::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(calscribe::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(calscribe::serialization))]
    Serialization(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create authentication errors
pub fn auth_error(message: &str) -> Error {
    Error::Auth(message.to_string())
}

/// Helper to create not-found errors
pub fn not_found_error(message: &str) -> Error {
    Error::NotFound(message.to_string())
}

/// Helper to create transient errors
pub fn transient_error(message: &str) -> Error {
    Error::Transient(message.to_string())
}

/// Helper to create extraction errors
pub fn extraction_error(message: &str) -> Error {
    Error::Extraction(message.to_string())
}

/// Helper to create calendar API errors
pub fn api_error(message: &str) -> Error {
    Error::Api(message.to_string())
}
