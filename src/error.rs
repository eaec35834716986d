//! Error types for ddop

use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::client::models::ApiErrorResponse;

/// Result type alias for ddop operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Prompt(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Prompt(err.to_string())
    }
}

/// Body of a non-2xx API response.
///
/// `model` is populated when the body decodes as the standard
/// `{"errors": [...]}` payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBody {
    pub status: u16,
    pub raw: String,
    pub model: Option<ApiErrorResponse>,
}

impl ErrorBody {
    /// Build an error body, decoding the standard error payload if possible.
    pub fn new(status: u16, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let model = serde_json::from_str::<ApiErrorResponse>(&raw).ok();
        Self { status, raw, model }
    }

    /// Error messages reported by the API, if any.
    pub fn errors(&self) -> &[String] {
        self.model
            .as_ref()
            .map(|m| m.errors.as_slice())
            .unwrap_or_default()
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.errors();
        if !errors.is_empty() {
            write!(f, "{}", errors.join("; "))
        } else if !self.raw.is_empty() {
            write!(f, "{}", self.raw)
        } else {
            write!(f, "HTTP {}", self.status)
        }
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}. Check DD_API_KEY or run `ddop init`.")]
    Unauthorized(ErrorBody),

    #[error("Access denied: {0}. The application key may lack the required scope.")]
    Forbidden(ErrorBody),

    #[error("Resource not found: {0}")]
    NotFound(ErrorBody),

    #[error("Rate limit exceeded. Retry after {retry_after:?}")]
    RateLimit {
        retry_after: Duration,
        body: ErrorBody,
    },

    #[error("Bad request: {0}")]
    BadRequest(ErrorBody),

    #[error("Server error: {0}")]
    ServerError(ErrorBody),

    #[error("Unexpected status {status}: {0}", status = .0.status)]
    Unexpected(ErrorBody),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Unstable operation '{0}' is disabled")]
    UnstableOperationDisabled(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl ApiError {
    /// Map a non-2xx status and its body to a typed error.
    pub fn from_status(status: u16, raw: impl Into<String>, retry_after: Option<Duration>) -> Self {
        let body = ErrorBody::new(status, raw);
        match status {
            400 | 422 => ApiError::BadRequest(body),
            401 => ApiError::Unauthorized(body),
            403 => ApiError::Forbidden(body),
            404 => ApiError::NotFound(body),
            429 => ApiError::RateLimit {
                retry_after: retry_after.unwrap_or(Duration::from_secs(60)),
                body,
            },
            500..=599 => ApiError::ServerError(body),
            _ => ApiError::Unexpected(body),
        }
    }

    /// The HTTP error body, for status-mapped variants.
    pub fn body(&self) -> Option<&ErrorBody> {
        match self {
            ApiError::Unauthorized(body)
            | ApiError::Forbidden(body)
            | ApiError::NotFound(body)
            | ApiError::BadRequest(body)
            | ApiError::ServerError(body)
            | ApiError::Unexpected(body)
            | ApiError::RateLimit { body, .. } => Some(body),
            _ => None,
        }
    }

    /// The HTTP status code, for status-mapped variants.
    pub fn status(&self) -> Option<u16> {
        self.body().map(|b| b.status)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `ddop init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("API key not configured. Set DD_API_KEY or run `ddop init`.")]
    MissingApiKey,

    #[error("Application key not configured. Set DD_APP_KEY or run `ddop init`.")]
    MissingAppKey,

    #[error("Unknown Datadog site '{0}'")]
    UnknownSite(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
