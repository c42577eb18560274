//! Typed error handling for Kapi
//!
//! Every fallible operation in the crate returns a [`KapiError`] so callers can
//! match on the category instead of inspecting strings.
//!
//! # Error Categories
//!
//! - [`FetchError`]: the upstream menu could not be fetched (the only fatal
//!   failure of menu normalization)
//! - [`SessionError`]: unknown sessions/participants, closed sessions
//! - [`ValidationError`]: rejected request input
//! - [`ConfigError`]: configuration parsing and validation
//!
//! Malformed upstream menu data is never an error: offending dishes and
//! categories are dropped during normalization.
//!
//! # Example
//!
//! ```rust,ignore
//! match kapi::menu::fetch_menu(&source, &normalizer, "588181", 12.9, 77.6).await {
//!     Ok(menu) => println!("{} categories", menu.menu.len()),
//!     Err(KapiError::Fetch(FetchError::Status { status, .. })) => {
//!         eprintln!("upstream answered {}", status);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// The main error type for Kapi
#[derive(Debug)]
pub enum KapiError {
    /// Upstream menu fetch failures
    Fetch(FetchError),

    /// Session and participant errors
    Session(SessionError),

    /// Input validation errors
    Validation(ValidationError),

    /// Configuration errors
    Config(ConfigError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for KapiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KapiError::Fetch(e) => write!(f, "{}", e),
            KapiError::Session(e) => write!(f, "{}", e),
            KapiError::Validation(e) => write!(f, "{}", e),
            KapiError::Config(e) => write!(f, "{}", e),
            KapiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for KapiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KapiError::Fetch(e) => Some(e),
            KapiError::Session(e) => Some(e),
            KapiError::Validation(e) => Some(e),
            KapiError::Config(e) => Some(e),
            KapiError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl KapiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            KapiError::Fetch(_) => StatusCode::BAD_GATEWAY,
            KapiError::Session(e) => e.status_code(),
            KapiError::Validation(_) => StatusCode::BAD_REQUEST,
            KapiError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            KapiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            KapiError::Fetch(_) => "MENU_FETCH_FAILED",
            KapiError::Session(e) => e.error_code(),
            KapiError::Validation(_) => "VALIDATION_ERROR",
            KapiError::Config(_) => "CONFIG_ERROR",
            KapiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            KapiError::Fetch(FetchError::Status { status, .. }) => {
                Some(serde_json::json!({ "upstream_status": status }))
            }
            KapiError::Session(SessionError::NotFound { id }) => {
                Some(serde_json::json!({ "session_id": id.to_string() }))
            }
            KapiError::Session(SessionError::ParticipantNotFound {
                session_id,
                participant_id,
            }) => Some(serde_json::json!({
                "session_id": session_id.to_string(),
                "participant_id": participant_id.to_string()
            })),
            KapiError::Session(SessionError::Closed { id, cutoff_time }) => {
                Some(serde_json::json!({
                    "session_id": id.to_string(),
                    "cutoff_time": cutoff_time.to_rfc3339()
                }))
            }
            KapiError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for KapiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Fetch Errors
// =============================================================================

/// Upstream menu fetch failures
#[derive(Debug)]
pub enum FetchError {
    /// Network failure before a response was received
    Transport { message: String },

    /// Upstream answered with a non-2xx status
    Status { status: u16, message: String },

    /// The response body was not valid JSON
    Decode { message: String },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport { message } => {
                write!(f, "Failed to fetch menu: {}", message)
            }
            FetchError::Status { status, message } => {
                write!(f, "Failed to fetch menu: {} {}", status, message)
            }
            FetchError::Decode { message } => {
                write!(f, "Failed to fetch menu: invalid body: {}", message)
            }
        }
    }
}

impl std::error::Error for FetchError {}

impl From<FetchError> for KapiError {
    fn from(err: FetchError) -> Self {
        KapiError::Fetch(err)
    }
}

// =============================================================================
// Session Errors
// =============================================================================

/// Errors related to ordering sessions
#[derive(Debug)]
pub enum SessionError {
    /// Session was not found
    NotFound { id: Uuid },

    /// Participant is not part of the session
    ParticipantNotFound {
        session_id: Uuid,
        participant_id: Uuid,
    },

    /// The session cutoff has passed
    Closed {
        id: Uuid,
        cutoff_time: DateTime<Utc>,
    },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NotFound { id } => write!(f, "Session '{}' not found", id),
            SessionError::ParticipantNotFound {
                session_id,
                participant_id,
            } => write!(
                f,
                "Participant '{}' not found in session '{}'",
                participant_id, session_id
            ),
            SessionError::Closed { id, cutoff_time } => write!(
                f,
                "Session '{}' closed at {}",
                id,
                cutoff_time.to_rfc3339()
            ),
        }
    }
}

impl std::error::Error for SessionError {}

impl SessionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SessionError::NotFound { .. } => StatusCode::NOT_FOUND,
            SessionError::ParticipantNotFound { .. } => StatusCode::NOT_FOUND,
            SessionError::Closed { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            SessionError::NotFound { .. } => "SESSION_NOT_FOUND",
            SessionError::ParticipantNotFound { .. } => "PARTICIPANT_NOT_FOUND",
            SessionError::Closed { .. } => "SESSION_CLOSED",
        }
    }
}

impl From<SessionError> for KapiError {
    fn from(err: SessionError) -> Self {
        KapiError::Session(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug)]
pub enum ValidationError {
    /// Single field validation error
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    FieldErrors(Vec<FieldValidationError>),
}

/// A single field validation error
#[derive(Debug, Clone, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldError { field, message } => {
                write!(f, "Validation error for field '{}': {}", field, message)
            }
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for KapiError {
    fn from(err: ValidationError) -> Self {
        KapiError::Validation(err)
    }
}

impl From<validator::ValidationErrors> for KapiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FieldValidationError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        KapiError::Validation(ValidationError::FieldErrors(fields))
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Configuration file not found
    FileNotFound { path: String },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::FileNotFound { path } => {
                write!(f, "Configuration file not found: {}", path)
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for KapiError {
    fn from(err: ConfigError) -> Self {
        KapiError::Config(err)
    }
}

impl From<serde_yaml::Error> for KapiError {
    fn from(err: serde_yaml::Error) -> Self {
        KapiError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

/// A specialized Result type for Kapi operations
pub type KapiResult<T> = Result<T, KapiError>;
