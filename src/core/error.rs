//! Typed error handling for the study travel API
//!
//! Every failure a request can hit is a local, expected condition scoped to
//! that request. Services return [`ApiError`], which knows its HTTP status and
//! renders itself as a `{status, code, message, details?}` JSON body.
//!
//! # Error Categories
//!
//! - [`ResourceError`]: a referenced university or study module does not exist
//! - [`LinkError`]: the requested link/unlink conflicts with the current state
//! - [`ValidationError`]: the request itself is malformed
//! - [`ApiError::Storage`] / [`ApiError::Internal`]: repository or encoding failures

use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type of the API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing university or study module
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Link state conflicts
    #[error(transparent)]
    Link(#[from] LinkError),

    /// Malformed requests
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Repository failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Anything else that should not happen in normal operation
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error body sent to clients
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// HTTP status code, repeated in the body
    pub status: u16,
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Resource(e) => e.status_code(),
            ApiError::Link(e) => e.status_code(),
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Resource(e) => e.error_code(),
            ApiError::Link(e) => e.error_code(),
            ApiError::Validation(e) => e.error_code(),
            ApiError::Storage(_) => "STORAGE_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            status: self.status_code().as_u16(),
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::Resource(ResourceError::UniversityNotFound { id })
            | ApiError::Resource(ResourceError::StudyModuleNotFound { id }) => {
                Some(serde_json::json!({ "id": id }))
            }
            ApiError::Link(LinkError::ModuleAlreadyLinkedElsewhere {
                module_id,
                linked_to,
                requested,
            }) => Some(serde_json::json!({
                "moduleId": module_id,
                "linkedTo": linked_to,
                "requested": requested,
            })),
            ApiError::Link(LinkError::ModuleNotLinkedToThisUniversity {
                module_id,
                university_id,
                ..
            }) => Some(serde_json::json!({
                "moduleId": module_id,
                "universityId": university_id,
            })),
            ApiError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        (status, Json(self.to_response())).into_response()
    }
}

// =============================================================================
// Resource Errors
// =============================================================================

/// A referenced entity does not exist
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    #[error("University with id '{id}' not found")]
    UniversityNotFound { id: i64 },

    #[error("Study module with id '{id}' not found")]
    StudyModuleNotFound { id: i64 },
}

impl ResourceError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::NOT_FOUND
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ResourceError::UniversityNotFound { .. } => "UNIVERSITY_NOT_FOUND",
            ResourceError::StudyModuleNotFound { .. } => "STUDY_MODULE_NOT_FOUND",
        }
    }
}

// =============================================================================
// Link Errors
// =============================================================================

/// What the caller was doing when it found the module not linked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkAccess {
    /// Reading the module through the university's collection
    Read,
    /// Removing the link
    Unlink,
}

/// The link state does not allow the requested transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error(
        "Study module '{module_id}' is already linked to university '{linked_to}'. \
         Unlink it first before linking it to university '{requested}'"
    )]
    ModuleAlreadyLinkedElsewhere {
        module_id: i64,
        linked_to: i64,
        requested: i64,
    },

    #[error("Study module '{module_id}' is not linked to university '{university_id}'")]
    ModuleNotLinkedToThisUniversity {
        module_id: i64,
        university_id: i64,
        access: LinkAccess,
    },
}

impl LinkError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LinkError::ModuleAlreadyLinkedElsewhere { .. } => StatusCode::BAD_REQUEST,
            LinkError::ModuleNotLinkedToThisUniversity { access, .. } => match access {
                LinkAccess::Read => StatusCode::NOT_FOUND,
                LinkAccess::Unlink => StatusCode::BAD_REQUEST,
            },
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            LinkError::ModuleAlreadyLinkedElsewhere { .. } => "MODULE_ALREADY_LINKED",
            LinkError::ModuleNotLinkedToThisUniversity { .. } => "MODULE_NOT_LINKED",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// The request is malformed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Path id and body id disagree on an update
    #[error("Id in path ('{path_id}') does not match id in body ('{body_id}')")]
    IdMismatch { path_id: i64, body_id: i64 },

    /// Body could not be read as the expected JSON object
    #[error(
        "Could not read the request body. Please provide a valid JSON object with all required fields: {message}"
    )]
    InvalidBody { message: String },

    /// Path or query parameters could not be parsed
    #[error("Invalid request parameters: {message}")]
    InvalidParameters { message: String },

    /// Single field validation error
    #[error("Validation error for field '{field}': {message}")]
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    #[error("Validation errors: {}", format_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

fn format_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::IdMismatch { .. } => "ID_MISMATCH",
            ValidationError::InvalidBody { .. } => "INVALID_BODY",
            ValidationError::InvalidParameters { .. } => "INVALID_PARAMETERS",
            ValidationError::FieldError { .. } | ValidationError::FieldErrors(_) => {
                "VALIDATION_ERROR"
            }
        }
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FieldValidationError {
                    field: wire_name(&field),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError::FieldErrors(fields)
    }
}

// Payloads are (de)serialized camelCase; validator reports the Rust field name.
fn wire_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            name.extend(c.to_uppercase());
            upper = false;
        } else {
            name.push(c);
        }
    }
    name
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.into())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(e) => {
                ValidationError::InvalidParameters {
                    message: e.body_text(),
                }
                .into()
            }
            // Route and handler disagree on the parameters
            other => ApiError::Internal(other.body_text()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ValidationError::InvalidParameters {
            message: rejection.body_text(),
        }
        .into()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Storage(err.to_string())
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::Internal(format!("invalid URI: {}", err))
    }
}

impl From<axum::http::header::InvalidHeaderValue> for ApiError {
    fn from(err: axum::http::header::InvalidHeaderValue) -> Self {
        ApiError::Internal(format!("invalid header value: {}", err))
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for service and handler code
pub type ApiResult<T> = Result<T, ApiError>;
