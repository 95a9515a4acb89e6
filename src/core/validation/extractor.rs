//! Axum extractor for validated request bodies
//!
//! This module provides the `Validated<T>` extractor that parses and
//! validates request payloads before they reach handlers.

use crate::core::error::{ApiError, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Axum extractor that parses JSON and runs the payload's validation rules
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_university(
///     State(host): State<Arc<ServerHost>>,
///     Validated(payload): Validated<UniversityPayload>,
/// ) -> ApiResult<Response> {
///     // payload is already parsed and validated
/// }
/// ```
///
/// Malformed JSON and missing required fields are rejected with
/// [`ValidationError::InvalidBody`], rule violations with
/// [`ValidationError::FieldErrors`]. Both answer 400.
#[derive(Debug, Clone)]
pub struct Validated<T>(pub T);

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state).await.map_err(|e| {
            ValidationError::InvalidBody {
                message: e.body_text(),
            }
        })?;

        payload.validate()?;

        Ok(Validated(payload))
    }
}
