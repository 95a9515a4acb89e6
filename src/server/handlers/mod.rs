//! HTTP handlers
//!
//! Handlers translate between HTTP and the resource services and decorate
//! every response with its `Link` headers.

pub mod dispatcher;
pub mod study_modules;
pub mod universities;

use crate::core::Created;
use crate::core::error::ApiResult;
use crate::server::host::ServerHost;
use axum::Json;
use axum::http::header::LOCATION;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// 204 with a single `Link` header
pub(crate) fn no_content_with_link(host: &ServerHost, path: &str, rel: &str) -> ApiResult<Response> {
    let headers = host.links.headers().add(path, rel).into_header_map()?;
    Ok((StatusCode::NO_CONTENT, headers).into_response())
}

/// 201 with the absolute `Location` of the new resource and its representation
pub(crate) fn created<T, B: Serialize>(
    host: &ServerHost,
    created: &Created<T>,
    body: B,
) -> ApiResult<Response> {
    let mut headers = HeaderMap::new();
    let location = host.links.absolute(&created.location);
    headers.insert(LOCATION, HeaderValue::try_from(location)?);
    Ok((StatusCode::CREATED, headers, Json(body)).into_response())
}
