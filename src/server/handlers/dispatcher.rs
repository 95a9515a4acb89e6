//! Entry point of the API

use crate::core::Entity;
use crate::core::error::ApiResult;
use crate::entities::{StudyModule, University};
use crate::links::rels;
use crate::server::host::ServerHost;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

/// `GET /`: advertise the collections and what can be done with them
pub async fn dispatch(State(host): State<Arc<ServerHost>>) -> ApiResult<Response> {
    let universities = University::collection_path();
    let modules = StudyModule::collection_path();

    let headers = host
        .links
        .headers()
        .add(&universities, rels::GET_UNIVERSITIES_COLLECTION)
        .add(&modules, rels::GET_STUDY_MODULES_COLLECTION)
        .add(&universities, rels::POST_CREATE_UNIVERSITY)
        .add(&modules, rels::POST_CREATE_STUDY_MODULE)
        .add(&universities, rels::DELETE_ALL_UNIVERSITIES)
        .add(&modules, rels::DELETE_ALL_STUDY_MODULES)
        .into_header_map()?;

    Ok((StatusCode::OK, headers).into_response())
}
