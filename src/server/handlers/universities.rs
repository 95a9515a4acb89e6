//! Handlers for `/universities`

use super::{created, no_content_with_link};
use crate::core::error::ApiResult;
use crate::core::extractors::{Path, Query};
use crate::core::validation::Validated;
use crate::core::{CollectionParams, Entity, Upsert};
use crate::entities::{University, UniversityFilter, UniversityPayload, UniversityResource};
use crate::links::rels;
use crate::server::host::ServerHost;
use axum::Json;
use axum::extract::{OriginalUri, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

/// `GET /universities`
pub async fn list_universities(
    State(host): State<Arc<ServerHost>>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<CollectionParams>,
) -> ApiResult<Response> {
    let filter = UniversityFilter::from(&params);
    let page = host
        .universities
        .get_page(&filter, params.page.unwrap_or(0), params.sort.as_deref())
        .await?;

    let headers = host
        .links
        .headers()
        .extend(host.paging.header_values(&page, uri.path(), uri.query())?)
        .into_header_map()?;

    let body: Vec<UniversityResource<'_>> = page
        .content
        .iter()
        .map(|university| university.represent(&host.links))
        .collect();

    Ok((StatusCode::OK, headers, Json(body)).into_response())
}

/// `POST /universities`
pub async fn create_university(
    State(host): State<Arc<ServerHost>>,
    Validated(payload): Validated<UniversityPayload>,
) -> ApiResult<Response> {
    let result = host.universities.create(payload).await?;
    created(&host, &result, result.entity.represent(&host.links))
}

/// `GET /universities/{id}`
pub async fn get_university(
    State(host): State<Arc<ServerHost>>,
    Path(id): Path<i64>,
) -> ApiResult<Response> {
    let university = host.universities.get(id).await?;

    let item = University::item_path(id);
    let modules = University::modules_path(id);
    let module_template = format!("{}/{}", modules, rels::MODULE_ID_TEMPLATE);

    let headers = host
        .links
        .headers()
        .add(&item, rels::PUT_UPDATE_UNIVERSITY)
        .add(&item, rels::DEL_UNIVERSITY)
        .add(&module_template, rels::PUT_LINK_MODULE)
        .add(&module_template, rels::DEL_UNLINK_MODULE)
        .add(&module_template, rels::GET_MODULE_OF_UNIVERSITY)
        .add(&modules, rels::GET_MODULES_OF_UNIVERSITY)
        .into_header_map()?;

    Ok((
        StatusCode::OK,
        headers,
        Json(university.represent(&host.links)),
    )
        .into_response())
}

/// `PUT /universities/{id}`: update, or create under the given id
pub async fn update_university(
    State(host): State<Arc<ServerHost>>,
    Path(id): Path<i64>,
    Validated(payload): Validated<UniversityPayload>,
) -> ApiResult<Response> {
    match host.universities.update(id, payload).await? {
        Upsert::Updated(_) => no_content_with_link(&host, &University::item_path(id), rels::GET_SELF),
        Upsert::Created(result) => created(&host, &result, result.entity.represent(&host.links)),
    }
}

/// `DELETE /universities/{id}`: also deletes the linked modules
pub async fn delete_university(
    State(host): State<Arc<ServerHost>>,
    Path(id): Path<i64>,
) -> ApiResult<Response> {
    host.universities.delete(id).await?;
    no_content_with_link(
        &host,
        &University::collection_path(),
        rels::GET_UNIVERSITIES_COLLECTION,
    )
}

/// `DELETE /universities`
pub async fn delete_all_universities(State(host): State<Arc<ServerHost>>) -> ApiResult<Response> {
    host.universities.delete_all().await?;
    no_content_with_link(
        &host,
        &University::collection_path(),
        rels::GET_UNIVERSITIES_COLLECTION,
    )
}
