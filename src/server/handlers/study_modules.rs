//! Handlers for `/modules` and `/universities/{id}/modules`

use super::{created, no_content_with_link};
use crate::core::error::ApiResult;
use crate::core::extractors::{Path, Query};
use crate::core::validation::Validated;
use crate::core::{CollectionParams, Entity, Page, Upsert};
use crate::entities::{
    StudyModule, StudyModuleFilter, StudyModulePayload, StudyModuleResource, University,
};
use crate::links::rels;
use crate::server::host::ServerHost;
use axum::Json;
use axum::extract::{OriginalUri, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

fn collection_response(
    host: &ServerHost,
    uri: &Uri,
    page: &Page<StudyModule>,
) -> ApiResult<Response> {
    let headers = host
        .links
        .headers()
        .extend(host.paging.header_values(page, uri.path(), uri.query())?)
        .into_header_map()?;

    let body: Vec<StudyModuleResource<'_>> = page
        .content
        .iter()
        .map(|module| module.represent(&host.links))
        .collect();

    Ok((StatusCode::OK, headers, Json(body)).into_response())
}

fn module_response(host: &ServerHost, module: &StudyModule) -> ApiResult<Response> {
    let item = StudyModule::item_path(module.id);
    let headers = host
        .links
        .headers()
        .add(&item, rels::PUT_UPDATE_MODULE)
        .add(&item, rels::DEL_MODULE)
        .into_header_map()?;

    Ok((StatusCode::OK, headers, Json(module.represent(&host.links))).into_response())
}

/// `GET /modules`
pub async fn list_modules(
    State(host): State<Arc<ServerHost>>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<CollectionParams>,
) -> ApiResult<Response> {
    let filter = StudyModuleFilter::from(&params);
    let page = host
        .modules
        .get_page(&filter, params.page.unwrap_or(0), params.sort.as_deref())
        .await?;
    collection_response(&host, &uri, &page)
}

/// `POST /modules`: the new module is unlinked
pub async fn create_module(
    State(host): State<Arc<ServerHost>>,
    Validated(payload): Validated<StudyModulePayload>,
) -> ApiResult<Response> {
    let result = host.modules.create(payload).await?;
    created(&host, &result, result.entity.represent(&host.links))
}

/// `GET /modules/{id}`
pub async fn get_module(
    State(host): State<Arc<ServerHost>>,
    Path(id): Path<i64>,
) -> ApiResult<Response> {
    let module = host.modules.get(id).await?;
    module_response(&host, &module)
}

/// `PUT /modules/{id}`: update, or create under the given id
pub async fn update_module(
    State(host): State<Arc<ServerHost>>,
    Path(id): Path<i64>,
    Validated(payload): Validated<StudyModulePayload>,
) -> ApiResult<Response> {
    match host.modules.update(id, payload).await? {
        Upsert::Updated(_) => {
            no_content_with_link(&host, &StudyModule::item_path(id), rels::GET_SELF)
        }
        Upsert::Created(result) => created(&host, &result, result.entity.represent(&host.links)),
    }
}

/// `DELETE /modules/{id}`
pub async fn delete_module(
    State(host): State<Arc<ServerHost>>,
    Path(id): Path<i64>,
) -> ApiResult<Response> {
    host.modules.delete(id).await?;
    no_content_with_link(
        &host,
        &StudyModule::collection_path(),
        rels::GET_STUDY_MODULES_COLLECTION,
    )
}

/// `DELETE /modules`
pub async fn delete_all_modules(State(host): State<Arc<ServerHost>>) -> ApiResult<Response> {
    host.modules.delete_all().await?;
    no_content_with_link(
        &host,
        &StudyModule::collection_path(),
        rels::GET_STUDY_MODULES_COLLECTION,
    )
}

/// `GET /universities/{id}/modules`
pub async fn list_university_modules(
    State(host): State<Arc<ServerHost>>,
    Path(university_id): Path<i64>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<CollectionParams>,
) -> ApiResult<Response> {
    let filter = StudyModuleFilter::from(&params);
    let page = host
        .modules
        .get_page_for_university(
            university_id,
            &filter,
            params.page.unwrap_or(0),
            params.sort.as_deref(),
        )
        .await?;
    collection_response(&host, &uri, &page)
}

/// `POST /universities/{id}/modules`: the new module starts out linked
pub async fn create_university_module(
    State(host): State<Arc<ServerHost>>,
    Path(university_id): Path<i64>,
    Validated(payload): Validated<StudyModulePayload>,
) -> ApiResult<Response> {
    let result = host
        .modules
        .create_for_university(university_id, payload)
        .await?;
    created(&host, &result, result.entity.represent(&host.links))
}

/// `GET /universities/{id}/modules/{module_id}`: 404 unless linked
pub async fn get_university_module(
    State(host): State<Arc<ServerHost>>,
    Path((university_id, module_id)): Path<(i64, i64)>,
) -> ApiResult<Response> {
    let module = host
        .modules
        .get_for_university(university_id, module_id)
        .await?;
    module_response(&host, &module)
}

/// `PUT /universities/{id}/modules/{module_id}`: link
pub async fn link_module(
    State(host): State<Arc<ServerHost>>,
    Path((university_id, module_id)): Path<(i64, i64)>,
) -> ApiResult<Response> {
    host.modules.link(university_id, module_id).await?;
    no_content_with_link(
        &host,
        &University::modules_path(university_id),
        rels::GET_MODULES_OF_UNIVERSITY,
    )
}

/// `DELETE /universities/{id}/modules/{module_id}`: unlink
pub async fn unlink_module(
    State(host): State<Arc<ServerHost>>,
    Path((university_id, module_id)): Path<(i64, i64)>,
) -> ApiResult<Response> {
    host.modules.unlink(university_id, module_id).await?;
    no_content_with_link(
        &host,
        &University::modules_path(university_id),
        rels::GET_MODULES_OF_UNIVERSITY,
    )
}
