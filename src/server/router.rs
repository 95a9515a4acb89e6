//! Route table of the REST API

use super::handlers::{dispatcher, study_modules, universities};
use super::host::ServerHost;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::Arc;

/// Build every route of the API
///
/// - GET /: dispatcher, links to the collections
/// - GET /health: liveness probe
/// - /universities, /universities/{id}: university CRUD
/// - /universities/{id}/modules: modules of a university, create linked
/// - /universities/{id}/modules/{module_id}: read, link (PUT), unlink (DELETE)
/// - /modules, /modules/{id}: study module CRUD
pub fn build_routes(host: Arc<ServerHost>) -> Router {
    Router::new()
        .route("/", get(dispatcher::dispatch))
        .route("/health", get(health_check))
        .merge(university_routes())
        .merge(module_routes())
        .with_state(host)
}

fn university_routes() -> Router<Arc<ServerHost>> {
    Router::new()
        .route(
            "/universities",
            get(universities::list_universities)
                .post(universities::create_university)
                .delete(universities::delete_all_universities),
        )
        .route(
            "/universities/{id}",
            get(universities::get_university)
                .put(universities::update_university)
                .delete(universities::delete_university),
        )
        .route(
            "/universities/{id}/modules",
            get(study_modules::list_university_modules)
                .post(study_modules::create_university_module),
        )
        .route(
            "/universities/{id}/modules/{module_id}",
            get(study_modules::get_university_module)
                .put(study_modules::link_module)
                .delete(study_modules::unlink_module),
        )
}

fn module_routes() -> Router<Arc<ServerHost>> {
    Router::new()
        .route(
            "/modules",
            get(study_modules::list_modules)
                .post(study_modules::create_module)
                .delete(study_modules::delete_all_modules),
        )
        .route(
            "/modules/{id}",
            get(study_modules::get_module)
                .put(study_modules::update_module)
                .delete(study_modules::delete_module),
        )
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
