use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::routes::{missing_field, parse_json_body, service_error};
use crate::services::modules::{self, ModuleRecord, NewModule};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", delete(remove))
}

#[derive(Serialize)]
struct ModuleListResponse {
    modules: Vec<ModuleRecord>,
}

#[derive(Debug, Deserialize)]
struct CreateModuleRequest {
    title: Option<String>,
    description: Option<String>,
    thumbnail: Option<String>,
    pdf_file: Option<String>,
}

#[derive(Serialize)]
struct CreatedResponse {
    success: bool,
    id: i64,
}

#[derive(Serialize)]
struct SuccessResponse {
    success: bool,
}

async fn list(State(state): State<AppState>) -> Response {
    match modules::list_modules(state.db()).await {
        Ok(modules) => Json(ModuleListResponse { modules }).into_response(),
        Err(err) => service_error(err),
    }
}

async fn create(State(state): State<AppState>, body: Bytes) -> Response {
    let payload: CreateModuleRequest = match parse_json_body(&body) {
        Ok(value) => value,
        Err(res) => return res,
    };

    let Some(title) = payload.title.filter(|v| !v.trim().is_empty()) else {
        return missing_field("title");
    };

    let module = NewModule {
        title,
        description: payload.description,
        thumbnail: payload.thumbnail,
        pdf_file: payload.pdf_file,
    };

    match modules::create_module(state.db(), module).await {
        Ok(id) => Json(CreatedResponse { success: true, id }).into_response(),
        Err(err) => service_error(err),
    }
}

async fn remove(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match modules::delete_module(state.db(), id).await {
        Ok(()) => Json(SuccessResponse { success: true }).into_response(),
        Err(err) => service_error(err),
    }
}
