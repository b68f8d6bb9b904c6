use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::routes::{missing_field, parse_json_body, service_error};
use crate::services::progress::{self, ProgressUpsert};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:user_id/:module_id", get(get_progress))
        .route("/save", post(save_progress))
}

#[derive(Debug, Deserialize)]
struct SaveProgressRequest {
    user_id: Option<i64>,
    module_id: Option<i64>,
    progress: Option<i64>,
    completed: Option<bool>,
}

#[derive(Serialize)]
struct OkResponse {
    ok: bool,
}

async fn get_progress(
    State(state): State<AppState>,
    Path((user_id, module_id)): Path<(i64, i64)>,
) -> Response {
    match progress::get_progress(state.db(), user_id, module_id).await {
        Ok(view) => Json(view).into_response(),
        Err(err) => service_error(err),
    }
}

async fn save_progress(State(state): State<AppState>, body: Bytes) -> Response {
    let payload: SaveProgressRequest = match parse_json_body(&body) {
        Ok(value) => value,
        Err(res) => return res,
    };

    let Some(user_id) = payload.user_id else {
        return missing_field("user_id");
    };
    let Some(module_id) = payload.module_id else {
        return missing_field("module_id");
    };

    let save = ProgressUpsert {
        user_id,
        module_id,
        progress: payload.progress.unwrap_or(0),
        completed: payload.completed.unwrap_or(false),
    };

    match progress::upsert_progress(state.db(), save).await {
        Ok(()) => Json(OkResponse { ok: true }).into_response(),
        Err(err) => service_error(err),
    }
}
