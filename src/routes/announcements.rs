use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::routes::{missing_field, parse_json_body, service_error};
use crate::services::announcements::{self, Announcement, AnnouncementInput};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", put(update).delete(remove))
}

#[derive(Serialize)]
struct AnnouncementListResponse {
    announcements: Vec<Announcement>,
}

#[derive(Debug, Deserialize)]
struct AnnouncementRequest {
    title: Option<String>,
    body: Option<String>,
    category: Option<String>,
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

fn into_input(payload: AnnouncementRequest) -> Result<AnnouncementInput, Response> {
    let Some(title) = payload.title.filter(|v| !v.trim().is_empty()) else {
        return Err(missing_field("title"));
    };
    let Some(body) = payload.body.filter(|v| !v.trim().is_empty()) else {
        return Err(missing_field("body"));
    };

    Ok(AnnouncementInput {
        title,
        body,
        category: payload.category,
    })
}

async fn list(State(state): State<AppState>) -> Response {
    match announcements::list_announcements(state.db()).await {
        Ok(announcements) => Json(AnnouncementListResponse { announcements }).into_response(),
        Err(err) => service_error(err),
    }
}

async fn create(State(state): State<AppState>, body: Bytes) -> Response {
    let payload: AnnouncementRequest = match parse_json_body(&body) {
        Ok(value) => value,
        Err(res) => return res,
    };
    let input = match into_input(payload) {
        Ok(input) => input,
        Err(res) => return res,
    };

    match announcements::create_announcement(state.db(), input).await {
        Ok(id) => Json(CreatedResponse { success: true, id }).into_response(),
        Err(err) => service_error(err),
    }
}

async fn update(State(state): State<AppState>, Path(id): Path<i64>, body: Bytes) -> Response {
    let payload: AnnouncementRequest = match parse_json_body(&body) {
        Ok(value) => value,
        Err(res) => return res,
    };
    let input = match into_input(payload) {
        Ok(input) => input,
        Err(res) => return res,
    };

    match announcements::update_announcement(state.db(), id, input).await {
        Ok(()) => Json(SuccessResponse { success: true }).into_response(),
        Err(err) => service_error(err),
    }
}

async fn remove(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match announcements::delete_announcement(state.db(), id).await {
        Ok(()) => Json(SuccessResponse { success: true }).into_response(),
        Err(err) => service_error(err),
    }
}
