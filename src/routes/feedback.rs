use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::routes::{missing_field, parse_json_body, service_error};
use crate::services::feedback::{self, FeedbackEntry, NewFeedback};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", delete(remove))
}

#[derive(Serialize)]
struct FeedbackListResponse {
    feedback: Vec<FeedbackEntry>,
}

#[derive(Debug, Deserialize)]
struct FeedbackRequest {
    title: Option<String>,
    text: Option<String>,
    student: Option<String>,
    stars: Option<i64>,
    tag: Option<String>,
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
    match feedback::list_feedback(state.db()).await {
        Ok(feedback) => Json(FeedbackListResponse { feedback }).into_response(),
        Err(err) => service_error(err),
    }
}

async fn create(State(state): State<AppState>, body: Bytes) -> Response {
    let payload: FeedbackRequest = match parse_json_body(&body) {
        Ok(value) => value,
        Err(res) => return res,
    };

    let Some(title) = payload.title.filter(|v| !v.trim().is_empty()) else {
        return missing_field("title");
    };
    let Some(text) = payload.text.filter(|v| !v.trim().is_empty()) else {
        return missing_field("text");
    };
    let Some(student) = payload.student.filter(|v| !v.trim().is_empty()) else {
        return missing_field("student");
    };

    let entry = NewFeedback {
        title,
        text,
        student,
        stars: payload.stars,
        tag: payload.tag,
    };

    match feedback::add_feedback(state.db(), entry).await {
        Ok(id) => Json(CreatedResponse { success: true, id }).into_response(),
        Err(err) => service_error(err),
    }
}

async fn remove(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match feedback::delete_feedback(state.db(), id).await {
        Ok(()) => Json(SuccessResponse { success: true }).into_response(),
        Err(err) => service_error(err),
    }
}
