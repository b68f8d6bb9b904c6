use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::routes::{missing_field, parse_json_body, service_error};
use crate::services::progress::{self, RecentModule};
use crate::services::students::{self, NewStudent, StudentRecord, StudentUpdate};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", get(list))
        .route("/", post(create))
        .route("/:id", get(get_one).put(update).delete(remove))
        .route("/:id/add-xp", post(add_xp))
        .route("/:id/recent", get(recent))
}

#[derive(Serialize)]
struct StudentListResponse {
    students: Vec<StudentRecord>,
}

#[derive(Debug, Deserialize)]
struct StudentRequest {
    fullname: Option<String>,
    email: Option<String>,
    avatar: Option<String>,
    xp: Option<i64>,
    streak: Option<i64>,
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

#[derive(Debug, Deserialize)]
struct AddXpRequest {
    amount: Option<i64>,
}

#[derive(Serialize)]
struct AddXpResponse {
    ok: bool,
    #[serde(rename = "newXp")]
    new_xp: i64,
}

#[derive(Serialize)]
struct RecentResponse {
    found: bool,
    #[serde(flatten)]
    module: Option<RecentModule>,
}

async fn list(State(state): State<AppState>) -> Response {
    match students::list_students(state.db()).await {
        Ok(students) => Json(StudentListResponse { students }).into_response(),
        Err(err) => service_error(err),
    }
}

async fn get_one(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match students::get_student(state.db(), id).await {
        Ok(student) => Json(student).into_response(),
        Err(err) => service_error(err),
    }
}

async fn create(State(state): State<AppState>, body: Bytes) -> Response {
    let payload: StudentRequest = match parse_json_body(&body) {
        Ok(value) => value,
        Err(res) => return res,
    };

    let Some(fullname) = payload.fullname.filter(|v| !v.trim().is_empty()) else {
        return missing_field("fullname");
    };
    let Some(email) = payload.email.filter(|v| !v.trim().is_empty()) else {
        return missing_field("email");
    };

    let student = NewStudent {
        fullname,
        email,
        avatar: payload.avatar,
        xp: payload.xp.unwrap_or(0),
        streak: payload.streak.unwrap_or(0),
    };

    match students::create_student(state.db(), student).await {
        Ok(id) => Json(CreatedResponse { success: true, id }).into_response(),
        Err(err) => service_error(err),
    }
}

async fn update(State(state): State<AppState>, Path(id): Path<i64>, body: Bytes) -> Response {
    let payload: StudentRequest = match parse_json_body(&body) {
        Ok(value) => value,
        Err(res) => return res,
    };

    let Some(fullname) = payload.fullname.filter(|v| !v.trim().is_empty()) else {
        return missing_field("fullname");
    };
    let Some(email) = payload.email.filter(|v| !v.trim().is_empty()) else {
        return missing_field("email");
    };

    let update = StudentUpdate {
        fullname,
        email,
        avatar: payload.avatar,
        xp: payload.xp,
        streak: payload.streak,
    };

    match students::update_student(state.db(), id, update).await {
        Ok(()) => Json(SuccessResponse { success: true }).into_response(),
        Err(err) => service_error(err),
    }
}

async fn remove(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match students::delete_student(state.db(), id).await {
        Ok(()) => Json(SuccessResponse { success: true }).into_response(),
        Err(err) => service_error(err),
    }
}

async fn add_xp(State(state): State<AppState>, Path(id): Path<i64>, body: Bytes) -> Response {
    let payload: AddXpRequest = match parse_json_body(&body) {
        Ok(value) => value,
        Err(res) => return res,
    };

    let Some(amount) = payload.amount else {
        return missing_field("amount");
    };

    match students::add_xp(state.db(), id, amount).await {
        Ok(new_xp) => Json(AddXpResponse { ok: true, new_xp }).into_response(),
        Err(err) => service_error(err),
    }
}

async fn recent(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match progress::recent_module(state.db(), id).await {
        Ok(module) => Json(RecentResponse {
            found: module.is_some(),
            module,
        })
        .into_response(),
        Err(err) => service_error(err),
    }
}
