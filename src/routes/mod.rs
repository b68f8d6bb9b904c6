mod admin;
mod announcements;
mod feedback;
mod games;
mod health;
mod modules;
mod progress;
mod students;

use axum::body::Bytes;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::response::AppError;
use crate::services::ServiceError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/api/health", get(health::check))
        .nest("/api/games", games::router())
        .nest("/api/progress", progress::router())
        .nest("/api/students", students::router())
        .nest("/api/modules", modules::router())
        .nest("/api/announcements", announcements::router())
        .nest("/api/feedback", feedback::router())
        .nest("/api/admin", admin::router())
        .fallback(not_found)
        .with_state(state)
}

#[derive(Serialize)]
struct NotFoundBody {
    error: &'static str,
    path: String,
}

async fn not_found(uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundBody {
            error: "Route not found",
            path: uri.path().to_string(),
        }),
    )
        .into_response()
}

pub(crate) fn service_error(err: ServiceError) -> Response {
    match err {
        ServiceError::Validation(msg) => AppError::validation(msg).into_response(),
        ServiceError::NotFound(msg) => AppError::not_found(msg).into_response(),
        ServiceError::Conflict(msg) => AppError::conflict(msg).into_response(),
        ServiceError::Sql(err) => {
            tracing::warn!(error = %err, "store query failed");
            AppError::internal(err.to_string()).into_response()
        }
    }
}

/// Decodes a JSON body by hand so malformed and mistyped payloads come back
/// in the standard error envelope instead of the extractor's plain-text
/// rejection.
pub(crate) fn parse_json_body<T: serde::de::DeserializeOwned>(body: &Bytes) -> Result<T, Response> {
    serde_json::from_slice(body)
        .map_err(|err| AppError::validation(format!("invalid request body: {err}")).into_response())
}

pub(crate) fn missing_field(field: &str) -> Response {
    AppError::validation(format!("{field} is required")).into_response()
}
