use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct RootResponse {
    status: &'static str,
    message: &'static str,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    db: &'static str,
    uptime: u64,
}

pub async fn root() -> Response {
    Json(RootResponse {
        status: "OK",
        message: "EduVerso backend running",
    })
    .into_response()
}

pub async fn check(State(state): State<AppState>) -> Response {
    match state.db().ping().await {
        Ok(()) => Json(HealthResponse {
            status: "ok",
            db: "connected",
            uptime: state.uptime_seconds(),
        })
        .into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "health check ping failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse {
                    status: "error",
                    db: "disconnected",
                    uptime: state.uptime_seconds(),
                }),
            )
                .into_response()
        }
    }
}
