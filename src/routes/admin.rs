use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::routes::service_error;
use crate::services::admin::{self, ModuleUsage, TrendPoint};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/total-students", get(total_students))
        .route("/active-today", get(active_today))
        .route("/average-xp", get(average_xp))
        .route("/completion", get(completion))
        .route("/xp-trend", get(xp_trend))
        .route("/module-usage", get(module_usage))
}

#[derive(Serialize)]
struct TotalResponse {
    total: i64,
}

#[derive(Serialize)]
struct ActiveTodayResponse {
    #[serde(rename = "activeToday")]
    active_today: i64,
}

#[derive(Serialize)]
struct AverageXpResponse {
    #[serde(rename = "avgXP")]
    avg_xp: i64,
}

#[derive(Serialize)]
struct CompletionResponse {
    completion: i64,
}

#[derive(Serialize)]
struct TrendResponse {
    trend: Vec<TrendPoint>,
}

#[derive(Serialize)]
struct UsageResponse {
    usage: Vec<ModuleUsage>,
}

async fn total_students(State(state): State<AppState>) -> Response {
    match admin::total_students(state.db()).await {
        Ok(total) => Json(TotalResponse { total }).into_response(),
        Err(err) => service_error(err),
    }
}

async fn active_today(State(state): State<AppState>) -> Response {
    match admin::active_today(state.db()).await {
        Ok(active_today) => Json(ActiveTodayResponse { active_today }).into_response(),
        Err(err) => service_error(err),
    }
}

async fn average_xp(State(state): State<AppState>) -> Response {
    match admin::average_xp(state.db()).await {
        Ok(avg_xp) => Json(AverageXpResponse { avg_xp }).into_response(),
        Err(err) => service_error(err),
    }
}

async fn completion(State(state): State<AppState>) -> Response {
    match admin::completion(state.db()).await {
        Ok(completion) => Json(CompletionResponse { completion }).into_response(),
        Err(err) => service_error(err),
    }
}

async fn xp_trend(State(state): State<AppState>) -> Response {
    match admin::xp_trend(state.db()).await {
        Ok(trend) => Json(TrendResponse { trend }).into_response(),
        Err(err) => service_error(err),
    }
}

async fn module_usage(State(state): State<AppState>) -> Response {
    match admin::module_usage(state.db()).await {
        Ok(usage) => Json(UsageResponse { usage }).into_response(),
        Err(err) => service_error(err),
    }
}
