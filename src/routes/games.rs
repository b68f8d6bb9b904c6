use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::routes::{missing_field, parse_json_body, service_error};
use crate::services::questions::{self, QuizQuestion};
use crate::services::scoring::{self, NewAttempt};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/questions/:module_id", get(get_questions))
        .route("/save-score", post(save_score))
        .route("/final-score/:student_id/:module_id", get(final_score))
}

#[derive(Debug, Deserialize)]
struct SaveScoreRequest {
    student_id: Option<i64>,
    module_id: Option<i64>,
    game_name: Option<String>,
    correct: Option<i64>,
    total: Option<i64>,
}

#[derive(Serialize)]
struct SaveScoreResponse {
    message: &'static str,
    xp_earned: i64,
    percentage: i64,
}

#[derive(Serialize)]
struct QuestionsResponse {
    questions: Vec<QuizQuestion>,
}

async fn get_questions(State(state): State<AppState>, Path(module_id): Path<i64>) -> Response {
    match questions::random_for_module(state.db(), module_id).await {
        Ok(questions) => Json(QuestionsResponse { questions }).into_response(),
        Err(err) => service_error(err),
    }
}

async fn save_score(State(state): State<AppState>, body: Bytes) -> Response {
    let payload: SaveScoreRequest = match parse_json_body(&body) {
        Ok(value) => value,
        Err(res) => return res,
    };

    // every field must be present; absent never silently becomes zero
    let Some(student_id) = payload.student_id else {
        return missing_field("student_id");
    };
    let Some(module_id) = payload.module_id else {
        return missing_field("module_id");
    };
    let Some(game_name) = payload.game_name else {
        return missing_field("game_name");
    };
    let Some(correct) = payload.correct else {
        return missing_field("correct");
    };
    let Some(total) = payload.total else {
        return missing_field("total");
    };

    let attempt = NewAttempt {
        student_id,
        module_id,
        game_name,
        correct,
        total,
    };

    match scoring::submit_attempt(state.db(), attempt).await {
        Ok(outcome) => Json(SaveScoreResponse {
            message: "Score saved + XP granted!",
            xp_earned: outcome.xp_earned,
            percentage: outcome.percentage,
        })
        .into_response(),
        Err(err) => service_error(err),
    }
}

async fn final_score(
    State(state): State<AppState>,
    Path((student_id, module_id)): Path<(i64, i64)>,
) -> Response {
    match scoring::latest_attempt(state.db(), student_id, module_id).await {
        Ok(summary) => Json(summary).into_response(),
        Err(err) => service_error(err),
    }
}
