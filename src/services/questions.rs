use serde::Serialize;
use sqlx::FromRow;

use crate::db::Database;
use crate::services::ServiceError;

const QUIZ_SIZE: i64 = 10;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct QuizQuestion {
    pub id: i64,
    pub module_id: i64,
    pub question: String,
    pub correct_answer: String,
    pub choice_a: String,
    pub choice_b: String,
    pub choice_c: String,
    pub choice_d: String,
}

/// Up to ten questions for a module, shuffled store-side. A module with no
/// question bank yields an empty list.
pub async fn random_for_module(
    db: &Database,
    module_id: i64,
) -> Result<Vec<QuizQuestion>, ServiceError> {
    let rows = sqlx::query_as::<_, QuizQuestion>(
        r#"
        SELECT id, module_id, question, correct_answer,
               choice_a, choice_b, choice_c, choice_d
        FROM module_questions
        WHERE module_id = ?
        ORDER BY RANDOM()
        LIMIT ?
        "#,
    )
    .bind(module_id)
    .bind(QUIZ_SIZE)
    .fetch_all(db.pool())
    .await?;

    Ok(rows)
}
