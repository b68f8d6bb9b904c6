use chrono::Utc;
use serde::Serialize;
use sqlx::FromRow;

use crate::db::Database;
use crate::services::ServiceError;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FeedbackEntry {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub student: String,
    pub stars: i64,
    pub tag: String,
    pub date: String,
}

#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub title: String,
    pub text: String,
    pub student: String,
    pub stars: Option<i64>,
    pub tag: Option<String>,
}

pub async fn list_feedback(db: &Database) -> Result<Vec<FeedbackEntry>, ServiceError> {
    let rows = sqlx::query_as::<_, FeedbackEntry>(
        "SELECT id, title, text, student, stars, tag, date FROM peer_feedback ORDER BY id DESC",
    )
    .fetch_all(db.pool())
    .await?;

    Ok(rows)
}

pub async fn add_feedback(db: &Database, feedback: NewFeedback) -> Result<i64, ServiceError> {
    if feedback.title.trim().is_empty() {
        return Err(ServiceError::Validation("title is required".into()));
    }
    if feedback.text.trim().is_empty() {
        return Err(ServiceError::Validation("text is required".into()));
    }
    if feedback.student.trim().is_empty() {
        return Err(ServiceError::Validation("student is required".into()));
    }

    let stars = feedback.stars.unwrap_or(5);
    if !(1..=5).contains(&stars) {
        return Err(ServiceError::Validation(
            "stars must be between 1 and 5".into(),
        ));
    }

    let tag = feedback
        .tag
        .filter(|tag| !tag.trim().is_empty())
        .unwrap_or_else(|| "General".to_string());

    let result = sqlx::query(
        r#"
        INSERT INTO peer_feedback (title, text, student, stars, tag, date)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(feedback.title.trim())
    .bind(feedback.text.trim())
    .bind(feedback.student.trim())
    .bind(stars)
    .bind(tag)
    .bind(Utc::now())
    .execute(db.pool())
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn delete_feedback(db: &Database, id: i64) -> Result<(), ServiceError> {
    let result = sqlx::query("DELETE FROM peer_feedback WHERE id = ?")
        .bind(id)
        .execute(db.pool())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound(format!("feedback {id} not found")));
    }

    Ok(())
}
