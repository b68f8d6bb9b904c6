use serde::Serialize;
use sqlx::FromRow;

use crate::db::Database;
use crate::services::ServiceError;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub category: Option<String>,
    pub is_new: bool,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct AnnouncementInput {
    pub title: String,
    pub body: String,
    pub category: Option<String>,
}

pub async fn list_announcements(db: &Database) -> Result<Vec<Announcement>, ServiceError> {
    let rows = sqlx::query_as::<_, Announcement>(
        r#"
        SELECT id, title, body, category, is_new, created_at
        FROM announcements
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(db.pool())
    .await?;

    Ok(rows)
}

pub async fn create_announcement(
    db: &Database,
    input: AnnouncementInput,
) -> Result<i64, ServiceError> {
    validate(&input)?;

    let result = sqlx::query(
        "INSERT INTO announcements (title, body, category, is_new) VALUES (?, ?, ?, 1)",
    )
    .bind(input.title.trim())
    .bind(input.body.trim())
    .bind(&input.category)
    .execute(db.pool())
    .await?;

    Ok(result.last_insert_rowid())
}

/// Edits re-flag the announcement as new so clients resurface it.
pub async fn update_announcement(
    db: &Database,
    id: i64,
    input: AnnouncementInput,
) -> Result<(), ServiceError> {
    validate(&input)?;

    let result = sqlx::query(
        "UPDATE announcements SET title = ?, body = ?, category = ?, is_new = 1 WHERE id = ?",
    )
    .bind(input.title.trim())
    .bind(input.body.trim())
    .bind(&input.category)
    .bind(id)
    .execute(db.pool())
    .await?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound(format!(
            "announcement {id} not found"
        )));
    }

    Ok(())
}

pub async fn delete_announcement(db: &Database, id: i64) -> Result<(), ServiceError> {
    let result = sqlx::query("DELETE FROM announcements WHERE id = ?")
        .bind(id)
        .execute(db.pool())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound(format!(
            "announcement {id} not found"
        )));
    }

    Ok(())
}

fn validate(input: &AnnouncementInput) -> Result<(), ServiceError> {
    if input.title.trim().is_empty() {
        return Err(ServiceError::Validation("title is required".into()));
    }
    if input.body.trim().is_empty() {
        return Err(ServiceError::Validation("body is required".into()));
    }
    Ok(())
}
