//! Per-(user, module) completion tracking.
//!
//! The `UNIQUE (user_id, module_id)` key plus a native `ON CONFLICT DO
//! UPDATE` keeps the one-row-per-pair invariant under concurrent saves; there
//! is no check-then-insert window.

use chrono::Utc;
use serde::Serialize;
use sqlx::FromRow;

use crate::db::Database;
use crate::services::ServiceError;

#[derive(Debug, Clone)]
pub struct ProgressUpsert {
    pub user_id: i64,
    pub module_id: i64,
    pub progress: i64,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressView {
    pub exists: bool,
    pub progress: i64,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl ProgressView {
    fn absent() -> Self {
        Self {
            exists: false,
            progress: 0,
            completed: false,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecentModule {
    pub progress: i64,
    pub completed: bool,
    pub updated_at: String,
    pub title: String,
    pub thumbnail: Option<String>,
}

pub async fn upsert_progress(db: &Database, save: ProgressUpsert) -> Result<(), ServiceError> {
    if !(0..=100).contains(&save.progress) {
        return Err(ServiceError::Validation(
            "progress must be between 0 and 100".into(),
        ));
    }

    let user = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE id = ?")
        .bind(save.user_id)
        .fetch_optional(db.pool())
        .await?;
    if user.is_none() {
        return Err(ServiceError::NotFound(format!(
            "user {} not found",
            save.user_id
        )));
    }

    let module = sqlx::query_scalar::<_, i64>("SELECT id FROM modules WHERE id = ?")
        .bind(save.module_id)
        .fetch_optional(db.pool())
        .await?;
    if module.is_none() {
        return Err(ServiceError::NotFound(format!(
            "module {} not found",
            save.module_id
        )));
    }

    sqlx::query(
        r#"
        INSERT INTO module_progress (user_id, module_id, progress, completed, updated_at)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT (user_id, module_id)
        DO UPDATE SET progress = excluded.progress,
                      completed = excluded.completed,
                      updated_at = excluded.updated_at
        "#,
    )
    .bind(save.user_id)
    .bind(save.module_id)
    .bind(save.progress)
    .bind(save.completed)
    .bind(Utc::now())
    .execute(db.pool())
    .await?;

    Ok(())
}

/// A pair with no saved progress is a normal state, reported as an explicit
/// `exists: false` sentinel rather than an error.
pub async fn get_progress(
    db: &Database,
    user_id: i64,
    module_id: i64,
) -> Result<ProgressView, ServiceError> {
    let row = sqlx::query_as::<_, (i64, bool, String)>(
        r#"
        SELECT progress, completed, updated_at
        FROM module_progress
        WHERE user_id = ? AND module_id = ?
        "#,
    )
    .bind(user_id)
    .bind(module_id)
    .fetch_optional(db.pool())
    .await?;

    let Some((progress, completed, updated_at)) = row else {
        return Ok(ProgressView::absent());
    };

    Ok(ProgressView {
        exists: true,
        progress,
        completed,
        updated_at: Some(updated_at),
    })
}

/// The module a user touched most recently, for the dashboard resume card.
pub async fn recent_module(
    db: &Database,
    user_id: i64,
) -> Result<Option<RecentModule>, ServiceError> {
    let row = sqlx::query_as::<_, RecentModule>(
        r#"
        SELECT mp.progress, mp.completed, mp.updated_at, m.title, m.thumbnail
        FROM module_progress mp
        JOIN modules m ON mp.module_id = m.id
        WHERE mp.user_id = ?
        ORDER BY mp.updated_at DESC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db.pool())
    .await?;

    Ok(row)
}
