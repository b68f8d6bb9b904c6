use serde::Serialize;
use sqlx::FromRow;

use crate::db::Database;
use crate::services::ServiceError;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ModuleRecord {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub pdf_file: Option<String>,
    pub created_at: String,
}

/// Asset fields are opaque paths; upload handling lives outside this service.
#[derive(Debug, Clone)]
pub struct NewModule {
    pub title: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub pdf_file: Option<String>,
}

pub async fn list_modules(db: &Database) -> Result<Vec<ModuleRecord>, ServiceError> {
    let rows = sqlx::query_as::<_, ModuleRecord>(
        "SELECT id, title, description, thumbnail, pdf_file, created_at FROM modules ORDER BY id DESC",
    )
    .fetch_all(db.pool())
    .await?;

    Ok(rows)
}

pub async fn create_module(db: &Database, module: NewModule) -> Result<i64, ServiceError> {
    let title = module.title.trim();
    if title.is_empty() {
        return Err(ServiceError::Validation("title is required".into()));
    }

    let result = sqlx::query(
        "INSERT INTO modules (title, description, thumbnail, pdf_file) VALUES (?, ?, ?, ?)",
    )
    .bind(title)
    .bind(&module.description)
    .bind(&module.thumbnail)
    .bind(&module.pdf_file)
    .execute(db.pool())
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn delete_module(db: &Database, id: i64) -> Result<(), ServiceError> {
    let result = sqlx::query("DELETE FROM modules WHERE id = ?")
        .bind(id)
        .execute(db.pool())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound(format!("module {id} not found")));
    }

    Ok(())
}
