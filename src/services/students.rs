use serde::Serialize;
use sqlx::FromRow;

use crate::db::Database;
use crate::services::ServiceError;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StudentRecord {
    pub id: i64,
    pub fullname: String,
    pub email: String,
    pub avatar: Option<String>,
    pub role: String,
    pub xp: i64,
    pub streak: i64,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewStudent {
    pub fullname: String,
    pub email: String,
    pub avatar: Option<String>,
    pub xp: i64,
    pub streak: i64,
}

#[derive(Debug, Clone)]
pub struct StudentUpdate {
    pub fullname: String,
    pub email: String,
    pub avatar: Option<String>,
    pub xp: Option<i64>,
    pub streak: Option<i64>,
}

const STUDENT_COLUMNS: &str = "id, fullname, email, avatar, role, xp, streak, created_at";

pub async fn list_students(db: &Database) -> Result<Vec<StudentRecord>, ServiceError> {
    let rows = sqlx::query_as::<_, StudentRecord>(&format!(
        "SELECT {STUDENT_COLUMNS} FROM users WHERE role = 'student' ORDER BY fullname ASC"
    ))
    .fetch_all(db.pool())
    .await?;

    Ok(rows)
}

pub async fn get_student(db: &Database, id: i64) -> Result<StudentRecord, ServiceError> {
    sqlx::query_as::<_, StudentRecord>(&format!(
        "SELECT {STUDENT_COLUMNS} FROM users WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(db.pool())
    .await?
    .ok_or_else(|| ServiceError::NotFound(format!("student {id} not found")))
}

pub async fn create_student(db: &Database, student: NewStudent) -> Result<i64, ServiceError> {
    let email = student.email.trim().to_lowercase();

    let duplicate = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE email = ? LIMIT 1")
        .bind(&email)
        .fetch_optional(db.pool())
        .await?;
    if duplicate.is_some() {
        return Err(ServiceError::Conflict("email already exists".into()));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO users (fullname, email, avatar, role, xp, streak)
        VALUES (?, ?, ?, 'student', ?, ?)
        "#,
    )
    .bind(student.fullname.trim())
    .bind(&email)
    .bind(&student.avatar)
    .bind(student.xp)
    .bind(student.streak)
    .execute(db.pool())
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn update_student(
    db: &Database,
    id: i64,
    update: StudentUpdate,
) -> Result<(), ServiceError> {
    let existing = get_student(db, id).await?;

    sqlx::query(
        r#"
        UPDATE users
        SET fullname = ?, email = ?, avatar = ?, xp = ?, streak = ?
        WHERE id = ?
        "#,
    )
    .bind(update.fullname.trim())
    .bind(update.email.trim().to_lowercase())
    .bind(update.avatar.or(existing.avatar))
    .bind(update.xp.unwrap_or(existing.xp))
    .bind(update.streak.unwrap_or(existing.streak))
    .bind(id)
    .execute(db.pool())
    .await?;

    Ok(())
}

pub async fn delete_student(db: &Database, id: i64) -> Result<(), ServiceError> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(db.pool())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound(format!("student {id} not found")));
    }

    Ok(())
}

/// Administrative XP adjustment. The delta is applied store-side in one
/// statement, so concurrent adjustments cannot lose each other, and the total
/// is floored at zero.
pub async fn add_xp(db: &Database, id: i64, amount: i64) -> Result<i64, ServiceError> {
    if amount == 0 {
        return Err(ServiceError::Validation(
            "xp amount must be non-zero".into(),
        ));
    }

    let new_xp = sqlx::query_scalar::<_, i64>(
        "UPDATE users SET xp = MAX(xp + ?, 0) WHERE id = ? RETURNING xp",
    )
    .bind(amount)
    .bind(id)
    .fetch_optional(db.pool())
    .await?;

    new_xp.ok_or_else(|| ServiceError::NotFound(format!("student {id} not found")))
}
