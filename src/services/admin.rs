//! Dashboard aggregates. Everything here is derived read-only from the
//! attempt history and the user table.

use serde::Serialize;
use sqlx::FromRow;

use crate::db::Database;
use crate::services::ServiceError;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TrendPoint {
    pub date: String,
    pub xp: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ModuleUsage {
    pub module: String,
    pub value: i64,
}

pub async fn total_students(db: &Database) -> Result<i64, ServiceError> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(db.pool())
        .await?;

    Ok(total)
}

/// Distinct students who recorded an attempt today (UTC).
pub async fn active_today(db: &Database) -> Result<i64, ServiceError> {
    let active = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(DISTINCT student_id)
        FROM game_scores
        WHERE date(created_at) = date('now')
        "#,
    )
    .fetch_one(db.pool())
    .await?;

    Ok(active)
}

/// Mean of per-student summed awards, rounded. Zero when nobody has played.
pub async fn average_xp(db: &Database) -> Result<i64, ServiceError> {
    let avg = sqlx::query_scalar::<_, Option<f64>>(
        r#"
        SELECT AVG(total_xp)
        FROM (
            SELECT student_id, SUM(xp_earned) AS total_xp
            FROM game_scores
            GROUP BY student_id
        )
        "#,
    )
    .fetch_one(db.pool())
    .await?;

    Ok(avg.unwrap_or(0.0).round() as i64)
}

/// Percentage of students who have played at least once.
pub async fn completion(db: &Database) -> Result<i64, ServiceError> {
    let total = total_students(db).await?;
    if total == 0 {
        return Ok(0);
    }

    let played = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(DISTINCT student_id) FROM game_scores",
    )
    .fetch_one(db.pool())
    .await?;

    Ok((played as f64 / total as f64 * 100.0).round() as i64)
}

/// Daily XP totals for the last five active days, oldest first.
pub async fn xp_trend(db: &Database) -> Result<Vec<TrendPoint>, ServiceError> {
    let mut rows = sqlx::query_as::<_, TrendPoint>(
        r#"
        SELECT date(created_at) AS date, SUM(xp_earned) AS xp
        FROM game_scores
        GROUP BY date(created_at)
        ORDER BY date DESC
        LIMIT 5
        "#,
    )
    .fetch_all(db.pool())
    .await?;

    rows.reverse();
    Ok(rows)
}

/// Attempt counts per activity, most played first.
pub async fn module_usage(db: &Database) -> Result<Vec<ModuleUsage>, ServiceError> {
    let rows = sqlx::query_as::<_, ModuleUsage>(
        r#"
        SELECT game_name AS module, COUNT(*) AS value
        FROM game_scores
        GROUP BY game_name
        ORDER BY value DESC
        "#,
    )
    .fetch_all(db.pool())
    .await?;

    Ok(rows)
}
