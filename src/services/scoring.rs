//! Score & Progress engine: quiz attempt recording and XP accrual.
//!
//! Attempts are immutable history rows in `game_scores`; the learner's XP
//! total on `users` is authoritative incremental state (it is added to, never
//! recomputed from history). Both writes happen in one transaction so a
//! failure between them cannot leave the history and the total diverged.

use chrono::Utc;
use serde::Serialize;

use crate::db::Database;
use crate::services::ServiceError;

pub const PASS_THRESHOLD: i64 = 80;

/// Fixed percentage -> XP ladder, highest tier first. Every attempt earns at
/// least the 5 XP participation floor, a 0% score included.
pub fn xp_for_percentage(percentage: i64) -> i64 {
    if percentage >= 90 {
        30
    } else if percentage >= 80 {
        20
    } else if percentage >= 60 {
        15
    } else if percentage >= 40 {
        10
    } else {
        5
    }
}

/// Rounded percentage clamped to [0, 100]. A zero question count scores 0
/// rather than dividing by zero.
pub fn score_percentage(correct: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    let pct = (correct as f64 / total as f64 * 100.0).round() as i64;
    pct.clamp(0, 100)
}

pub fn attempt_status(percentage: i64) -> &'static str {
    if percentage >= PASS_THRESHOLD {
        "pass"
    } else {
        "fail"
    }
}

#[derive(Debug, Clone)]
pub struct NewAttempt {
    pub student_id: i64,
    pub module_id: i64,
    pub game_name: String,
    pub correct: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitOutcome {
    pub percentage: i64,
    pub xp_earned: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttemptSummary {
    pub student_id: i64,
    pub module_id: i64,
    pub correct: i64,
    pub total: i64,
    pub percentage: i64,
    pub xp_earned: i64,
    pub status: &'static str,
}

impl AttemptSummary {
    fn none(student_id: i64, module_id: i64) -> Self {
        Self {
            student_id,
            module_id,
            correct: 0,
            total: 0,
            percentage: 0,
            xp_earned: 0,
            status: attempt_status(0),
        }
    }
}

/// Records one attempt and applies its XP award.
///
/// The attempt insert and the `xp = xp + ?` increment commit together or not
/// at all; the increment is a store-side add, so concurrent submissions for
/// the same learner cannot lose an award.
pub async fn submit_attempt(
    db: &Database,
    attempt: NewAttempt,
) -> Result<SubmitOutcome, ServiceError> {
    let game_name = attempt.game_name.trim();
    if game_name.is_empty() {
        return Err(ServiceError::Validation("game_name is required".into()));
    }
    if attempt.correct < 0 {
        return Err(ServiceError::Validation(
            "correct must be non-negative".into(),
        ));
    }
    if attempt.total < 0 {
        return Err(ServiceError::Validation("total must be non-negative".into()));
    }

    let percentage = score_percentage(attempt.correct, attempt.total);
    let xp_earned = xp_for_percentage(percentage);

    let mut tx = db.pool().begin().await?;

    let student = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE id = ?")
        .bind(attempt.student_id)
        .fetch_optional(&mut *tx)
        .await?;
    if student.is_none() {
        return Err(ServiceError::NotFound(format!(
            "student {} not found",
            attempt.student_id
        )));
    }

    let module = sqlx::query_scalar::<_, i64>("SELECT id FROM modules WHERE id = ?")
        .bind(attempt.module_id)
        .fetch_optional(&mut *tx)
        .await?;
    if module.is_none() {
        return Err(ServiceError::NotFound(format!(
            "module {} not found",
            attempt.module_id
        )));
    }

    sqlx::query(
        r#"
        INSERT INTO game_scores
          (student_id, module_id, game_name, correct, total, percentage, xp_earned, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(attempt.student_id)
    .bind(attempt.module_id)
    .bind(game_name)
    .bind(attempt.correct)
    .bind(attempt.total)
    .bind(percentage)
    .bind(xp_earned)
    .bind(Utc::now())
    .execute(&mut *tx)
    .await?;

    sqlx::query("UPDATE users SET xp = xp + ? WHERE id = ?")
        .bind(xp_earned)
        .bind(attempt.student_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::debug!(
        student_id = attempt.student_id,
        module_id = attempt.module_id,
        percentage,
        xp_earned,
        "attempt recorded"
    );

    Ok(SubmitOutcome {
        percentage,
        xp_earned,
    })
}

/// Most recent attempt for a (student, module) pair, with the pass/fail
/// status derived at read time. Absence is a zeroed "fail" summary, not an
/// error.
pub async fn latest_attempt(
    db: &Database,
    student_id: i64,
    module_id: i64,
) -> Result<AttemptSummary, ServiceError> {
    let row = sqlx::query_as::<_, (i64, i64, i64, i64)>(
        r#"
        SELECT correct, total, percentage, xp_earned
        FROM game_scores
        WHERE student_id = ? AND module_id = ?
        ORDER BY created_at DESC, id DESC
        LIMIT 1
        "#,
    )
    .bind(student_id)
    .bind(module_id)
    .fetch_optional(db.pool())
    .await?;

    let Some((correct, total, percentage, xp_earned)) = row else {
        return Ok(AttemptSummary::none(student_id, module_id));
    };

    Ok(AttemptSummary {
        student_id,
        module_id,
        correct,
        total,
        percentage,
        xp_earned,
        status: attempt_status(percentage),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn xp_ladder_matches_tier_table() {
        assert_eq!(xp_for_percentage(100), 30);
        assert_eq!(xp_for_percentage(90), 30);
        assert_eq!(xp_for_percentage(89), 20);
        assert_eq!(xp_for_percentage(80), 20);
        assert_eq!(xp_for_percentage(79), 15);
        assert_eq!(xp_for_percentage(60), 15);
        assert_eq!(xp_for_percentage(59), 10);
        assert_eq!(xp_for_percentage(40), 10);
        assert_eq!(xp_for_percentage(39), 5);
        assert_eq!(xp_for_percentage(0), 5);
    }

    #[test]
    fn percentage_rounds_and_clamps() {
        assert_eq!(score_percentage(9, 10), 90);
        assert_eq!(score_percentage(7, 10), 70);
        assert_eq!(score_percentage(1, 3), 33);
        assert_eq!(score_percentage(2, 3), 67);
        assert_eq!(score_percentage(0, 10), 0);
        assert_eq!(score_percentage(12, 10), 100);
    }

    #[test]
    fn zero_total_scores_zero_instead_of_dividing() {
        assert_eq!(score_percentage(0, 0), 0);
        assert_eq!(score_percentage(5, 0), 0);
    }

    #[test]
    fn status_flips_at_eighty() {
        assert_eq!(attempt_status(80), "pass");
        assert_eq!(attempt_status(79), "fail");
        assert_eq!(attempt_status(0), "fail");
        assert_eq!(attempt_status(100), "pass");
    }

    proptest! {
        #[test]
        fn xp_is_monotonic_in_percentage(p in 0i64..100) {
            prop_assert!(xp_for_percentage(p) <= xp_for_percentage(p + 1));
        }

        #[test]
        fn xp_never_drops_below_participation_floor(p in 0i64..=100) {
            prop_assert!(xp_for_percentage(p) >= 5);
        }
    }
}
