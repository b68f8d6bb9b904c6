mod common;

use eduverso_backend::services::progress::{self, ProgressUpsert};
use eduverso_backend::services::scoring::{self, NewAttempt};
use eduverso_backend::services::students;
use eduverso_backend::services::ServiceError;

fn attempt(student_id: i64, module_id: i64, correct: i64, total: i64) -> NewAttempt {
    NewAttempt {
        student_id,
        module_id,
        game_name: "fraction-quiz".to_string(),
        correct,
        total,
    }
}

#[tokio::test]
async fn submit_awards_tiered_xp() {
    let db = common::test_db().await;

    let outcome = scoring::submit_attempt(&db, attempt(1, 7, 9, 10))
        .await
        .unwrap();
    assert_eq!(outcome.percentage, 90);
    assert_eq!(outcome.xp_earned, 30);

    let outcome = scoring::submit_attempt(&db, attempt(1, 7, 7, 10))
        .await
        .unwrap();
    assert_eq!(outcome.percentage, 70);
    assert_eq!(outcome.xp_earned, 15);

    let outcome = scoring::submit_attempt(&db, attempt(1, 7, 0, 10))
        .await
        .unwrap();
    assert_eq!(outcome.percentage, 0);
    assert_eq!(outcome.xp_earned, 5);
}

#[tokio::test]
async fn sequential_submits_accumulate_exact_total() {
    let db = common::test_db().await;

    scoring::submit_attempt(&db, attempt(1, 7, 9, 10))
        .await
        .unwrap();
    scoring::submit_attempt(&db, attempt(1, 8, 7, 10))
        .await
        .unwrap();

    assert_eq!(common::student_xp(&db, 1).await, 45);
}

#[tokio::test]
async fn zero_total_scores_zero_and_still_awards_floor() {
    let db = common::test_db().await;

    let outcome = scoring::submit_attempt(&db, attempt(2, 7, 0, 0)).await.unwrap();
    assert_eq!(outcome.percentage, 0);
    assert_eq!(outcome.xp_earned, 5);
    assert_eq!(common::student_xp(&db, 2).await, 5);
}

#[tokio::test]
async fn submit_rejects_unknown_student_without_writing() {
    let db = common::test_db().await;

    let err = scoring::submit_attempt(&db, attempt(999, 7, 5, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let attempts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM game_scores")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(attempts, 0);
}

#[tokio::test]
async fn submit_rejects_unknown_module() {
    let db = common::test_db().await;

    let err = scoring::submit_attempt(&db, attempt(1, 999, 5, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn submit_rejects_blank_game_name() {
    let db = common::test_db().await;

    let mut bad = attempt(1, 7, 5, 10);
    bad.game_name = "   ".to_string();
    let err = scoring::submit_attempt(&db, bad).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn latest_attempt_prefers_newest_and_derives_status() {
    let db = common::test_db().await;

    scoring::submit_attempt(&db, attempt(1, 7, 6, 10))
        .await
        .unwrap();
    scoring::submit_attempt(&db, attempt(1, 7, 17, 20))
        .await
        .unwrap();

    let summary = scoring::latest_attempt(&db, 1, 7).await.unwrap();
    assert_eq!(summary.percentage, 85);
    assert_eq!(summary.status, "pass");
    assert_eq!(summary.correct, 17);
    assert_eq!(summary.total, 20);
}

#[tokio::test]
async fn single_seventy_percent_attempt_fails() {
    let db = common::test_db().await;

    scoring::submit_attempt(&db, attempt(1, 7, 7, 10))
        .await
        .unwrap();

    let summary = scoring::latest_attempt(&db, 1, 7).await.unwrap();
    assert_eq!(summary.percentage, 70);
    assert_eq!(summary.status, "fail");
}

#[tokio::test]
async fn latest_attempt_sentinel_when_no_history() {
    let db = common::test_db().await;

    let summary = scoring::latest_attempt(&db, 1, 8).await.unwrap();
    assert_eq!(summary.correct, 0);
    assert_eq!(summary.total, 0);
    assert_eq!(summary.percentage, 0);
    assert_eq!(summary.xp_earned, 0);
    assert_eq!(summary.status, "fail");
}

#[tokio::test]
async fn concurrent_submits_never_lose_awards() {
    let db = common::test_db().await;

    let mut handles = Vec::new();
    for _ in 0..10 {
        let db = db.clone();
        handles.push(tokio::spawn(async move {
            scoring::submit_attempt(&db, attempt(1, 7, 9, 10)).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(common::student_xp(&db, 1).await, 300);
}

#[tokio::test]
async fn upsert_keeps_one_row_per_pair() {
    let db = common::test_db().await;

    progress::upsert_progress(
        &db,
        ProgressUpsert {
            user_id: 1,
            module_id: 7,
            progress: 40,
            completed: false,
        },
    )
    .await
    .unwrap();

    progress::upsert_progress(
        &db,
        ProgressUpsert {
            user_id: 1,
            module_id: 7,
            progress: 100,
            completed: true,
        },
    )
    .await
    .unwrap();

    let rows: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM module_progress WHERE user_id = 1 AND module_id = 7")
            .fetch_one(db.pool())
            .await
            .unwrap();
    assert_eq!(rows, 1);

    let view = progress::get_progress(&db, 1, 7).await.unwrap();
    assert!(view.exists);
    assert_eq!(view.progress, 100);
    assert!(view.completed);
}

#[tokio::test]
async fn get_progress_sentinel_for_untouched_module() {
    let db = common::test_db().await;

    let view = progress::get_progress(&db, 1, 8).await.unwrap();
    assert!(!view.exists);
    assert_eq!(view.progress, 0);
    assert!(!view.completed);
}

#[tokio::test]
async fn upsert_rejects_out_of_range_progress() {
    let db = common::test_db().await;

    let err = progress::upsert_progress(
        &db,
        ProgressUpsert {
            user_id: 1,
            module_id: 7,
            progress: 120,
            completed: false,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn add_xp_is_atomic_and_floored_at_zero() {
    let db = common::test_db().await;

    let new_xp = students::add_xp(&db, 1, 50).await.unwrap();
    assert_eq!(new_xp, 50);

    let new_xp = students::add_xp(&db, 1, -200).await.unwrap();
    assert_eq!(new_xp, 0);

    let err = students::add_xp(&db, 1, 0).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let err = students::add_xp(&db, 999, 10).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn recent_module_follows_latest_progress_save() {
    let db = common::test_db().await;

    assert!(progress::recent_module(&db, 1).await.unwrap().is_none());

    progress::upsert_progress(
        &db,
        ProgressUpsert {
            user_id: 1,
            module_id: 7,
            progress: 30,
            completed: false,
        },
    )
    .await
    .unwrap();

    let recent = progress::recent_module(&db, 1).await.unwrap().unwrap();
    assert_eq!(recent.title, "Fractions");
    assert_eq!(recent.progress, 30);
}
