use axum::Router;

use eduverso_backend::db::Database;

pub async fn create_test_app() -> Router {
    let db = test_db().await;
    eduverso_backend::create_app(db)
}

/// Fresh in-memory store seeded with two students and two modules that the
/// scoring and progress tests reference by id.
pub async fn test_db() -> Database {
    let db = Database::in_memory().await.expect("in-memory database");

    sqlx::query(
        r#"
        INSERT INTO users (id, fullname, email, role)
        VALUES (1, 'Ana Lopez', 'ana@example.com', 'student'),
               (2, 'Ben Reyes', 'ben@example.com', 'student')
        "#,
    )
    .execute(db.pool())
    .await
    .expect("seed users");

    sqlx::query(
        r#"
        INSERT INTO modules (id, title, description)
        VALUES (7, 'Fractions', 'Intro to fractions'),
               (8, 'Decimals', NULL)
        "#,
    )
    .execute(db.pool())
    .await
    .expect("seed modules");

    sqlx::query(
        r#"
        INSERT INTO module_questions
          (module_id, question, correct_answer, choice_a, choice_b, choice_c, choice_d)
        VALUES
          (7, 'What is 1/2 + 1/2?', 'A', '1', '2', '1/2', '0'),
          (7, 'What is 1/4 of 8?', 'B', '4', '2', '8', '1')
        "#,
    )
    .execute(db.pool())
    .await
    .expect("seed questions");

    db
}

pub async fn student_xp(db: &Database, id: i64) -> i64 {
    sqlx::query_scalar("SELECT xp FROM users WHERE id = ?")
        .bind(id)
        .fetch_one(db.pool())
        .await
        .expect("fetch xp")
}
