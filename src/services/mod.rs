pub mod admin;
pub mod announcements;
pub mod feedback;
pub mod modules;
pub mod progress;
pub mod questions;
pub mod scoring;
pub mod students;

/// Shared failure taxonomy for the service layer. Route handlers convert
/// these into the JSON error envelope; nothing here is allowed to panic.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Sql(#[from] sqlx::Error),
}
