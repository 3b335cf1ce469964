use thiserror::Error;

/// Storage-layer error type
///
/// Covers the database path only. Telegram failures stay inside the handler
/// stack as `teloxide::RequestError` and never cross into storage code.
#[derive(Error, Debug)]
pub enum AppError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Database connection pool errors
    #[error("Database pool error: {0}")]
    DatabasePool(#[from] r2d2::Error),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
