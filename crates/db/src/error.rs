use chartdesk_core::error::CoreError;

/// Error type for repository operations that apply domain rules inside a
/// transaction.
///
/// A `Core` error raised mid-transaction drops the transaction, so nothing
/// written before it is committed.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

pub type DbResult<T> = Result<T, DbError>;
