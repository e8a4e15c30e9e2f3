//! Crate-wide error type shared by the scheduler, store and persistence layers.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Difficulty self-ratings live on the 0-5 scale; anything else is a caller bug.
    #[error("difficulty rating {0} is outside the 0-5 scale")]
    InvalidRating(u8),

    /// The persisted snapshot failed to parse. Callers fall back to empty
    /// defaults and warn the user instead of crashing.
    #[error("stored snapshot is corrupt: {0}")]
    CorruptSnapshot(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
