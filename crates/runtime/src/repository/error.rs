//! Error types raised by repository implementations.

use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("save repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The slot file exists but does not hold a valid save.
    #[error("corrupted save in slot {slot}: {reason}")]
    CorruptedData { slot: u8, reason: String },

    #[error("invalid save slot {slot} (expected 1..={max})")]
    InvalidSlot { slot: u8, max: u8 },
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
