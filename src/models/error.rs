use thiserror::Error;

use crate::claim::ClaimRejection;

#[derive(Error, Debug)]
pub enum ImpressionError {
    #[error("Host integration error: {0}")]
    HostError(String),

    #[error("Content generation failed: {0}")]
    GenerationError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Claim rejected: {0}")]
    ClaimRejected(#[from] ClaimRejection),

    #[error("Invalid claim transition: cannot {action} while {phase}")]
    InvalidTransition { action: &'static str, phase: &'static str },
}

pub type Result<T> = std::result::Result<T, ImpressionError>;
