use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValuationError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Asset not found: {name}")]
    AssetNotFound { name: String },

    #[error("Invalid royalty tier schedule: {reason}")]
    InvalidTierSchedule { reason: String },

    #[error("No global parameters record configured")]
    MissingConfiguration,

    #[error("Discount rate {rate}% is outside the valid domain (must be > -100)")]
    ArithmeticDomain { rate: f64 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ValuationResult<T> = Result<T, ValuationError>;
