use thiserror::Error;

pub type ForecastResult<T> = Result<T, ForecastError>;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown variant '{0}', expected 'A' or 'B'")]
    UnknownVariant(String),

    #[error("Retention table needs at least 2 checkpoints, found {found}")]
    InsufficientCheckpoints { found: usize },

    #[error("Retention rate {rate} at day {day} is not a positive finite number")]
    NonPositiveRate { day: u32, rate: f64 },

    #[error("Retention checkpoint days must be strictly increasing (violated at day {day})")]
    UnorderedCheckpoints { day: u32 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
