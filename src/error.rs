use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Unknown recipe: {0}")]
    UnknownRecipe(String),

    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    #[error("Invalid date {input:?}, expected YYYY-MM-DD")]
    InvalidDate {
        input: String,
        #[source]
        source: time::error::Parse,
    },
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
