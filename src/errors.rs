use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Input record failed validation; aborts the whole aggregation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed input documents (JSON batches)
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A worker computing part of the dashboard failed
    #[error("Processing error: {0}")]
    Processing(String),
}

/// Input validation failures
///
/// Raised while converting raw collaborator records into validated ones.
/// Never silently coerced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Not a non-negative decimal with at most 2 fractional digits
    #[error("Invalid amount '{value}': {reason}")]
    InvalidAmount { value: String, reason: String },

    /// Rating outside the integer star range 1..=5, or an inconsistent rated entity
    #[error("Invalid rating {value}: {reason}")]
    InvalidRating { value: String, reason: String },

    /// Missing or unparsable timestamp
    #[error("Invalid timestamp '{value}'")]
    InvalidTimestamp { value: String },

    /// Order line quantity below 1
    #[error("Invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity { product_id: String, quantity: i64 },
}

impl ValidationError {
    pub fn amount(value: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidAmount {
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn rating(value: impl ToString, reason: impl Into<String>) -> Self {
        ValidationError::InvalidRating {
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn timestamp(value: impl Into<String>) -> Self {
        ValidationError::InvalidTimestamp {
            value: value.into(),
        }
    }
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

/// Result type for record validation
pub type ValidationResult<T> = Result<T, ValidationError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
