//! Error types for the profit calculator.

/// Rejected user input. Always recoverable: the same stage is asked again.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Input is empty")]
    Empty,

    #[error("Not a number: {0}")]
    NotANumber(String),

    #[error("Number must be finite")]
    NotFinite,

    #[error("Number must be positive, got {0}")]
    NotPositive(f64),
}

/// Domain-level errors (business rule violations).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Stored conversation data contradicts its state. Handled by resetting
    /// the conversation to idle.
    #[error("Inconsistent conversation state: {0}")]
    StateInconsistency(String),

    #[error("Calculation result is out of range")]
    NonFiniteResult,
}

/// Store-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Too many requests")]
    TooManyRequests,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(e) => AppError::BadRequest(e.to_string()),
            DomainError::StateInconsistency(msg) => AppError::BadRequest(msg),
            DomainError::NonFiniteResult => AppError::BadRequest(err.to_string()),
        }
    }
}
