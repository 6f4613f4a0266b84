// Domain errors
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum KpiError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },
}

impl KpiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
