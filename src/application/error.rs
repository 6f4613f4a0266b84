// Application-level errors
use crate::domain::error::KpiError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Kpi(#[from] KpiError),

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),

    #[error("forecast timed out after {0:?}")]
    Timeout(Duration),

    #[error("forecast task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
