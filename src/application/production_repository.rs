// Repository trait for production record storage
use crate::domain::production::ProductionRecord;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A record as the store keeps it.
#[derive(Debug, Clone, Serialize)]
pub struct StoredRecord {
    pub id: u64,
    pub recorded_at: DateTime<Utc>,
    pub record: ProductionRecord,
}

#[async_trait]
pub trait ProductionRepository: Send + Sync {
    /// Append a validated record and return it with its assigned id
    async fn append(&self, record: ProductionRecord) -> anyhow::Result<StoredRecord>;

    /// All stored records, oldest first
    async fn list(&self) -> anyhow::Result<Vec<StoredRecord>>;
}
