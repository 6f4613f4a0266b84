// In-memory production record store
use crate::application::production_repository::{ProductionRepository, StoredRecord};
use crate::domain::production::ProductionRecord;
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryRepository {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    records: Vec<StoredRecord>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductionRepository for MemoryRepository {
    async fn append(&self, record: ProductionRecord) -> Result<StoredRecord> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;

        let stored = StoredRecord {
            id: inner.next_id,
            recorded_at: chrono::Utc::now(),
            record,
        };
        inner.records.push(stored.clone());

        tracing::debug!("Stored record {} ({} total)", stored.id, inner.records.len());
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<StoredRecord>> {
        Ok(self.inner.read().await.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_assigns_increasing_ids() {
        let repo = MemoryRepository::new();
        let a = repo
            .append(ProductionRecord::new(1.0, 2.0, 0.0, 0.0).unwrap())
            .await
            .unwrap();
        let b = repo
            .append(ProductionRecord::new(3.0, 4.0, 0.0, 1.0).unwrap())
            .await
            .unwrap();

        assert_eq!((a.id, b.id), (1, 2));
        assert!(b.recorded_at >= a.recorded_at);

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].record.units_produced(), 4.0);
    }
}
