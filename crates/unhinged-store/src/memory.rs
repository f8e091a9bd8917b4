//! In-memory submission store for tests and local development.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::record::{StoredSubmission, SubmissionRecord};
use crate::{SubmissionId, SubmissionStore};

/// Keeps inserted rows in a vector, assigning ids sequentially from 1.
///
/// Cloning shares the underlying rows.
#[derive(Clone, Default)]
pub struct MemorySubmissionStore {
    rows: Arc<Mutex<Vec<StoredSubmission>>>,
    /// When set, every insert fails with `StoreError::Unavailable`.
    outage: Option<Arc<str>>,
}

impl MemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose inserts always fail with the given reason.
    pub fn unavailable(reason: &str) -> Self {
        Self {
            rows: Arc::default(),
            outage: Some(Arc::from(reason)),
        }
    }

    /// Snapshot of every stored row, in insertion order.
    pub async fn rows(&self) -> Vec<StoredSubmission> {
        self.rows.lock().await.clone()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.lock().await.is_empty()
    }
}

impl SubmissionStore for MemorySubmissionStore {
    async fn insert(&self, record: &SubmissionRecord) -> StoreResult<SubmissionId> {
        if let Some(reason) = &self.outage {
            return Err(StoreError::Unavailable(reason.to_string()));
        }

        let mut rows = self.rows.lock().await;
        let id = rows.len() as SubmissionId + 1;
        rows.push(StoredSubmission {
            id,
            record: record.clone(),
        });
        debug!(id, tipo_carta = %record.tipo_carta, "submission stored in memory");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use unhinged_core::{AbsentFieldPolicy, ClientMeta, Submission, TipoCarta};

    fn record(text: &str) -> SubmissionRecord {
        let submission = Submission {
            tipo_carta: TipoCarta::Negra,
            carta_negra: Some(text.to_string()),
            carta_blanca: None,
            contexto: None,
        };
        SubmissionRecord::new(
            &submission,
            &ClientMeta::unknown(),
            AbsentFieldPolicy::Null,
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn ids_are_sequential_from_one() {
        let store = MemorySubmissionStore::new();
        assert_eq!(store.insert(&record("uno")).await.unwrap(), 1);
        assert_eq!(store.insert(&record("dos")).await.unwrap(), 2);
        assert_eq!(store.rows().await.len(), 2);
    }

    #[tokio::test]
    async fn clones_share_rows() {
        let store = MemorySubmissionStore::new();
        let other = store.clone();
        other.insert(&record("compartida")).await.unwrap();

        let rows = store.rows().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 1);
        assert_eq!(rows[0].record.carta_negra.as_deref(), Some("compartida"));
    }

    #[tokio::test]
    async fn unavailable_store_rejects_inserts() {
        let store = MemorySubmissionStore::unavailable("database offline");
        let err = store.insert(&record("nada")).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert!(err.to_string().contains("database offline"));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn concurrent_inserts_get_distinct_ids() {
        let store = MemorySubmissionStore::new();
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.insert(&record(&format!("carta {i}"))).await.unwrap()
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=16).collect::<Vec<_>>());
    }
}
