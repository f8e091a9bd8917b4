//! Postgres-backed submission store.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::record::SubmissionRecord;
use crate::{SubmissionId, SubmissionStore};

/// Single-row insert; the generated `id` comes back through `RETURNING`.
pub const INSERT_SUBMISSION: &str = "INSERT INTO form \
     (tipo_carta, carta_negra, carta_blanca, contexto, ip_address, user_agent, submitted_at, created_at) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
     RETURNING id";

/// Submission store backed by a sqlx connection pool.
#[derive(Clone)]
pub struct PgSubmissionStore {
    pool: PgPool,
}

impl PgSubmissionStore {
    /// Connect a pool of at most `max_connections` to `url`.
    pub async fn connect(url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| StoreError::Connect(e.to_string()))?;
        info!(max_connections, "postgres pool connected");
        Ok(Self::from_pool(pool))
    }

    /// Wrap a pool configured elsewhere, e.g. one shared with other
    /// services or built with `connect_lazy`.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SubmissionStore for PgSubmissionStore {
    async fn insert(&self, record: &SubmissionRecord) -> StoreResult<SubmissionId> {
        let id: SubmissionId = sqlx::query_scalar(INSERT_SUBMISSION)
            .bind(record.tipo_carta.as_str())
            .bind(record.carta_negra.as_deref())
            .bind(record.carta_blanca.as_deref())
            .bind(record.contexto.as_deref())
            .bind(&record.ip_address)
            .bind(&record.user_agent)
            .bind(record.submitted_at)
            .bind(record.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::Insert(e.to_string()))?;
        debug!(id, tipo_carta = %record.tipo_carta, "submission inserted");
        Ok(id)
    }
}
