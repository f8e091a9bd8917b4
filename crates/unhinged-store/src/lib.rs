//! unhinged-store — persistence for card submissions.
//!
//! Submissions are write-once rows in the `form` table:
//!
//! ```sql
//! CREATE TABLE form (
//!     id           BIGSERIAL PRIMARY KEY,
//!     tipo_carta   TEXT NOT NULL,
//!     carta_negra  TEXT,
//!     carta_blanca TEXT,
//!     contexto     TEXT,
//!     ip_address   TEXT NOT NULL,
//!     user_agent   TEXT NOT NULL,
//!     submitted_at TIMESTAMPTZ NOT NULL,
//!     created_at   TIMESTAMPTZ NOT NULL
//! );
//! ```
//!
//! The schema is owned by the database operator; nothing here creates or
//! migrates it. Two [`SubmissionStore`] backends are provided:
//! [`PgSubmissionStore`] for production and [`MemorySubmissionStore`] for
//! tests and local development. Both are `Clone` + `Send` + `Sync` and can
//! be shared across request tasks.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod record;

pub use error::{StoreError, StoreResult};
pub use memory::MemorySubmissionStore;
pub use postgres::PgSubmissionStore;
pub use record::{StoredSubmission, SubmissionRecord};

/// Row identifier generated by the store on insert.
pub type SubmissionId = i64;

/// A sink for validated submissions.
///
/// Implementations perform no validation; callers hand over records that
/// already satisfy every business rule. Each call is a single insert
/// attempt with no retry.
pub trait SubmissionStore: Clone + Send + Sync + 'static {
    fn insert(
        &self,
        record: &SubmissionRecord,
    ) -> impl Future<Output = StoreResult<SubmissionId>> + Send;
}
