//! Row types written to and kept by the store.

use chrono::{DateTime, Utc};

use unhinged_core::{AbsentFieldPolicy, ClientMeta, Submission, TipoCarta};

use crate::SubmissionId;

/// Column values for one `form` row, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    pub tipo_carta: TipoCarta,
    pub carta_negra: Option<String>,
    pub carta_blanca: Option<String>,
    pub contexto: Option<String>,
    pub ip_address: String,
    pub user_agent: String,
    pub submitted_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl SubmissionRecord {
    /// Build the row for a validated submission, stamped at `now`.
    ///
    /// `submitted_at` and `created_at` are both set to `now`. Optional card
    /// fields are written according to `policy`.
    pub fn new(
        submission: &Submission,
        client: &ClientMeta,
        policy: AbsentFieldPolicy,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            tipo_carta: submission.tipo_carta,
            carta_negra: policy.column_value(submission.carta_negra.as_deref()),
            carta_blanca: policy.column_value(submission.carta_blanca.as_deref()),
            contexto: policy.column_value(submission.contexto.as_deref()),
            ip_address: client.ip_address.clone(),
            user_agent: client.user_agent.clone(),
            submitted_at: now,
            created_at: now,
        }
    }
}

/// A record together with the identifier the store assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSubmission {
    pub id: SubmissionId,
    pub record: SubmissionRecord,
}
