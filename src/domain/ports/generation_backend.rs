use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::BackendError;

/// Backend's view of a session, from the status query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendStatus {
    /// Session the status describes.
    pub session_id: Uuid,
    /// Backend-side status string (not authoritative for local state).
    pub status: String,
    /// Candidates generated so far.
    pub candidates_generated: usize,
    /// Candidates that passed verification so far.
    pub candidates_verified: usize,
    /// Cost accrued so far in USD.
    pub current_cost: f64,
    /// Elapsed backend time in milliseconds.
    pub elapsed_time_ms: f64,
}

/// Port for out-of-band calls to the generation backend.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Queries the backend's status for a session.
    async fn status(&self, session_id: Uuid) -> Result<BackendStatus, BackendError>;

    /// Requests a best-effort remote cancel.
    ///
    /// The local transition to cancelled is authoritative regardless of
    /// whether this call succeeds.
    async fn cancel(&self, session_id: Uuid) -> Result<(), BackendError>;
}
