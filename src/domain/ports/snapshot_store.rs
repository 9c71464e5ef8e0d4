use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::BackendError;

/// Port for persisting a session's final artifact by id.
///
/// Persistence is best-effort: a failure surfaces as a user-visible log
/// line, never as a session error.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Persists the final artifact for a session.
    async fn persist(&self, session_id: Uuid, code: &str) -> Result<(), BackendError>;
}
