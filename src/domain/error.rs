use thiserror::Error;

/// Transport-level failures around the event stream.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("failed to open event stream: {0}")]
    Connect(String),

    #[error("event stream failed: {0}")]
    Stream(String),

    #[error("event stream closed unexpectedly")]
    Closed,
}

/// Failures from backend side-calls (status, cancel ack, snapshot, cost).
///
/// These are best-effort collaborator calls; per the error policy they are
/// logged or displayed, never promoted to session-terminal errors.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Request(String),

    #[error("backend returned an invalid response: {0}")]
    InvalidResponse(String),

    #[error("no such session: {0}")]
    SessionNotFound(uuid::Uuid),
}
