//! The generation orchestrator: one active session, reduced from a
//! stream of typed progress events.
//!
//! The orchestrator owns exactly one [`GenerationSession`] at a time
//! (single-flight: submitting while a session is live cancels it first).
//! Every reduction publishes a fresh session snapshot on a watch channel
//! so the rendering layer can re-render after each event.
//!
//! Cancellation is local-state authoritative: the moment `cancel` runs,
//! the session is terminal and the router drops anything still in flight
//! from the transport, whether or not the backend ever acknowledges.

use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::error::{BackendError, TransportError};
use crate::domain::models::{
    ErrorEvent, GenerationEvent, GenerationRequest, GenerationSession,
};
use crate::domain::ports::{BackendStatus, EventSource, GenerationBackend, SnapshotStore};

use super::event_router::{RouteOutcome, SessionEventRouter};

/// Orchestrates generation sessions against the collaborator ports.
///
/// Cheap to clone; clones share the same session state, so `cancel` on
/// one handle stops a `generate` running on another.
#[derive(Clone)]
pub struct GenerationOrchestrator {
    source: Arc<dyn EventSource>,
    backend: Arc<dyn GenerationBackend>,
    snapshots: Arc<dyn SnapshotStore>,
    session: Arc<RwLock<GenerationSession>>,
    cancel_handle: Arc<RwLock<Option<watch::Sender<bool>>>>,
    updates: watch::Sender<GenerationSession>,
}

impl GenerationOrchestrator {
    /// Creates an orchestrator with an idle session.
    pub fn new(
        source: Arc<dyn EventSource>,
        backend: Arc<dyn GenerationBackend>,
        snapshots: Arc<dyn SnapshotStore>,
    ) -> Self {
        let initial = GenerationSession::idle();
        let (updates, _) = watch::channel(initial.clone());
        Self {
            source,
            backend,
            snapshots,
            session: Arc::new(RwLock::new(initial)),
            cancel_handle: Arc::new(RwLock::new(None)),
            updates,
        }
    }

    /// Subscribes to session snapshots, one per reduction.
    pub fn subscribe(&self) -> watch::Receiver<GenerationSession> {
        self.updates.subscribe()
    }

    /// A clone of the current session state.
    pub async fn session(&self) -> GenerationSession {
        self.session.read().await.clone()
    }

    /// Runs one generation session to a terminal outcome.
    ///
    /// Cancels any live prior session, replaces the session wholesale,
    /// opens the event stream, and reduces events until a terminal event
    /// arrives, the stream closes, or `cancel` is signalled. Returns the
    /// final session snapshot; only a failure to open the stream is
    /// surfaced as an error (after reducing it into the session).
    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationSession, TransportError> {
        self.cancel().await;

        let session_id = Uuid::new_v4();
        let (cancel_tx, mut cancel_rx) = watch::channel(false);
        *self.cancel_handle.write().await = Some(cancel_tx);

        {
            let mut session = self.session.write().await;
            *session = GenerationSession::started(session_id);
            self.publish(&session);
        }
        info!(%session_id, strategy = ?request.strategy, "generation submitted");

        let mut stream = match self.source.open(session_id, &request).await {
            Ok(stream) => stream,
            Err(err) => {
                let mut session = self.session.write().await;
                session.apply(stream_error_event("STREAM_OPEN_FAILED", &err));
                self.publish(&session);
                return Err(err);
            }
        };

        loop {
            tokio::select! {
                changed = cancel_rx.changed() => {
                    if changed.is_err() || *cancel_rx.borrow() {
                        debug!(%session_id, "stream loop stopped by cancel signal");
                        break;
                    }
                }
                next = stream.next() => {
                    match next {
                        Some(Ok(envelope)) => {
                            let mut session = self.session.write().await;
                            if SessionEventRouter::route(&mut session, envelope)
                                == RouteOutcome::Applied
                            {
                                self.publish(&session);
                            }
                            if session.status.is_terminal() {
                                break;
                            }
                        }
                        Some(Err(err)) => {
                            let mut session = self.session.write().await;
                            if !session.status.is_terminal() {
                                session.apply(stream_error_event("STREAM_ERROR", &err));
                                self.publish(&session);
                            }
                            break;
                        }
                        None => {
                            // No replay after reconnect; a dangling session
                            // is superseded by the next submit.
                            warn!(%session_id, "event stream closed without a terminal event");
                            break;
                        }
                    }
                }
            }
        }

        Ok(self.session.read().await.clone())
    }

    /// Cancels the live session, if any.
    ///
    /// The local transition to cancelled is authoritative; the remote
    /// cancel is fire-and-forget and its failure is only logged.
    pub async fn cancel(&self) {
        let cancelled_id = {
            let mut session = self.session.write().await;
            if session.id.is_some() && !session.status.is_terminal() {
                session.cancel();
                self.publish(&session);
                session.id
            } else {
                None
            }
        };

        self.signal_stream_stop().await;

        if let Some(session_id) = cancelled_id {
            info!(%session_id, "session cancelled");
            let backend = Arc::clone(&self.backend);
            tokio::spawn(async move {
                if let Err(err) = backend.cancel(session_id).await {
                    warn!(%session_id, error = %err, "best-effort backend cancel failed");
                }
            });
        }
    }

    /// Selects a candidate explicitly, forcing the session to complete.
    ///
    /// Returns false (and leaves state unchanged) when the id is unknown.
    pub async fn select_candidate(&self, candidate_id: &str) -> bool {
        let selected = {
            let mut session = self.session.write().await;
            let selected = session.select_candidate(candidate_id);
            if selected {
                self.publish(&session);
            }
            selected
        };

        if selected {
            // The session is terminal; close the transport promptly.
            self.signal_stream_stop().await;
        } else {
            debug!(candidate_id, "ignoring selection of unknown candidate");
        }
        selected
    }

    /// Cancels any in-flight session and replaces it with a fresh idle one.
    pub async fn reset(&self) {
        self.cancel().await;
        let mut session = self.session.write().await;
        *session = GenerationSession::idle();
        self.publish(&session);
    }

    /// Queries the backend's view of the current session.
    ///
    /// Returns `Ok(None)` when no session id is set.
    pub async fn get_status(&self) -> Result<Option<BackendStatus>, BackendError> {
        let Some(session_id) = self.session.read().await.id else {
            return Ok(None);
        };
        self.backend.status(session_id).await.map(Some)
    }

    /// Persists the current session's final artifact, best-effort.
    ///
    /// Returns true on success. A missing artifact or a store failure is
    /// logged, never raised.
    pub async fn persist_snapshot(&self) -> bool {
        let (session_id, final_code) = {
            let session = self.session.read().await;
            (session.id, session.final_code.clone())
        };

        let (Some(session_id), Some(code)) = (session_id, final_code) else {
            warn!("nothing to snapshot: no completed artifact");
            return false;
        };

        match self.snapshots.persist(session_id, &code).await {
            Ok(()) => {
                info!(%session_id, "snapshot persisted");
                true
            }
            Err(err) => {
                warn!(%session_id, error = %err, "snapshot persistence failed");
                false
            }
        }
    }

    async fn signal_stream_stop(&self) {
        if let Some(cancel_tx) = self.cancel_handle.write().await.take() {
            let _ = cancel_tx.send(true);
        }
    }

    fn publish(&self, session: &GenerationSession) {
        // Receivers may come and go; a send into the void is fine.
        let _ = self.updates.send(session.clone());
    }
}

fn stream_error_event(code: &str, err: &TransportError) -> GenerationEvent {
    GenerationEvent::Error(ErrorEvent {
        error_code: code.to_string(),
        message: err.to_string(),
        recoverable: true,
        suggested_action: Some("Resubmit the intent".to_string()),
    })
}
