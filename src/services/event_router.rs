//! Classification and dispatch of incoming event envelopes.
//!
//! The router is a pure dispatch layer in front of the session reducer.
//! It never retries or reorders; its one policy decision is dropping
//! events that must not reach the reducer: anything arriving after the
//! session reached a terminal status, and anything tagged with a stale
//! session id from a superseded stream.

use tracing::debug;

use crate::domain::models::{EventEnvelope, GenerationSession};

/// What the router did with an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Forwarded to the reducer.
    Applied,
    /// Dropped: the session is terminal and may no longer mutate.
    DroppedTerminal,
    /// Dropped: the envelope belongs to a different (superseded) session.
    DroppedMismatch,
}

/// Routes event envelopes into a session.
pub struct SessionEventRouter;

impl SessionEventRouter {
    /// Classifies an envelope and forwards it to the session reducer,
    /// enforcing the terminal-state and session-id drop rules.
    pub fn route(session: &mut GenerationSession, envelope: EventEnvelope) -> RouteOutcome {
        if session.status.is_terminal() {
            debug!(
                session_id = ?session.id,
                status = %session.status,
                "dropping event for terminal session"
            );
            return RouteOutcome::DroppedTerminal;
        }

        if session.id != Some(envelope.session_id) {
            debug!(
                session_id = ?session.id,
                envelope_session_id = %envelope.session_id,
                "dropping event for superseded session"
            );
            return RouteOutcome::DroppedMismatch;
        }

        session.apply(envelope.payload);
        RouteOutcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    use crate::domain::models::{
        CandidateEvent, EventEnvelope, GenerationEvent, GenerationSession,
    };

    fn candidate_envelope(session_id: Uuid, candidate_id: &str) -> EventEnvelope {
        EventEnvelope::new(
            session_id,
            GenerationEvent::Candidate(CandidateEvent {
                candidate_id: candidate_id.to_string(),
                code: "code".to_string(),
                confidence: 0.8,
                reasoning: String::new(),
                tokens_used: 10,
            }),
        )
    }

    #[test]
    fn test_routes_to_live_session() {
        let id = Uuid::new_v4();
        let mut session = GenerationSession::started(id);

        let outcome = SessionEventRouter::route(&mut session, candidate_envelope(id, "c1"));
        assert_eq!(outcome, RouteOutcome::Applied);
        assert!(session.candidates.contains_key("c1"));
    }

    #[test]
    fn test_drops_after_cancel() {
        let id = Uuid::new_v4();
        let mut session = GenerationSession::started(id);
        session.cancel();

        let outcome = SessionEventRouter::route(&mut session, candidate_envelope(id, "late"));
        assert_eq!(outcome, RouteOutcome::DroppedTerminal);
        assert!(session.candidates.is_empty());
    }

    #[test]
    fn test_drops_superseded_session_id() {
        let id = Uuid::new_v4();
        let mut session = GenerationSession::started(id);

        let stray = candidate_envelope(Uuid::new_v4(), "stray");
        let outcome = SessionEventRouter::route(&mut session, stray);
        assert_eq!(outcome, RouteOutcome::DroppedMismatch);
        assert!(session.candidates.is_empty());
    }

    #[test]
    fn test_drops_before_first_submit() {
        let mut session = GenerationSession::idle();
        let outcome =
            SessionEventRouter::route(&mut session, candidate_envelope(Uuid::new_v4(), "c1"));
        assert_eq!(outcome, RouteOutcome::DroppedMismatch);
    }
}
