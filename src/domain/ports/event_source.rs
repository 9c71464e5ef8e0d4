use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use uuid::Uuid;

use crate::domain::error::TransportError;
use crate::domain::models::{EventEnvelope, GenerationRequest};

/// Stream of event envelopes for one session.
///
/// Delivery is at-most-once per event with no replay after reconnect; a
/// reconnect must be treated as a brand-new session.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<EventEnvelope, TransportError>> + Send>>;

/// Port for the transport that delivers generation events.
///
/// Adapters (WebSocket, gRPC streaming) live outside this crate; tests use
/// a channel-backed mock. Implementations must be `Send + Sync` and take
/// `&self` so one source can serve consecutive sessions.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Opens an event stream for a newly submitted session.
    ///
    /// Errors only when the stream cannot be established; failures after
    /// that point are yielded as stream items.
    async fn open(
        &self,
        session_id: Uuid,
        request: &GenerationRequest,
    ) -> Result<EventStream, TransportError>;
}
