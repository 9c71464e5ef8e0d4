//! Mock collaborators shared by the integration tests.
#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use futures::channel::mpsc::{self, UnboundedSender};
use futures::StreamExt;
use uuid::Uuid;

use axiom_client::domain::error::{BackendError, TransportError};
use axiom_client::domain::models::{EventEnvelope, GenerationEvent, GenerationRequest};
use axiom_client::domain::ports::{
    BackendStatus, CostEstimate, CostOracle, EventSource, EventStream, GenerationBackend,
    SnapshotStore,
};

/// One scripted stream item.
pub enum StreamItem {
    /// A well-formed event, wrapped into an envelope at open time.
    Event(GenerationEvent),
    /// A transport failure yielded mid-stream.
    Error(String),
}

/// Event source that replays a fixed script for the opened session.
pub struct ScriptedEventSource {
    script: Mutex<Vec<StreamItem>>,
}

impl ScriptedEventSource {
    pub fn new(script: Vec<StreamItem>) -> Self {
        Self {
            script: Mutex::new(script),
        }
    }
}

#[async_trait]
impl EventSource for ScriptedEventSource {
    async fn open(
        &self,
        session_id: Uuid,
        _request: &GenerationRequest,
    ) -> Result<EventStream, TransportError> {
        let script = std::mem::take(&mut *self.script.lock().unwrap());
        let items: Vec<Result<EventEnvelope, TransportError>> = script
            .into_iter()
            .map(|item| match item {
                StreamItem::Event(payload) => Ok(EventEnvelope::new(session_id, payload)),
                StreamItem::Error(message) => Err(TransportError::Stream(message)),
            })
            .collect();
        Ok(futures::stream::iter(items).boxed())
    }
}

/// Event source that refuses to open.
pub struct UnreachableEventSource;

#[async_trait]
impl EventSource for UnreachableEventSource {
    async fn open(
        &self,
        _session_id: Uuid,
        _request: &GenerationRequest,
    ) -> Result<EventStream, TransportError> {
        Err(TransportError::Connect("connection refused".to_string()))
    }
}

/// Event source driven manually from the test through a channel.
pub struct ChannelEventSource {
    receiver: Mutex<Option<mpsc::UnboundedReceiver<Result<EventEnvelope, TransportError>>>>,
}

impl ChannelEventSource {
    /// Returns the source plus the sender the test feeds events into.
    pub fn pair() -> (
        Self,
        UnboundedSender<Result<EventEnvelope, TransportError>>,
    ) {
        let (tx, rx) = mpsc::unbounded();
        (
            Self {
                receiver: Mutex::new(Some(rx)),
            },
            tx,
        )
    }
}

#[async_trait]
impl EventSource for ChannelEventSource {
    async fn open(
        &self,
        _session_id: Uuid,
        _request: &GenerationRequest,
    ) -> Result<EventStream, TransportError> {
        // Only the first open is channel-backed; later opens get an
        // immediately closed stream.
        match self.receiver.lock().unwrap().take() {
            Some(rx) => Ok(rx.boxed()),
            None => Ok(futures::stream::empty().boxed()),
        }
    }
}

/// Backend mock with scriptable cancel failures and a call log.
#[derive(Default)]
pub struct MockBackend {
    pub fail_cancel: bool,
    pub cancel_calls: Mutex<Vec<Uuid>>,
}

impl MockBackend {
    pub fn failing_cancel() -> Self {
        Self {
            fail_cancel: true,
            cancel_calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl GenerationBackend for MockBackend {
    async fn status(&self, session_id: Uuid) -> Result<BackendStatus, BackendError> {
        Ok(BackendStatus {
            session_id,
            status: "generating".to_string(),
            candidates_generated: 1,
            candidates_verified: 0,
            current_cost: 0.001,
            elapsed_time_ms: 250.0,
        })
    }

    async fn cancel(&self, session_id: Uuid) -> Result<(), BackendError> {
        self.cancel_calls.lock().unwrap().push(session_id);
        if self.fail_cancel {
            return Err(BackendError::Request("cancel endpoint down".to_string()));
        }
        Ok(())
    }
}

/// Snapshot store mock with scriptable failures and a persistence log.
#[derive(Default)]
pub struct MockSnapshotStore {
    pub fail: bool,
    pub persisted: Mutex<Vec<(Uuid, String)>>,
}

impl MockSnapshotStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            persisted: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SnapshotStore for MockSnapshotStore {
    async fn persist(&self, session_id: Uuid, code: &str) -> Result<(), BackendError> {
        if self.fail {
            return Err(BackendError::Request("store unavailable".to_string()));
        }
        self.persisted
            .lock()
            .unwrap()
            .push((session_id, code.to_string()));
        Ok(())
    }
}

/// Oracle mock with a fixed per-byte price.
pub struct MockCostOracle;

#[async_trait]
impl CostOracle for MockCostOracle {
    async fn estimate(&self, intent: &str) -> Result<CostEstimate, BackendError> {
        Ok(CostEstimate {
            cost: intent.len() as f64 * 0.0001,
            tokens: intent.len() as u64,
        })
    }
}
