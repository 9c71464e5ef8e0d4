//! AXIOM client core - generation orchestration and edit history.
//!
//! This crate is the client-side state layer of the AXIOM platform: it
//! drives a single intent-to-verified-result synthesis session by reducing
//! an interleaved stream of typed progress events, and it maintains the
//! bounded undo/redo history for the text the user is editing. Transport,
//! rendering, and the generation backend itself live behind ports.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): session/event models, reducers, and
//!   collaborator ports
//! - **Service Layer** (`services`): orchestrator, event router, edit
//!   history, debounce timers, editing surface
//! - **Infrastructure Layer** (`infrastructure`): configuration loading
//!   and logging setup
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use axiom_client::domain::models::GenerationRequest;
//! use axiom_client::services::GenerationOrchestrator;
//!
//! # async fn run(source: Arc<dyn axiom_client::domain::ports::EventSource>,
//! #              backend: Arc<dyn axiom_client::domain::ports::GenerationBackend>,
//! #              store: Arc<dyn axiom_client::domain::ports::SnapshotStore>) {
//! let orchestrator = GenerationOrchestrator::new(source, backend, store);
//! let request = GenerationRequest::new("sort a list of users by age", "rust");
//! let session = orchestrator.generate(request).await.unwrap();
//! println!("finished with status {}", session.status);
//! # }
//! ```

pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    Candidate, Config, CostSnapshot, EventEnvelope, GenerationEvent, GenerationRequest,
    GenerationSession, GenerationStrategy, SessionStatus, StageTracker, SynthesisStage,
    VerificationProgress, VerificationTier,
};
pub use domain::ports::{
    BackendStatus, CostEstimate, CostOracle, EventSource, EventStream, GenerationBackend,
    SnapshotStore,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    EditHistory, EditorSurface, GenerationOrchestrator, RouteOutcome, SessionEventRouter,
};
