//! Domain models: sessions, events, stages, configuration.

pub mod config;
pub mod event;
pub mod session;
pub mod stage;

pub use config::{Config, DebounceConfig, HistoryConfig, LoggingConfig};
pub use event::{
    CandidateEvent, CompleteEvent, CostEvent, ErrorEvent, EventEnvelope, GenerationEvent,
    StartedEvent, TokenEvent, VerificationEvent, VerificationTier,
};
pub use session::{
    Candidate, CostSnapshot, GenerationRequest, GenerationSession, GenerationStrategy,
    SessionStatus, VerificationProgress,
};
pub use stage::{StageTracker, SynthesisStage};
