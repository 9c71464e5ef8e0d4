//! Service layer: orchestration, routing, and editing-surface logic.

pub mod debounce;
pub mod edit_history;
pub mod editor_surface;
pub mod event_router;
pub mod orchestrator;

pub use debounce::DebounceTimer;
pub use edit_history::{EditHistory, Restored, SuppressCommit, DEFAULT_CAPACITY};
pub use editor_surface::EditorSurface;
pub use event_router::{RouteOutcome, SessionEventRouter};
pub use orchestrator::GenerationOrchestrator;
