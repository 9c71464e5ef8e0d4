//! Ports: traits for the external collaborators of the client core.
//!
//! The domain depends on these traits, never on concrete transports or
//! backends. Adapters implement them outside this crate; tests provide
//! mocks.

pub mod cost_oracle;
pub mod event_source;
pub mod generation_backend;
pub mod snapshot_store;

pub use cost_oracle::{CostEstimate, CostOracle};
pub use event_source::{EventSource, EventStream};
pub use generation_backend::{BackendStatus, GenerationBackend};
pub use snapshot_store::SnapshotStore;
