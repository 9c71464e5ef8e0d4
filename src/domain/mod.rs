//! Domain layer: pure models, reducers, and collaborator ports.

pub mod error;
pub mod models;
pub mod ports;
