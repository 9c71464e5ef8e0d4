use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::error::BackendError;

/// Estimated cost of generating from the current intent text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Estimated cost in USD.
    pub cost: f64,
    /// Estimated token count.
    pub tokens: u64,
}

/// Port for the cost/model catalog.
///
/// Queried on a debounce after each committed edit. Failure is swallowed
/// by the caller and clears the displayed estimate.
#[async_trait]
pub trait CostOracle: Send + Sync {
    /// Estimates the cost of generating from `intent`.
    async fn estimate(&self, intent: &str) -> Result<CostEstimate, BackendError>;
}
