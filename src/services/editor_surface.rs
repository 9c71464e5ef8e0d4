//! The editing surface: debounced history commits and cost estimates.
//!
//! Keystrokes do not hit the history directly. Input batches behind the
//! commit debounce and the latest value is pushed once typing pauses, one
//! history entry per pause. A committed (non-duplicate) edit then arms
//! the independent cost-estimate debounce. Time travel hands back a
//! one-shot suppress token that the next commit firing consumes, so
//! restoring old text never re-enters the history.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::domain::models::DebounceConfig;
use crate::domain::ports::{CostEstimate, CostOracle};

use super::debounce::DebounceTimer;
use super::edit_history::{EditHistory, Restored, SuppressCommit};

/// Editing surface owning the history, both debounce timers, and the
/// displayed cost estimate.
pub struct EditorSurface {
    history: EditHistory,
    text: String,
    commit: DebounceTimer<String>,
    estimate: DebounceTimer<String>,
    suppress: Option<SuppressCommit>,
    oracle: Arc<dyn CostOracle>,
    cost_estimate: Option<CostEstimate>,
}

impl EditorSurface {
    /// Creates a surface over a fresh history.
    pub fn new(
        oracle: Arc<dyn CostOracle>,
        history_capacity: usize,
        debounce: &DebounceConfig,
    ) -> Self {
        Self {
            history: EditHistory::with_capacity(history_capacity),
            text: String::new(),
            commit: DebounceTimer::new(Duration::from_millis(debounce.commit_ms)),
            estimate: DebounceTimer::new(Duration::from_millis(debounce.cost_estimate_ms)),
            suppress: None,
            oracle,
            cost_estimate: None,
        }
    }

    /// The text currently visible to the user.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The last successfully fetched cost estimate, if any.
    pub fn cost_estimate(&self) -> Option<CostEstimate> {
        self.cost_estimate
    }

    /// Read access to the underlying history.
    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    /// Records a keystroke-level edit and re-arms the commit debounce.
    pub fn on_input(&mut self, now: Instant, text: &str) {
        self.text = text.to_string();
        self.commit.schedule(now, text.to_string());
    }

    /// Steps back one history entry and shows the restored text.
    pub fn undo(&mut self, now: Instant) -> &str {
        let restored = self.history.undo();
        self.apply_restore(now, restored)
    }

    /// Steps forward one history entry and shows the restored text.
    pub fn redo(&mut self, now: Instant) -> &str {
        let restored = self.history.redo();
        self.apply_restore(now, restored)
    }

    /// Jumps to an absolute history index; out-of-range is a no-op.
    pub fn jump_to(&mut self, now: Instant, index: usize) -> &str {
        let restored = self.history.jump_to(index);
        self.apply_restore(now, restored)
    }

    /// Restoring mutates the visible text, which goes through the same
    /// debounce path as typing; the stored token suppresses that commit.
    fn apply_restore(&mut self, now: Instant, restored: Restored) -> &str {
        self.text = restored.text.clone();
        self.suppress = Some(restored.suppress);
        self.commit.schedule(now, restored.text);
        &self.text
    }

    /// Fires any due timers.
    ///
    /// Called from the cooperative scheduler on timer ticks. The oracle
    /// query is best-effort: a failure clears the displayed estimate and
    /// is otherwise swallowed.
    pub async fn tick(&mut self, now: Instant) {
        if let Some(text) = self.commit.fire(now) {
            if self.suppress.take().is_some() {
                debug!("history commit suppressed after time travel");
            } else if self.history.push(&text) {
                self.estimate.schedule(now, text);
            }
        }

        if let Some(intent) = self.estimate.fire(now) {
            match self.oracle.estimate(&intent).await {
                Ok(estimate) => self.cost_estimate = Some(estimate),
                Err(err) => {
                    warn!(error = %err, "cost estimate failed; clearing display");
                    self.cost_estimate = None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    use crate::domain::error::BackendError;

    struct FixedOracle {
        fail: AtomicBool,
    }

    #[async_trait]
    impl CostOracle for FixedOracle {
        async fn estimate(&self, intent: &str) -> Result<CostEstimate, BackendError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(BackendError::Request("catalog unavailable".to_string()));
            }
            Ok(CostEstimate {
                cost: 0.01,
                tokens: intent.len() as u64,
            })
        }
    }

    fn surface(fail: bool) -> EditorSurface {
        EditorSurface::new(
            Arc::new(FixedOracle {
                fail: AtomicBool::new(fail),
            }),
            50,
            &DebounceConfig::default(),
        )
    }

    const COMMIT: Duration = Duration::from_millis(800);
    const ESTIMATE: Duration = Duration::from_millis(500);

    #[tokio::test]
    async fn test_rapid_edits_commit_once() {
        let mut surface = surface(false);
        let t0 = Instant::now();

        surface.on_input(t0, "h");
        surface.on_input(t0 + Duration::from_millis(100), "he");
        surface.on_input(t0 + Duration::from_millis(200), "hello");

        // Quiet period measured from the last keystroke.
        surface.tick(t0 + COMMIT).await;
        assert_eq!(surface.history().len(), 1);

        surface.tick(t0 + Duration::from_millis(200) + COMMIT).await;
        assert_eq!(surface.history().len(), 2);
        assert_eq!(surface.history().current(), "hello");
    }

    #[tokio::test]
    async fn test_commit_schedules_cost_estimate() {
        let mut surface = surface(false);
        let t0 = Instant::now();

        surface.on_input(t0, "sort a list");
        let commit_at = t0 + COMMIT;
        surface.tick(commit_at).await;
        assert!(surface.cost_estimate().is_none());

        surface.tick(commit_at + ESTIMATE).await;
        let estimate = surface.cost_estimate().unwrap();
        assert_eq!(estimate.tokens, "sort a list".len() as u64);
    }

    #[tokio::test]
    async fn test_oracle_failure_clears_estimate() {
        let oracle = Arc::new(FixedOracle {
            fail: AtomicBool::new(false),
        });
        let mut surface =
            EditorSurface::new(oracle.clone(), 50, &DebounceConfig::default());
        let t0 = Instant::now();

        surface.on_input(t0, "first");
        surface.tick(t0 + COMMIT).await;
        surface.tick(t0 + COMMIT + ESTIMATE).await;
        assert!(surface.cost_estimate().is_some());

        // Oracle starts failing; the stale estimate must not linger.
        oracle.fail.store(true, Ordering::SeqCst);
        let t1 = t0 + Duration::from_secs(10);
        surface.on_input(t1, "second");
        surface.tick(t1 + COMMIT).await;
        surface.tick(t1 + COMMIT + ESTIMATE).await;
        assert!(surface.cost_estimate().is_none());
    }

    #[tokio::test]
    async fn test_undo_suppresses_next_commit() {
        let mut surface = surface(false);
        let t0 = Instant::now();

        surface.on_input(t0, "State Alpha");
        surface.tick(t0 + COMMIT).await;
        let t1 = t0 + COMMIT;
        surface.on_input(t1, "State Beta");
        surface.tick(t1 + COMMIT).await;
        assert_eq!(surface.history().len(), 3);

        let t2 = t1 + COMMIT;
        assert_eq!(surface.undo(t2), "State Alpha");

        // The restore-triggered commit fires but is suppressed, so redo
        // capability survives.
        surface.tick(t2 + COMMIT).await;
        assert_eq!(surface.history().len(), 3);
        assert!(surface.history().can_redo());

        let t3 = t2 + COMMIT;
        assert_eq!(surface.redo(t3), "State Beta");
    }

    #[tokio::test]
    async fn test_fresh_edit_after_undo_truncates_branch() {
        let mut surface = surface(false);
        let t0 = Instant::now();

        surface.on_input(t0, "one");
        surface.tick(t0 + COMMIT).await;
        let t1 = t0 + COMMIT;
        surface.on_input(t1, "two");
        surface.tick(t1 + COMMIT).await;

        let t2 = t1 + COMMIT;
        surface.undo(t2);
        surface.tick(t2 + COMMIT).await; // suppressed

        // A real edit from the undone position overwrites the branch.
        let t3 = t2 + COMMIT;
        surface.on_input(t3, "one rewritten");
        surface.tick(t3 + COMMIT).await;

        assert_eq!(surface.history().current(), "one rewritten");
        assert!(!surface.history().can_redo());
    }
}
