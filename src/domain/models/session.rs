//! Domain model for a single generation session.
//!
//! A session is one end-to-end generation attempt from submission to a
//! terminal outcome. The orchestrator exclusively owns the active session;
//! starting a new generation replaces it wholesale.

use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::event::{ErrorEvent, GenerationEvent, VerificationEvent, VerificationTier};

/// Session lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// No generation submitted yet.
    Idle,
    /// Candidates are being generated.
    Generating,
    /// At least one verification result has arrived.
    Verifying,
    /// A candidate was selected; terminal.
    Complete,
    /// Generation failed; terminal.
    Error,
    /// User cancelled; terminal.
    Cancelled,
}

impl SessionStatus {
    /// Returns true if no further event may cause mutation.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Error | Self::Cancelled)
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Generating => write!(f, "generating"),
            Self::Verifying => write!(f, "verifying"),
            Self::Complete => write!(f, "complete"),
            Self::Error => write!(f, "error"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Generation strategy requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStrategy {
    /// Single candidate, single pass.
    #[default]
    Simple,
    /// Multiple candidates generated concurrently.
    Parallel,
    /// Parallel with early stop once confidence is high enough.
    Adaptive,
}

/// Parameters for one generation submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The user's raw intent text.
    pub intent: String,
    /// Target language for the generated artifact.
    pub language: String,
    /// Preferred model, if the user pinned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    /// How many candidates to request (parallel strategies).
    #[serde(default = "default_candidate_count")]
    pub candidate_count: u32,
    /// Generation strategy.
    #[serde(default)]
    pub strategy: GenerationStrategy,
}

fn default_candidate_count() -> u32 {
    3
}

impl GenerationRequest {
    /// Creates a simple-strategy request with default candidate count.
    pub fn new(intent: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            intent: intent.into(),
            language: language.into(),
            model_id: None,
            candidate_count: default_candidate_count(),
            strategy: GenerationStrategy::Simple,
        }
    }
}

/// One proposed code artifact, subject to independent verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Backend-assigned candidate identifier.
    pub id: String,
    /// Candidate source text.
    pub code: String,
    /// Model confidence in `[0, 1]`.
    pub confidence: f64,
    /// Free-text reasoning attached by the model.
    pub reasoning: String,
    /// Tokens spent producing this candidate.
    pub tokens_used: u64,
    /// Latest verification verdict; `None` means not yet verified.
    pub verification_passed: Option<bool>,
    /// Highest verification tier that has reported for this candidate.
    pub verification_tier: Option<VerificationTier>,
}

/// One verification progress record. The full history is retained for
/// audit and replay; records are never deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationProgress {
    /// Candidate the verifier ran against.
    pub candidate_id: String,
    /// Which verification tier produced this result.
    pub tier: VerificationTier,
    /// Name of the checking routine.
    pub verifier: String,
    /// Whether the tier passed.
    pub passed: bool,
    /// Verifier confidence in `[0, 1]`.
    pub confidence: f64,
    /// Errors reported, in order.
    pub errors: Vec<String>,
    /// Warnings reported, in order.
    pub warnings: Vec<String>,
    /// Verifier runtime in milliseconds.
    pub execution_time_ms: f64,
}

impl From<VerificationEvent> for VerificationProgress {
    fn from(event: VerificationEvent) -> Self {
        Self {
            candidate_id: event.candidate_id,
            tier: event.tier,
            verifier: event.verifier,
            passed: event.passed,
            confidence: event.confidence,
            errors: event.errors,
            warnings: event.warnings,
            execution_time_ms: event.execution_time_ms,
        }
    }
}

/// Last-known cost snapshot. Overwritten, not accumulated, by each cost
/// event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostSnapshot {
    /// Cost accrued so far in USD.
    pub current_cost: f64,
    /// Backend's estimate of remaining cost in USD.
    pub estimated_remaining: f64,
    /// Total tokens consumed so far.
    pub tokens_used: u64,
}

/// State of one generation session, reduced from the event stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSession {
    /// Opaque identifier, assigned at submit time. `None` until the first
    /// submission.
    pub id: Option<Uuid>,
    /// Current lifecycle status.
    pub status: SessionStatus,
    /// Identifier of the routed model, from the started event.
    pub model_id: Option<String>,
    /// Human-readable routed model name.
    pub model_name: Option<String>,
    /// Accumulated streamed text for the in-progress candidate view.
    pub current_tokens: String,
    /// Monotonically increasing count of token events consumed.
    pub token_count: u64,
    /// Candidates keyed by id, insertion order preserved for display.
    pub candidates: IndexMap<String, Candidate>,
    /// The chosen candidate, once one is selected.
    pub selected_candidate_id: Option<String>,
    /// Final source text, once a candidate is selected.
    pub final_code: Option<String>,
    /// Append-only verification audit trail.
    pub verification_progress: Vec<VerificationProgress>,
    /// Last-known cost snapshot.
    pub cost: Option<CostSnapshot>,
    /// Wall-clock start of the session.
    pub start_time: DateTime<Utc>,
    /// Wall-clock end; set exactly once on the first terminal transition.
    pub end_time: Option<DateTime<Utc>>,
    /// Failure details, present only when status is `Error`.
    pub error: Option<ErrorEvent>,
}

impl GenerationSession {
    /// Creates the initial idle session, before any submission.
    pub fn idle() -> Self {
        Self {
            id: None,
            status: SessionStatus::Idle,
            model_id: None,
            model_name: None,
            current_tokens: String::new(),
            token_count: 0,
            candidates: IndexMap::new(),
            selected_candidate_id: None,
            final_code: None,
            verification_progress: Vec::new(),
            cost: None,
            start_time: Utc::now(),
            end_time: None,
            error: None,
        }
    }

    /// Creates a fresh session in `Generating`, as of submit time.
    pub fn started(id: Uuid) -> Self {
        Self {
            id: Some(id),
            status: SessionStatus::Generating,
            start_time: Utc::now(),
            ..Self::idle()
        }
    }

    /// Reduces one event into session state.
    ///
    /// Callers must enforce the terminal-state drop rule before invoking
    /// this; the reducer itself assumes a non-terminal session.
    pub fn apply(&mut self, event: GenerationEvent) {
        match event {
            GenerationEvent::Started(started) => {
                self.model_id = Some(started.model_id);
                self.model_name = Some(started.model_name);
                // Unchanged if verification already began.
                if self.status == SessionStatus::Idle || self.status == SessionStatus::Generating {
                    self.status = SessionStatus::Generating;
                }
            }
            GenerationEvent::Token(token) => {
                self.current_tokens.push_str(&token.token);
                self.token_count += 1;
            }
            GenerationEvent::Candidate(candidate) => {
                self.upsert_candidate(candidate);
            }
            GenerationEvent::Verification(verification) => {
                if let Some(candidate) = self.candidates.get_mut(&verification.candidate_id) {
                    candidate.verification_passed = Some(verification.passed);
                    candidate.verification_tier = Some(verification.tier);
                }
                self.verification_progress.push(verification.into());
                self.status = SessionStatus::Verifying;
            }
            GenerationEvent::Cost(cost) => {
                self.cost = Some(CostSnapshot {
                    current_cost: cost.current_cost,
                    estimated_remaining: cost.estimated_remaining,
                    tokens_used: cost.tokens_used,
                });
            }
            GenerationEvent::Complete(complete) => {
                self.selected_candidate_id = Some(complete.selected_candidate_id);
                self.final_code = Some(complete.final_code);
                self.finish(SessionStatus::Complete);
            }
            GenerationEvent::Error(error) => {
                self.error = Some(error);
                self.finish(SessionStatus::Error);
            }
        }
    }

    fn upsert_candidate(&mut self, event: crate::domain::models::event::CandidateEvent) {
        match self.candidates.get_mut(&event.candidate_id) {
            Some(existing) => {
                // A re-emitted candidate refreshes generation fields but
                // keeps verification results already recorded for this id.
                existing.code = event.code;
                existing.confidence = event.confidence;
                existing.reasoning = event.reasoning;
                existing.tokens_used = event.tokens_used;
            }
            None => {
                self.candidates.insert(
                    event.candidate_id.clone(),
                    Candidate {
                        id: event.candidate_id,
                        code: event.code,
                        confidence: event.confidence,
                        reasoning: event.reasoning,
                        tokens_used: event.tokens_used,
                        verification_passed: None,
                        verification_tier: None,
                    },
                );
            }
        }
    }

    /// Marks the session cancelled. No-op on a terminal session.
    pub fn cancel(&mut self) {
        if !self.status.is_terminal() {
            self.finish(SessionStatus::Cancelled);
        }
    }

    /// Selects a candidate by id, forcing the session to `Complete`.
    ///
    /// Returns false (leaving state unchanged) when the id is unknown.
    /// Allows the user to pick a non-default candidate even if the
    /// backend already nominated one.
    pub fn select_candidate(&mut self, candidate_id: &str) -> bool {
        let Some(candidate) = self.candidates.get(candidate_id) else {
            return false;
        };
        self.final_code = Some(candidate.code.clone());
        self.selected_candidate_id = Some(candidate_id.to_string());
        self.finish(SessionStatus::Complete);
        true
    }

    fn finish(&mut self, status: SessionStatus) {
        self.status = status;
        if self.end_time.is_none() {
            self.end_time = Some(Utc::now());
        }
    }

    /// Elapsed wall-clock time, frozen at `end_time` once terminal.
    pub fn elapsed(&self) -> Duration {
        self.end_time.unwrap_or_else(Utc::now) - self.start_time
    }

    /// True while candidates are being generated.
    pub fn is_generating(&self) -> bool {
        self.status == SessionStatus::Generating
    }

    /// True once verification results have started arriving.
    pub fn is_verifying(&self) -> bool {
        self.status == SessionStatus::Verifying
    }

    /// True once a candidate has been selected.
    pub fn is_complete(&self) -> bool {
        self.status == SessionStatus::Complete
    }

    /// True when the session ended in failure.
    pub fn has_error(&self) -> bool {
        self.status == SessionStatus::Error
    }

    /// Candidates whose latest verification verdict is a pass.
    pub fn passing_candidates(&self) -> Vec<&Candidate> {
        self.candidates
            .values()
            .filter(|c| c.verification_passed == Some(true))
            .collect()
    }
}

impl Default for GenerationSession {
    fn default() -> Self {
        Self::idle()
    }
}
