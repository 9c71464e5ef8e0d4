//! Typed events delivered on a generation stream.
//!
//! The backend emits one event per envelope with exactly one payload kind
//! populated. Representing the payload as a closed sum type lets the
//! session reducer match exhaustively, so every kind is handled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope around a single event on a generation stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Session this event belongs to.
    pub session_id: Uuid,

    /// Backend-assigned emission timestamp.
    pub timestamp: DateTime<Utc>,

    /// The event payload. Externally tagged: the wire format carries
    /// exactly one of `started`, `token`, `candidate`, `verification`,
    /// `cost`, `complete`, `error` as the key.
    #[serde(flatten)]
    pub payload: GenerationEvent,
}

impl EventEnvelope {
    /// Creates an envelope stamped with the current time.
    pub fn new(session_id: Uuid, payload: GenerationEvent) -> Self {
        Self {
            session_id,
            timestamp: Utc::now(),
            payload,
        }
    }
}

/// The closed set of event kinds a generation stream can carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationEvent {
    /// Session accepted; model routing decided.
    Started(StartedEvent),
    /// One streamed token for an in-progress candidate.
    Token(TokenEvent),
    /// A finished candidate artifact.
    Candidate(CandidateEvent),
    /// Progress from one verifier tier for one candidate.
    Verification(VerificationEvent),
    /// Updated cost snapshot for the whole session.
    Cost(CostEvent),
    /// Terminal: backend selected a final candidate.
    Complete(CompleteEvent),
    /// Terminal: generation failed.
    Error(ErrorEvent),
}

/// Payload of a `started` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartedEvent {
    /// Identifier of the routed model.
    pub model_id: String,
    /// Human-readable model name.
    pub model_name: String,
    /// Routing tier chosen by the backend (e.g. "balanced").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    /// Backend's up-front cost estimate in USD.
    #[serde(default)]
    pub estimated_cost: f64,
}

/// Payload of a `token` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenEvent {
    /// Candidate this token belongs to.
    pub candidate_id: String,
    /// Token text; empty on the completion marker.
    pub token: String,
    /// Position within this candidate's token stream.
    pub token_index: u64,
    /// True on the final marker for this candidate's token stream.
    #[serde(default)]
    pub is_complete: bool,
}

/// Payload of a `candidate` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateEvent {
    /// Backend-assigned candidate identifier.
    pub candidate_id: String,
    /// Full candidate source text.
    pub code: String,
    /// Model confidence in `[0, 1]`.
    pub confidence: f64,
    /// Free-text reasoning attached by the model.
    #[serde(default)]
    pub reasoning: String,
    /// Tokens spent producing this candidate.
    #[serde(default)]
    pub tokens_used: u64,
}

/// Payload of a `verification` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationEvent {
    /// Candidate the verifier ran against.
    pub candidate_id: String,
    /// Which verification tier produced this result.
    pub tier: VerificationTier,
    /// Name of the checking routine (e.g. "tree_sitter").
    pub verifier: String,
    /// Whether the tier passed.
    pub passed: bool,
    /// Verifier confidence in `[0, 1]`.
    pub confidence: f64,
    /// Errors reported by the verifier, in order.
    #[serde(default)]
    pub errors: Vec<String>,
    /// Warnings reported by the verifier, in order.
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Wall-clock verifier runtime in milliseconds.
    #[serde(default)]
    pub execution_time_ms: f64,
}

/// Payload of a `cost` event. Overwrites, never accumulates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEvent {
    /// Cost accrued so far in USD.
    pub current_cost: f64,
    /// Backend's estimate of remaining cost in USD.
    #[serde(default)]
    pub estimated_remaining: f64,
    /// Model the cost was computed against.
    #[serde(default)]
    pub model_id: String,
    /// Total tokens consumed so far.
    #[serde(default)]
    pub tokens_used: u64,
}

/// Payload of a `complete` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteEvent {
    /// The candidate the backend nominated.
    pub selected_candidate_id: String,
    /// Final source text of the nominated candidate.
    pub final_code: String,
    /// Overall confidence in the result, `[0, 1]`.
    #[serde(default)]
    pub overall_confidence: f64,
    /// How many candidates were produced in total.
    #[serde(default)]
    pub total_candidates: usize,
    /// How many candidates passed verification.
    #[serde(default)]
    pub passing_candidates: usize,
    /// Total session cost in USD.
    #[serde(default)]
    pub total_cost: f64,
    /// Total session wall-clock time in milliseconds.
    #[serde(default)]
    pub total_time_ms: f64,
}

/// Payload of an `error` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEvent {
    /// Stable machine-readable code (e.g. "GENERATION_ERROR").
    pub error_code: String,
    /// Human-readable failure description.
    pub message: String,
    /// Whether retrying the same intent could succeed.
    #[serde(default)]
    pub recoverable: bool,
    /// Optional hint shown to the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Ordinal verification stage identifier.
///
/// Tiers run in order; a higher tier implies the lower ones already ran
/// for that candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VerificationTier {
    /// Syntax / parse checks.
    #[serde(rename = "tier_0")]
    Tier0,
    /// Type and contract checks.
    #[serde(rename = "tier_1")]
    Tier1,
    /// Property and unit test execution.
    #[serde(rename = "tier_2")]
    Tier2,
    /// Formal / SMT verification.
    #[serde(rename = "tier_3")]
    Tier3,
}

impl VerificationTier {
    /// Ordinal position of this tier, starting at 0.
    pub fn ordinal(self) -> u8 {
        match self {
            Self::Tier0 => 0,
            Self::Tier1 => 1,
            Self::Tier2 => 2,
            Self::Tier3 => 3,
        }
    }
}

impl std::fmt::Display for VerificationTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tier_{}", self.ordinal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_wire_format_single_key() {
        let envelope = EventEnvelope::new(
            Uuid::new_v4(),
            GenerationEvent::Token(TokenEvent {
                candidate_id: "c1".to_string(),
                token: "fn ".to_string(),
                token_index: 0,
                is_complete: false,
            }),
        );

        let value = serde_json::to_value(&envelope).unwrap();
        assert!(value.get("token").is_some());
        assert!(value.get("started").is_none());
        assert_eq!(value["token"]["candidate_id"], "c1");
    }

    #[test]
    fn test_envelope_deserializes_backend_shape() {
        let session_id = Uuid::new_v4();
        let raw = json!({
            "session_id": session_id,
            "timestamp": "2026-02-11T08:30:00Z",
            "verification": {
                "candidate_id": "c2",
                "tier": "tier_0",
                "verifier": "tree_sitter",
                "passed": true,
                "confidence": 0.92,
                "errors": [],
                "warnings": ["unused import"],
                "execution_time_ms": 4.2
            }
        });

        let envelope: EventEnvelope = serde_json::from_value(raw).unwrap();
        assert_eq!(envelope.session_id, session_id);
        match envelope.payload {
            GenerationEvent::Verification(v) => {
                assert_eq!(v.tier, VerificationTier::Tier0);
                assert_eq!(v.warnings, vec!["unused import"]);
            }
            other => panic!("expected verification event, got {other:?}"),
        }
    }

    #[test]
    fn test_tier_ordering() {
        assert!(VerificationTier::Tier0 < VerificationTier::Tier3);
        assert_eq!(VerificationTier::Tier2.ordinal(), 2);
        assert_eq!(VerificationTier::Tier1.to_string(), "tier_1");
    }
}
