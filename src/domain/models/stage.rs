//! Presentation-only synthesis stage indicator.
//!
//! A linear stage ladder with a fixed stage-to-percent lookup, advanced by
//! the caller. It is advisory display state: nothing in the orchestrator
//! reads or writes it, and no correctness property depends on it.

use serde::{Deserialize, Serialize};

/// Linear synthesis stage shown while a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SynthesisStage {
    /// Nothing in flight.
    Idle,
    /// Parsing the intent.
    Parsing,
    /// Extracting contracts and constraints.
    Extracting,
    /// Checking logical contracts.
    VerifyingLogic,
    /// Checking type-level contracts.
    VerifyingTypes,
    /// Checking style constraints.
    VerifyingStyle,
    /// Resolving external dependencies.
    ResolvingDependencies,
    /// Synthesizing the architecture skeleton.
    SynthesizingArchitecture,
    /// Synthesizing the implementation body.
    SynthesizingImplementation,
    /// Hardening the implementation.
    SynthesizingSecurity,
    /// Done.
    Complete,
}

impl SynthesisStage {
    /// All stages in display order.
    pub const ALL: [Self; 11] = [
        Self::Idle,
        Self::Parsing,
        Self::Extracting,
        Self::VerifyingLogic,
        Self::VerifyingTypes,
        Self::VerifyingStyle,
        Self::ResolvingDependencies,
        Self::SynthesizingArchitecture,
        Self::SynthesizingImplementation,
        Self::SynthesizingSecurity,
        Self::Complete,
    ];

    /// Fixed display percentage for this stage.
    pub fn progress_percent(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Parsing => 8,
            Self::Extracting => 18,
            Self::VerifyingLogic => 30,
            Self::VerifyingTypes => 40,
            Self::VerifyingStyle => 50,
            Self::ResolvingDependencies => 62,
            Self::SynthesizingArchitecture => 74,
            Self::SynthesizingImplementation => 86,
            Self::SynthesizingSecurity => 95,
            Self::Complete => 100,
        }
    }

    /// The next stage in the ladder, or `None` from `Complete`.
    pub fn next(self) -> Option<Self> {
        let index = Self::ALL.iter().position(|s| *s == self)?;
        Self::ALL.get(index + 1).copied()
    }

    /// Short label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Parsing => "Parsing intent",
            Self::Extracting => "Extracting contracts",
            Self::VerifyingLogic => "Verifying logic",
            Self::VerifyingTypes => "Verifying types",
            Self::VerifyingStyle => "Verifying style",
            Self::ResolvingDependencies => "Resolving dependencies",
            Self::SynthesizingArchitecture => "Synthesizing architecture",
            Self::SynthesizingImplementation => "Synthesizing implementation",
            Self::SynthesizingSecurity => "Hardening",
            Self::Complete => "Complete",
        }
    }
}

impl std::fmt::Display for SynthesisStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Caller-advanced tracker over the stage ladder.
#[derive(Debug, Clone, Copy, Default)]
pub struct StageTracker {
    current: Option<SynthesisStage>,
}

impl StageTracker {
    /// Starts at `Idle`.
    pub fn new() -> Self {
        Self {
            current: Some(SynthesisStage::Idle),
        }
    }

    /// The current stage.
    pub fn current(&self) -> SynthesisStage {
        self.current.unwrap_or(SynthesisStage::Idle)
    }

    /// Advances one stage; saturates at `Complete`.
    pub fn advance(&mut self) -> SynthesisStage {
        let current = self.current();
        let next = current.next().unwrap_or(current);
        self.current = Some(next);
        next
    }

    /// Resets to `Idle`.
    pub fn reset(&mut self) {
        self.current = Some(SynthesisStage::Idle);
    }

    /// True once the ladder reached `Complete`.
    pub fn is_complete(&self) -> bool {
        self.current() == SynthesisStage::Complete
    }
}
