//! Timing and score calculation for judicial guarantee opportunities.
//!
//! The pipeline is leaf-first and fully deterministic:
//!
//! 1. [`normalize::DecisionTreeGuard`] validates the raw decision tree and
//!    clears the one documented flag contradiction.
//! 2. [`temporal`] turns marker dates plus a reference date into age flags.
//! 3. [`engine::ScoreEngine`] classifies the case and applies the penalty and
//!    bonus rule table, producing an auditable [`engine::ScoreBreakdown`].
//!
//! Everything here is synchronous, side-effect free, and total over valid
//! input; invalid input yields a [`ScoringError`] and no score at all.

pub mod domain;
pub mod engine;
pub mod normalize;
pub mod router;
pub mod service;
pub mod temporal;

#[cfg(test)]
mod tests;

pub use domain::{
    ActiveBranch, BranchAssessment, CaseProfile, ConstitutionDetails, DecisionTreeResult,
    GuaranteeAnswer, GuaranteeAssessment, GuaranteeType, InferenceBasis, LlmFlags, MarkerDates,
    MaterializedCase, PostMarkerActivity, SpecialContextSignal, SpecialContexts,
    SubstitutionDetails, TemporalMarkers, TimingBase,
};
pub use engine::{
    BaseScores, RuleWeights, ScoreAdjustment, ScoreBreakdown, ScoreEngine, ScoreRule,
    ScoringConfig, DEFAULT_GRAVE_MULTIPLIER,
};
pub use normalize::{DecisionTreeGuard, MalformedDecisionTree};
pub use router::{timing_router, ScoreRequest};
pub use service::{ScoringOutcome, TimingScoreService, TimingScoreView};
pub use temporal::{InvalidTemporalData, TemporalFlags, TemporalThresholds};

/// Failure taxonomy for one scoring request. Errors propagate to the
/// immediate caller; the engine never logs, retries, or degrades, and there
/// is no best-effort score.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("malformed decision tree: {0}")]
    Malformed(#[from] MalformedDecisionTree),
    #[error("invalid temporal data: {0}")]
    Temporal(#[from] InvalidTemporalData),
}
