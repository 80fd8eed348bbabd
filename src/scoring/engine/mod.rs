//! Rule-based score calculator over sanitized case profiles.

mod config;
mod policy;
mod rules;

pub use config::{BaseScores, RuleWeights, ScoringConfig, DEFAULT_GRAVE_MULTIPLIER};
pub use rules::{ScoreAdjustment, ScoreRule};

use serde::{Deserialize, Serialize};

use crate::scoring::domain::{CaseProfile, TimingBase};
use rules::RulePass;

/// Stateless calculator applying the configured rule table to a profile.
/// Reentrant: no shared mutable state, no I/O, bounded work per call.
pub struct ScoreEngine {
    config: ScoringConfig,
}

impl ScoreEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, profile: &CaseProfile) -> ScoreBreakdown {
        let timing_base = policy::classify(profile);
        let base = policy::base_score(timing_base, &self.config.base_scores);

        let pass = match profile {
            CaseProfile::Materialized(case) => rules::apply_rules(case, &self.config),
            CaseProfile::NotPlausible | CaseProfile::NotMaterialized => RulePass::empty(),
        };

        ScoreBreakdown::compose(timing_base, base, pass)
    }
}

/// Full explanation of one score computation, in rule-definition order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub timing_base: TimingBase,
    pub base: f64,
    pub penalties: Vec<ScoreAdjustment>,
    pub penalty_total: f64,
    pub bonuses: Vec<ScoreAdjustment>,
    pub bonus_total: f64,
    pub grave_multiplier: f64,
    /// Clamped to [0, 10]; kept as a float for the legacy-compatible field.
    pub final_score: f64,
    /// Rounded to the nearest integer for display.
    pub display_score: u8,
}

impl ScoreBreakdown {
    fn compose(timing_base: TimingBase, base: f64, pass: RulePass) -> Self {
        let penalty_total: f64 = pass.penalties.iter().map(|entry| entry.amount).sum();
        let bonus_total: f64 = pass.bonuses.iter().map(|entry| entry.amount).sum();

        let mut final_score = (base - penalty_total + bonus_total) * pass.grave_multiplier;
        if pass.grave_multiplier < 1.0 {
            // A grave signal dominates: accumulated bonuses cannot lift the
            // score above the suppressed base.
            final_score = final_score.min(base * pass.grave_multiplier);
        }
        // Clamping bounds legitimate rule accumulation; it is never a repair
        // path for invalid upstream data.
        let final_score =
            final_score.clamp(ScoringConfig::SCORE_FLOOR, ScoringConfig::SCORE_CEILING);

        Self {
            timing_base,
            base,
            penalties: pass.penalties,
            penalty_total,
            bonuses: pass.bonuses,
            bonus_total,
            grave_multiplier: pass.grave_multiplier,
            final_score,
            display_score: final_score.round() as u8,
        }
    }
}
