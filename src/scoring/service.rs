use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::debug;

use super::domain::{CaseProfile, DecisionTreeResult, TimingBase};
use super::engine::{ScoreBreakdown, ScoreEngine, ScoringConfig};
use super::normalize::DecisionTreeGuard;
use super::temporal::TemporalFlags;
use super::ScoringError;

/// Service composing the guard, the temporal evaluator, and the score engine.
/// Stateless apart from configuration; safe to share across workers.
pub struct TimingScoreService {
    guard: DecisionTreeGuard,
    engine: ScoreEngine,
}

impl TimingScoreService {
    pub fn new(config: ScoringConfig) -> Self {
        let guard = DecisionTreeGuard::new(config.thresholds.clone());
        Self {
            guard,
            engine: ScoreEngine::new(config),
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        self.engine.config()
    }

    /// Score a raw decision tree. The reference date defaults to today when
    /// the caller does not replay a past computation.
    pub fn score(
        &self,
        raw: &DecisionTreeResult,
        reference: Option<NaiveDate>,
    ) -> Result<ScoringOutcome, ScoringError> {
        let reference = reference.unwrap_or_else(|| Local::now().date_naive());
        let profile = self.guard.profile(raw, reference)?;
        let temporal = match &profile {
            CaseProfile::Materialized(case) => Some(case.temporal),
            CaseProfile::NotPlausible | CaseProfile::NotMaterialized => None,
        };
        let breakdown = self.engine.score(&profile);

        debug!(
            timing = breakdown.timing_base.label(),
            score = breakdown.final_score,
            %reference,
            "decision tree scored"
        );

        Ok(ScoringOutcome {
            reference_date: reference,
            temporal,
            breakdown,
        })
    }
}

/// Full scoring artifact for one request. Computed once, never mutated,
/// discarded after the response is emitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringOutcome {
    pub reference_date: NaiveDate,
    /// Absent for the short-circuit classifications, which use no markers.
    pub temporal: Option<TemporalFlags>,
    pub breakdown: ScoreBreakdown,
}

impl ScoringOutcome {
    /// Map the outcome into the legacy-compatible wire fields: a coarse
    /// three-valued timing label, the float score, and a short justification
    /// composed from the breakdown's verbatim reason strings.
    pub fn view(&self) -> TimingScoreView {
        TimingScoreView {
            timing: self.breakdown.timing_base.legacy_label(),
            timing_base: self.breakdown.timing_base,
            opportunity_score: self.breakdown.final_score,
            display_score: self.breakdown.display_score,
            justification: self.justification(),
            recommendation: self.breakdown.timing_base.recommendation(),
            breakdown: self.breakdown.clone(),
        }
    }

    fn justification(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        if let Some(temporal) = &self.temporal {
            if temporal.fresh {
                parts.push(format!(
                    "last marker {} days ago (fresh)",
                    temporal.days_since_most_recent_marker
                ));
            } else if temporal.recent {
                parts.push(format!(
                    "last marker {} days ago (recent)",
                    temporal.days_since_most_recent_marker
                ));
            } else {
                parts.push(format!(
                    "last marker {} days ago",
                    temporal.days_since_most_recent_marker
                ));
            }
        } else {
            parts.push(match self.breakdown.timing_base {
                TimingBase::Passou => "case type does not admit a guarantee".to_string(),
                _ => "guarantee need has not materialized".to_string(),
            });
        }

        parts.extend(self.breakdown.bonuses.iter().map(|b| b.reason.clone()));
        parts.extend(self.breakdown.penalties.iter().map(|p| p.reason.clone()));

        if self.breakdown.grave_multiplier < 1.0 {
            parts.push(format!(
                "grave signal present, score multiplied by {}",
                self.breakdown.grave_multiplier
            ));
        }

        parts.join(" | ")
    }
}

/// Legacy-compatible representation emitted by the API layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingScoreView {
    pub timing: &'static str,
    pub timing_base: TimingBase,
    pub opportunity_score: f64,
    pub display_score: u8,
    pub justification: String,
    pub recommendation: &'static str,
    pub breakdown: ScoreBreakdown,
}
