use serde::{Deserialize, Serialize};

use super::config::ScoringConfig;
use crate::scoring::domain::{BranchAssessment, MaterializedCase, PostMarkerActivity};

/// Identifies the rule behind a score adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreRule {
    StaleSilence,
    DiffuseDefendants,
    ProceduralFreeze,
    UnknownGuaranteeType,
    DormantPassivity,
    FreshMarker,
    OnerousCandidate,
    ActiveDefendant,
    RenewalMarker,
}

/// Discrete contribution to the final score. Reason strings are retained
/// verbatim so breakdowns stay diffable across runs with identical input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreAdjustment {
    pub rule: ScoreRule,
    pub amount: f64,
    pub reason: String,
}

pub(crate) struct RulePass {
    pub penalties: Vec<ScoreAdjustment>,
    pub bonuses: Vec<ScoreAdjustment>,
    pub grave_multiplier: f64,
}

impl RulePass {
    /// Short-circuit classifications carry no adjustments.
    pub(crate) fn empty() -> Self {
        Self {
            penalties: Vec::new(),
            bonuses: Vec::new(),
            grave_multiplier: 1.0,
        }
    }
}

/// Evaluate every penalty and bonus rule against the materialized case.
/// Rules accumulate independently; list order equals definition order here.
pub(crate) fn apply_rules(case: &MaterializedCase, config: &ScoringConfig) -> RulePass {
    let mut penalties = Vec::new();
    let mut bonuses = Vec::new();
    let temporal = &case.temporal;
    let weights = &config.weights;

    let freeze = case.special_contexts.procedural_freeze();

    // Stale silence: no confirmed engagement after the marker. Suppressed
    // while a freeze context is detected so the same root cause is not
    // counted twice; the freeze rule below carries the larger penalty.
    if case.post_marker_activity == PostMarkerActivity::Silence
        && temporal.stale
        && freeze.is_none()
    {
        penalties.push(ScoreAdjustment {
            rule: ScoreRule::StaleSilence,
            amount: weights.stale_silence_penalty,
            reason: format!(
                "silence after the most recent marker, {} days ago",
                temporal.days_since_most_recent_marker
            ),
        });
    }

    if let BranchAssessment::Constitution(details) = &case.branch {
        if case.special_contexts.multiple_defendants.detected && !details.defendant_active {
            penalties.push(ScoreAdjustment {
                rule: ScoreRule::DiffuseDefendants,
                amount: weights.diffuse_defendants_penalty,
                reason: "multiple defendants with no engaged defendant dilutes the decision maker"
                    .to_string(),
            });
        }
    }

    if let Some(context) = freeze {
        penalties.push(ScoreAdjustment {
            rule: ScoreRule::ProceduralFreeze,
            amount: weights.procedural_freeze_penalty,
            reason: format!("{context} proceeding freezes near-term viability"),
        });
    }

    if matches!(case.branch, BranchAssessment::Substitution(_)) && case.flags.guarantee_type_unknown
    {
        penalties.push(ScoreAdjustment {
            rule: ScoreRule::UnknownGuaranteeType,
            amount: weights.unknown_guarantee_type_penalty,
            reason: "existing guarantee type could not be identified".to_string(),
        });
    }

    // Conjunction: a non-responsive defendant is only penalized once the case
    // is dormant. Passivity in a recent case draws no inference.
    if temporal.primary_dormant && case.flags.defendant_showed_passivity {
        penalties.push(ScoreAdjustment {
            rule: ScoreRule::DormantPassivity,
            amount: weights.dormant_passivity_penalty,
            reason: format!(
                "primary marker {} days old with a non-responsive defendant",
                temporal.days_since_primary_marker
            ),
        });
    }

    if temporal.fresh {
        bonuses.push(ScoreAdjustment {
            rule: ScoreRule::FreshMarker,
            amount: weights.fresh_marker_bonus,
            reason: format!(
                "procedural activity {} days ago, within the {}-day window",
                temporal.days_since_most_recent_marker, config.thresholds.fresh_days
            ),
        });
    }

    if let BranchAssessment::Substitution(details) = &case.branch {
        if details.is_onerous && details.is_candidate {
            bonuses.push(ScoreAdjustment {
                rule: ScoreRule::OnerousCandidate,
                amount: weights.onerous_candidate_bonus,
                reason: "onerous guarantee with a confirmed substitution candidate".to_string(),
            });
        }
    }

    if let BranchAssessment::Constitution(details) = &case.branch {
        if details.defendant_active {
            bonuses.push(ScoreAdjustment {
                rule: ScoreRule::ActiveDefendant,
                amount: weights.active_defendant_bonus,
                reason: "defendant is actively engaged in the proceeding".to_string(),
            });
        }
    }

    if case.markers.renewal.is_some() {
        bonuses.push(ScoreAdjustment {
            rule: ScoreRule::RenewalMarker,
            amount: weights.renewal_marker_bonus,
            reason: "a renewal event reopened the opportunity window".to_string(),
        });
    }

    let grave_multiplier = if case.flags.corporate_veil_piercing {
        config.grave_multiplier
    } else {
        1.0
    };

    RulePass {
        penalties,
        bonuses,
        grave_multiplier,
    }
}
