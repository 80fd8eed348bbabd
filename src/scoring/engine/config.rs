use serde::{Deserialize, Serialize};

use crate::scoring::temporal::TemporalThresholds;

pub const DEFAULT_GRAVE_MULTIPLIER: f64 = 0.4;

/// Base score assigned to each timing classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseScores {
    pub passou: f64,
    pub acompanhar: f64,
    pub agora_constituicao: f64,
    /// One point below constitution: displacing an existing guarantee is a
    /// strictly harder sale.
    pub agora_substituicao: f64,
}

impl Default for BaseScores {
    fn default() -> Self {
        Self {
            passou: 1.0,
            acompanhar: 5.0,
            agora_constituicao: 9.0,
            agora_substituicao: 8.0,
        }
    }
}

/// Magnitude of every penalty and bonus rule. Each weight is a named,
/// independently tunable constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleWeights {
    pub stale_silence_penalty: f64,
    pub diffuse_defendants_penalty: f64,
    pub procedural_freeze_penalty: f64,
    pub unknown_guarantee_type_penalty: f64,
    pub dormant_passivity_penalty: f64,
    pub fresh_marker_bonus: f64,
    pub onerous_candidate_bonus: f64,
    pub active_defendant_bonus: f64,
    pub renewal_marker_bonus: f64,
}

impl Default for RuleWeights {
    fn default() -> Self {
        Self {
            stale_silence_penalty: 2.0,
            diffuse_defendants_penalty: 1.0,
            // Kept above the stale-silence penalty: when a freeze explains
            // the silence, the larger of the two applies.
            procedural_freeze_penalty: 3.0,
            unknown_guarantee_type_penalty: 1.0,
            dormant_passivity_penalty: 2.0,
            fresh_marker_bonus: 1.0,
            onerous_candidate_bonus: 2.0,
            active_defendant_bonus: 1.0,
            renewal_marker_bonus: 1.0,
        }
    }
}

/// Full tunable surface of the score calculator. Loading these values from a
/// file or environment is the caller's concern; the engine only requires that
/// no constant is an inlined literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub base_scores: BaseScores,
    pub weights: RuleWeights,
    /// Score-collapsing factor in (0, 1] applied when a corporate-veil
    /// piercing signal is present.
    pub grave_multiplier: f64,
    pub thresholds: TemporalThresholds,
}

impl ScoringConfig {
    pub const SCORE_FLOOR: f64 = 0.0;
    pub const SCORE_CEILING: f64 = 10.0;
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_scores: BaseScores::default(),
            weights: RuleWeights::default(),
            grave_multiplier: DEFAULT_GRAVE_MULTIPLIER,
            thresholds: TemporalThresholds::default(),
        }
    }
}
