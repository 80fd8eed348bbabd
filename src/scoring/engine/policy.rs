use super::config::BaseScores;
use crate::scoring::domain::{BranchAssessment, CaseProfile, TimingBase};

/// Classify a sanitized profile. First match wins, evaluated once; the
/// classification is a pure function of the snapshot, never iterative.
pub(crate) fn classify(profile: &CaseProfile) -> TimingBase {
    match profile {
        CaseProfile::NotPlausible => TimingBase::Passou,
        CaseProfile::NotMaterialized => TimingBase::Acompanhar,
        CaseProfile::Materialized(case) => match case.branch {
            BranchAssessment::Constitution(_) => TimingBase::AgoraConstituicao,
            BranchAssessment::Substitution(_) => TimingBase::AgoraSubstituicao,
        },
    }
}

pub(crate) fn base_score(timing: TimingBase, scores: &BaseScores) -> f64 {
    match timing {
        TimingBase::Passou => scores.passou,
        TimingBase::Acompanhar => scores.acompanhar,
        TimingBase::AgoraConstituicao => scores.agora_constituicao,
        TimingBase::AgoraSubstituicao => scores.agora_substituicao,
    }
}
