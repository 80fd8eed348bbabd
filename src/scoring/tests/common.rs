use std::sync::Arc;

use chrono::{Days, NaiveDate};
use serde_json::Value;

use crate::scoring::domain::{
    ActiveBranch, ConstitutionDetails, DecisionTreeResult, GuaranteeType, LlmFlags, MarkerDates,
    PostMarkerActivity, SpecialContextSignal, SpecialContexts, SubstitutionDetails,
};
use crate::scoring::engine::ScoringConfig;
use crate::scoring::normalize::DecisionTreeGuard;
use crate::scoring::router::timing_router;
use crate::scoring::service::{ScoringOutcome, TimingScoreService};
use crate::scoring::temporal::TemporalThresholds;

pub(super) fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date")
}

/// Wire-format marker dated `days_before` days before the reference date.
pub(super) fn marker(days_before: u32) -> String {
    reference_date()
        .checked_sub_days(Days::new(u64::from(days_before)))
        .expect("valid date")
        .format("%d/%m/%Y")
        .to_string()
}

pub(super) fn detected(evidence: &str) -> SpecialContextSignal {
    SpecialContextSignal {
        detected: true,
        evidence: Some(evidence.to_string()),
    }
}

pub(super) fn constitution_tree(days_since_most_recent: u32) -> DecisionTreeResult {
    DecisionTreeResult {
        plausibility: true,
        materialization: true,
        markers: Some(MarkerDates {
            primary: marker(120),
            most_recent: marker(days_since_most_recent),
            renewal: None,
        }),
        post_marker_activity: Some(PostMarkerActivity::Routine),
        special_contexts: SpecialContexts::default(),
        existing_guarantee: None,
        active_branch: Some(ActiveBranch::Constitution),
        substitution: None,
        constitution: Some(ConstitutionDetails {
            imminent_seizure_threat: true,
            defendant_active: true,
            case_closed: false,
            is_candidate: true,
        }),
        llm_flags: LlmFlags::default(),
    }
}

pub(super) fn substitution_tree(days_since_most_recent: u32) -> DecisionTreeResult {
    DecisionTreeResult {
        plausibility: true,
        materialization: true,
        markers: Some(MarkerDates {
            primary: marker(days_since_most_recent + 30),
            most_recent: marker(days_since_most_recent),
            renewal: None,
        }),
        post_marker_activity: Some(PostMarkerActivity::Routine),
        special_contexts: SpecialContexts::default(),
        existing_guarantee: None,
        active_branch: Some(ActiveBranch::Substitution),
        substitution: Some(SubstitutionDetails {
            guarantee_type: GuaranteeType::JudicialDeposit,
            offered_date: None,
            is_onerous: true,
            is_candidate: true,
        }),
        constitution: None,
        llm_flags: LlmFlags::default(),
    }
}

pub(super) fn scoring_config() -> ScoringConfig {
    ScoringConfig::default()
}

pub(super) fn service() -> TimingScoreService {
    TimingScoreService::new(scoring_config())
}

pub(super) fn guard() -> DecisionTreeGuard {
    DecisionTreeGuard::new(TemporalThresholds::default())
}

pub(super) fn score(tree: &DecisionTreeResult) -> ScoringOutcome {
    service()
        .score(tree, Some(reference_date()))
        .expect("valid decision tree")
}

pub(super) fn router() -> axum::Router {
    timing_router(Arc::new(service()))
}

pub(super) async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
