//! Structural validation and pre-normalization of raw decision trees.
//!
//! The guard is the only path from [`DecisionTreeResult`] to a scoreable
//! [`CaseProfile`]. A violated invariant is fatal for the request; nothing is
//! silently repaired, except for the single documented contradiction rule
//! that clears a conflicting flag before rule evaluation.

use chrono::NaiveDate;

use super::domain::{
    ActiveBranch, BranchAssessment, CaseProfile, ConstitutionAssessment, DecisionTreeResult,
    LlmFlags, MaterializedCase, SubstitutionAssessment, TemporalMarkers,
};
use super::temporal::{self, TemporalThresholds};
use super::ScoringError;

/// A structural invariant of the decision tree is violated. Names the
/// offending field so the caller can produce an actionable message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedDecisionTree {
    #[error("'{field}' is mandatory when materialization is confirmed")]
    MissingField { field: &'static str },
    #[error("both substitution and constitution details are populated; exactly one branch is allowed")]
    ConflictingBranches,
    #[error("active branch '{declared}' has no matching details")]
    MissingBranchDetails { declared: &'static str },
    #[error("active branch '{declared}' contradicts the populated '{populated}' details")]
    BranchMismatch {
        declared: &'static str,
        populated: &'static str,
    },
}

/// Guard producing sanitized [`CaseProfile`] values from raw decision trees.
#[derive(Debug, Clone, Default)]
pub struct DecisionTreeGuard {
    thresholds: TemporalThresholds,
}

impl DecisionTreeGuard {
    pub fn new(thresholds: TemporalThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &TemporalThresholds {
        &self.thresholds
    }

    /// Validate a raw decision tree against the reference date.
    ///
    /// The short-circuit states return early: when plausibility or
    /// materialization is denied, every downstream field is ignored rather
    /// than validated.
    pub fn profile(
        &self,
        raw: &DecisionTreeResult,
        reference: NaiveDate,
    ) -> Result<CaseProfile, ScoringError> {
        if !raw.plausibility {
            return Ok(CaseProfile::NotPlausible);
        }
        if !raw.materialization {
            return Ok(CaseProfile::NotMaterialized);
        }

        let dates = raw
            .markers
            .as_ref()
            .ok_or(MalformedDecisionTree::MissingField { field: "markers" })?;
        let primary = temporal::parse_marker_date("markers.primary", &dates.primary)?;
        let most_recent = temporal::parse_marker_date("markers.most_recent", &dates.most_recent)?;
        let renewal = dates
            .renewal
            .as_deref()
            .map(|raw| temporal::parse_marker_date("markers.renewal", raw))
            .transpose()?;
        let markers = TemporalMarkers {
            primary,
            most_recent,
            renewal,
        };

        let flags = temporal::evaluate(reference, &markers, &self.thresholds)?;

        let post_marker_activity =
            raw.post_marker_activity
                .ok_or(MalformedDecisionTree::MissingField {
                    field: "post_marker_activity",
                })?;

        Ok(CaseProfile::Materialized(MaterializedCase {
            markers,
            temporal: flags,
            branch: branch_assessment(raw)?,
            post_marker_activity,
            special_contexts: raw.special_contexts.clone(),
            existing_guarantee: raw.existing_guarantee,
            flags: normalized_flags(&raw.llm_flags),
        }))
    }
}

fn branch_assessment(raw: &DecisionTreeResult) -> Result<BranchAssessment, ScoringError> {
    let declared = raw
        .active_branch
        .ok_or(MalformedDecisionTree::MissingField {
            field: "active_branch",
        })?;

    match (declared, &raw.substitution, &raw.constitution) {
        (_, Some(_), Some(_)) => Err(MalformedDecisionTree::ConflictingBranches.into()),
        (ActiveBranch::Substitution, Some(details), None) => {
            let offered = details
                .offered_date
                .as_deref()
                .map(|raw| temporal::parse_marker_date("substitution.offered_date", raw))
                .transpose()?;
            Ok(BranchAssessment::Substitution(SubstitutionAssessment {
                guarantee_type: details.guarantee_type,
                offered,
                is_onerous: details.is_onerous,
                is_candidate: details.is_candidate,
            }))
        }
        (ActiveBranch::Constitution, None, Some(details)) => {
            Ok(BranchAssessment::Constitution(ConstitutionAssessment {
                imminent_seizure_threat: details.imminent_seizure_threat,
                defendant_active: details.defendant_active,
                case_closed: details.case_closed,
                is_candidate: details.is_candidate,
            }))
        }
        (ActiveBranch::Substitution, None, Some(_)) => {
            Err(MalformedDecisionTree::BranchMismatch {
                declared: "substitution",
                populated: "constitution",
            }
            .into())
        }
        (ActiveBranch::Constitution, Some(_), None) => {
            Err(MalformedDecisionTree::BranchMismatch {
                declared: "constitution",
                populated: "substitution",
            }
            .into())
        }
        (declared, None, None) => Err(MalformedDecisionTree::MissingBranchDetails {
            declared: declared.label(),
        }
        .into()),
    }
}

/// A constituted attorney of record contradicts a defendant-in-default
/// report. The conflicting flag is cleared here so the rule table stays free
/// of exception logic.
fn normalized_flags(flags: &LlmFlags) -> LlmFlags {
    let mut flags = flags.clone();
    if flags.attorney_of_record_constituted && flags.defendant_showed_passivity {
        flags.defendant_showed_passivity = false;
    }
    flags
}
