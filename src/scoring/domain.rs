use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::temporal::TemporalFlags;

/// Coarse timing classification driving the numeric base score.
///
/// The variant names are kept in the upstream (Portuguese) vocabulary because
/// downstream consumers match on the serialized labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimingBase {
    /// The opportunity window has closed or never existed.
    Passou,
    /// No concrete trigger yet; keep watching the docket.
    Acompanhar,
    /// Act now: constitute a guarantee where none exists.
    AgoraConstituicao,
    /// Act now: substitute an existing, capital-immobilizing guarantee.
    AgoraSubstituicao,
}

impl TimingBase {
    pub const fn label(self) -> &'static str {
        match self {
            TimingBase::Passou => "PASSOU",
            TimingBase::Acompanhar => "ACOMPANHAR",
            TimingBase::AgoraConstituicao => "AGORA_CONSTITUICAO",
            TimingBase::AgoraSubstituicao => "AGORA_SUBSTITUICAO",
        }
    }

    /// Three-valued label kept for legacy consumers: both AGORA_* states
    /// collapse to plain "AGORA".
    pub const fn legacy_label(self) -> &'static str {
        match self {
            TimingBase::Passou => "PASSOU",
            TimingBase::Acompanhar => "ACOMPANHAR",
            TimingBase::AgoraConstituicao | TimingBase::AgoraSubstituicao => "AGORA",
        }
    }

    pub const fn recommendation(self) -> &'static str {
        match self {
            TimingBase::Passou => "no actionable opportunity; archive the lead",
            TimingBase::Acompanhar => "monitor the docket and reassess on the next movement",
            TimingBase::AgoraConstituicao => {
                "approach now with an insurance bond before a guarantee is constituted"
            }
            TimingBase::AgoraSubstituicao => {
                "approach now with a substitution proposal for the existing guarantee"
            }
        }
    }
}

/// Raw decision-tree assessment produced by the upstream extraction step.
///
/// Treated as untrusted but structurally typed input; `DecisionTreeGuard`
/// enforces the cross-field invariants before any scoring happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionTreeResult {
    /// The case type admits a judicial guarantee at all.
    pub plausibility: bool,
    /// A concrete trigger for the guarantee need exists now or existed before.
    #[serde(default)]
    pub materialization: bool,
    #[serde(default)]
    pub markers: Option<MarkerDates>,
    #[serde(default)]
    pub post_marker_activity: Option<PostMarkerActivity>,
    #[serde(default)]
    pub special_contexts: SpecialContexts,
    #[serde(default)]
    pub existing_guarantee: Option<GuaranteeAssessment>,
    #[serde(default)]
    pub active_branch: Option<ActiveBranch>,
    #[serde(default)]
    pub substitution: Option<SubstitutionDetails>,
    #[serde(default)]
    pub constitution: Option<ConstitutionDetails>,
    #[serde(default)]
    pub llm_flags: LlmFlags,
}

/// Marker dates on the wire, `DD/MM/YYYY` (the upstream docket format).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerDates {
    /// First act that made the guarantee legally plausible.
    pub primary: String,
    /// Most recent act reinforcing the need.
    pub most_recent: String,
    /// Later event that reopened the opportunity window, when one exists.
    #[serde(default)]
    pub renewal: Option<String>,
}

/// Nature of procedural activity after the most recent marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostMarkerActivity {
    Routine,
    Restrictive,
    Silence,
}

/// Which of the two mutually exclusive analysis paths applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveBranch {
    Substitution,
    Constitution,
}

impl ActiveBranch {
    pub const fn label(self) -> &'static str {
        match self {
            ActiveBranch::Substitution => "substitution",
            ActiveBranch::Constitution => "constitution",
        }
    }
}

/// Five-valued answer about an existing guarantee, preserving the upstream
/// coarse certainty levels instead of a boolean plus confidence float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuaranteeAnswer {
    Yes,
    ProbablyYes,
    Uncertain,
    ProbablyNo,
    No,
}

/// How the existing-guarantee answer was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InferenceBasis {
    Direct,
    Silence,
    ConfirmedAbsence,
}

/// Existing-guarantee status reported by the extraction step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuaranteeAssessment {
    pub answer: GuaranteeAnswer,
    pub inference_basis: InferenceBasis,
}

/// Enumerated guarantee instruments an existing guarantee can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuaranteeType {
    JudicialDeposit,
    CashPledge,
    MovablePledge,
    RealEstatePledge,
    BankBond,
    InsuranceBond,
    JudicialMortgage,
    RealCollateral,
    Undefined,
    Other,
}

/// Detection record for one special context. A context counts only with
/// explicit textual evidence; it is never inferred.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialContextSignal {
    #[serde(default)]
    pub detected: bool,
    /// Exact docket excerpt backing the detection.
    #[serde(default)]
    pub evidence: Option<String>,
}

/// The fixed set of detectable special contexts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialContexts {
    #[serde(default)]
    pub suspended: SpecialContextSignal,
    #[serde(default)]
    pub judicial_recovery: SpecialContextSignal,
    #[serde(default)]
    pub settlement_negotiation: SpecialContextSignal,
    #[serde(default)]
    pub appeal_phase: SpecialContextSignal,
    #[serde(default)]
    pub multiple_defendants: SpecialContextSignal,
    #[serde(default)]
    pub bankruptcy: SpecialContextSignal,
}

impl SpecialContexts {
    /// Contexts that freeze the proceeding and reduce near-term viability.
    pub fn procedural_freeze(&self) -> Option<&'static str> {
        if self.bankruptcy.detected {
            Some("bankruptcy")
        } else if self.judicial_recovery.detected {
            Some("judicial recovery")
        } else {
            None
        }
    }
}

/// Substitution-path details (present iff the active branch is substitution).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionDetails {
    pub guarantee_type: GuaranteeType,
    /// Date the existing guarantee was offered, `DD/MM/YYYY`, when known.
    #[serde(default)]
    pub offered_date: Option<String>,
    /// The current guarantee immobilizes cash or assets.
    pub is_onerous: bool,
    pub is_candidate: bool,
}

/// Constitution-path details (present iff the active branch is constitution).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstitutionDetails {
    /// A seizure has been ordered but not yet executed.
    pub imminent_seizure_threat: bool,
    pub defendant_active: bool,
    pub case_closed: bool,
    pub is_candidate: bool,
}

/// Auxiliary boolean signals extracted by the language model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmFlags {
    #[serde(default)]
    pub guarantee_inferred_from_silence: bool,
    #[serde(default)]
    pub guarantee_type_unknown: bool,
    #[serde(default)]
    pub direct_evidence_onerous_guarantee: bool,
    /// Defendant in default / non-responsive.
    #[serde(default)]
    pub defendant_showed_passivity: bool,
    /// Judicial signal of piercing the corporate veil or holding partners or
    /// officers personally liable.
    #[serde(default)]
    pub corporate_veil_piercing: bool,
    /// An attorney of record is constituted for the defendant. Contradicts
    /// (and clears) `defendant_showed_passivity` during normalization.
    #[serde(default)]
    pub attorney_of_record_constituted: bool,
}

/// Parsed marker dates after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalMarkers {
    pub primary: NaiveDate,
    pub most_recent: NaiveDate,
    pub renewal: Option<NaiveDate>,
}

/// Sanitized, invariant-checked view of a decision tree. The short-circuit
/// states carry no payload: their classification ignores every other field.
#[derive(Debug, Clone, PartialEq)]
pub enum CaseProfile {
    NotPlausible,
    NotMaterialized,
    Materialized(MaterializedCase),
}

/// A fully materialized case: markers, branch, and derived temporal flags are
/// all guaranteed present and consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterializedCase {
    pub markers: TemporalMarkers,
    pub temporal: TemporalFlags,
    pub branch: BranchAssessment,
    pub post_marker_activity: PostMarkerActivity,
    pub special_contexts: SpecialContexts,
    pub existing_guarantee: Option<GuaranteeAssessment>,
    /// LLM flags after the contradiction pre-normalization pass.
    pub flags: LlmFlags,
}

/// Exactly one branch survives validation.
#[derive(Debug, Clone, PartialEq)]
pub enum BranchAssessment {
    Substitution(SubstitutionAssessment),
    Constitution(ConstitutionAssessment),
}

/// Substitution details with the offered date parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubstitutionAssessment {
    pub guarantee_type: GuaranteeType,
    pub offered: Option<NaiveDate>,
    pub is_onerous: bool,
    pub is_candidate: bool,
}

/// Constitution details after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstitutionAssessment {
    pub imminent_seizure_threat: bool,
    pub defendant_active: bool,
    pub case_closed: bool,
    pub is_candidate: bool,
}
