//! Temporal evaluator: turns calendar marker dates into age-based flags.
//!
//! Pure arithmetic on whole-day differences. Identical inputs (including the
//! reference date) always yield identical flags, which score reproducibility
//! across replays relies on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::TemporalMarkers;

/// Wire format for marker dates, inherited from the upstream docket exports.
pub const MARKER_DATE_FORMAT: &str = "%d/%m/%Y";

/// Day windows the evaluator turns into flags. Each window is a named,
/// independently tunable constant rather than an inlined literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalThresholds {
    /// Very recent activity; triggers the fresh-marker bonus.
    pub fresh_days: u32,
    /// Still-recent activity window reported in justifications.
    pub recent_days: u32,
    /// Beyond this the case is considered stale.
    pub stale_days: u32,
    /// Beyond this the case is considered dormant.
    pub dormant_days: u32,
}

impl Default for TemporalThresholds {
    fn default() -> Self {
        Self {
            fresh_days: 15,
            recent_days: 30,
            stale_days: 90,
            dormant_days: 180,
        }
    }
}

/// Age flags derived from the markers and a reference date. Never stored
/// independently of the request that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalFlags {
    pub days_since_primary_marker: u32,
    pub days_since_most_recent_marker: u32,
    /// Most-recent marker within the fresh window.
    pub fresh: bool,
    /// Most-recent marker within the recent window.
    pub recent: bool,
    /// Most-recent marker strictly beyond the stale window.
    pub stale: bool,
    /// Most-recent marker strictly beyond the dormant window.
    pub dormant: bool,
    /// Primary marker strictly beyond the dormant window.
    pub primary_dormant: bool,
}

/// A marker date that cannot be interpreted against the reference date.
/// Fatal for the request; the evaluator never clamps or repairs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidTemporalData {
    #[error("'{field}' value '{value}' is not a valid DD/MM/YYYY date")]
    Unparseable { field: &'static str, value: String },
    #[error("'{field}' ({date}) is after the reference date ({reference})")]
    FutureMarker {
        field: &'static str,
        date: NaiveDate,
        reference: NaiveDate,
    },
}

pub fn parse_marker_date(
    field: &'static str,
    raw: &str,
) -> Result<NaiveDate, InvalidTemporalData> {
    NaiveDate::parse_from_str(raw.trim(), MARKER_DATE_FORMAT).map_err(|_| {
        InvalidTemporalData::Unparseable {
            field,
            value: raw.to_string(),
        }
    })
}

fn days_between(
    field: &'static str,
    reference: NaiveDate,
    marker: NaiveDate,
) -> Result<u32, InvalidTemporalData> {
    let days = reference.signed_duration_since(marker).num_days();
    if days < 0 {
        return Err(InvalidTemporalData::FutureMarker {
            field,
            date: marker,
            reference,
        });
    }
    Ok(days as u32)
}

/// Evaluate the marker dates against the reference date.
pub fn evaluate(
    reference: NaiveDate,
    markers: &TemporalMarkers,
    thresholds: &TemporalThresholds,
) -> Result<TemporalFlags, InvalidTemporalData> {
    let primary = days_between("markers.primary", reference, markers.primary)?;
    let most_recent = days_between("markers.most_recent", reference, markers.most_recent)?;
    if let Some(renewal) = markers.renewal {
        days_between("markers.renewal", reference, renewal)?;
    }

    Ok(TemporalFlags {
        days_since_primary_marker: primary,
        days_since_most_recent_marker: most_recent,
        fresh: most_recent <= thresholds.fresh_days,
        recent: most_recent <= thresholds.recent_days,
        stale: most_recent > thresholds.stale_days,
        dormant: most_recent > thresholds.dormant_days,
        primary_dormant: primary > thresholds.dormant_days,
    })
}
